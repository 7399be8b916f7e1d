use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{GenAiError, Result};

/// What a piece of generated text is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    StrikeReason,
    TreatCelebration,
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Purpose::StrikeReason => "strike_reason",
            Purpose::TreatCelebration => "treat_celebration",
        };
        f.write_str(s)
    }
}

/// A fallible text source. Callers go through [`crate::StrikeWriter`], which
/// turns every failure into a usable string.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, purpose: Purpose, employee_name: &str) -> Result<String>;
}

/// Generator used when no credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

#[async_trait]
impl TextGenerator for Offline {
    async fn generate(&self, _purpose: Purpose, _employee_name: &str) -> Result<String> {
        Err(GenAiError::Disabled)
    }
}
