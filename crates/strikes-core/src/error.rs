use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrikesError {
    #[error("employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("roster at {path} is corrupt: {source}")]
    CorruptRoster {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StrikesError>;
