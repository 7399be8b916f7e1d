//! `strikes-genai` — short generated texts for the strike tracker.
//!
//! Two kinds of text are generated from an employee name: an absurd reason
//! for a strike, and the announcement that someone hit three strikes and now
//! has to bring a treat.
//!
//! ```text
//! StrikeWriter         ← infallible: timeout, normalization, fallback strings
//!     │
//!     ▼
//! dyn TextGenerator    ← may fail (network, auth, empty output)
//!     ├── GeminiClient   generateContent over HTTPS
//!     └── Offline        no credential configured
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use strikes_genai::{GeminiClient, GeminiConfig, StrikeWriter};
//!
//! let client = GeminiClient::new(GeminiConfig::new("secret"));
//! let writer = StrikeWriter::new(Arc::new(client), Duration::from_secs(15));
//! let reason = writer.strike_reason("Niels").await;
//! ```

pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod writer;

pub use error::GenAiError;
pub use gemini::{GeminiClient, GeminiConfig};
pub use generator::{Offline, Purpose, TextGenerator};
pub use writer::StrikeWriter;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, GenAiError>;
