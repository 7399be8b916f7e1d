pub mod config;
pub mod confirm;
pub mod employee;
pub mod error;
pub mod io;
pub mod paths;
pub mod roster;
pub mod store;

pub use error::{Result, StrikesError};
