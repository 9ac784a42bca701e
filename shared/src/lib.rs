//! Shared types for the Tally billing core
//!
//! Data models and error types used by the core engine and by any
//! embedding presentation layer (desktop shell, CLI, tests).

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
