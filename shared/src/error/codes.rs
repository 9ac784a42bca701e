//! Error codes for the billing core
//!
//! Error codes are shared between the core and its embedders so the
//! presentation layer can branch on the kind of failure without parsing
//! messages:
//! - 0xxx: input errors (recoverable at the call site)
//! - 5xxx: persistence errors (abort the mutation)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as a u16 for efficient serialization and cross-language
/// compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    /// Bad user input (name, price, quantity)
    ValidationFailed = 1,
    /// Operation referenced a missing id or index
    NotFound = 2,
    /// Bill generation attempted on an empty cart
    EmptyCart = 3,
    /// Underlying store write failed; in-memory state was left unchanged
    PersistenceFailed = 5001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::EmptyCart => "Cart is empty",
            ErrorCode::PersistenceFailed => "Failed to persist state",
        }
    }

    /// Whether the presentation layer can recover by showing a message
    /// and leaving state as-is
    #[inline]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, ErrorCode::PersistenceFailed)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ErrorCode::ValidationFailed),
            2 => Ok(ErrorCode::NotFound),
            3 => Ok(ErrorCode::EmptyCart),
            5001 => Ok(ErrorCode::PersistenceFailed),
            other => Err(format!("unknown error code: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::EmptyCart,
            ErrorCode::PersistenceFailed,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(ErrorCode::try_from(9999).is_err());
    }

    #[test]
    fn test_recoverability() {
        assert!(ErrorCode::ValidationFailed.is_recoverable());
        assert!(ErrorCode::NotFound.is_recoverable());
        assert!(ErrorCode::EmptyCart.is_recoverable());
        assert!(!ErrorCode::PersistenceFailed.is_recoverable());
    }
}
