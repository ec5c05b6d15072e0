//! # Error Module
//!
//! Domain errors for Minibank, built with thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// Debit is the only fallible operation, so there is a single variant. It
/// carries no payload: the caller already holds both the amount and the
/// account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Insufficient funds")]
    InsufficientFunds,
}

/// Result type alias với AccountError
pub type CoreResult<T> = Result<T, AccountError>;

impl AccountError {
    /// Is this the insufficient funds error
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, AccountError::InsufficientFunds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AccountError::InsufficientFunds;
        assert_eq!(err.to_string(), "Insufficient funds");
    }

    #[test]
    fn test_error_helpers() {
        assert!(AccountError::InsufficientFunds.is_insufficient_funds());
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(AccountError::InsufficientFunds);
        assert_eq!(err.to_string(), "Insufficient funds");
    }
}
