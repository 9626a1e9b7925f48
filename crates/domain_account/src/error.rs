//! Account domain errors
//!
//! This module defines all error types that can occur in the account domain.
//! Storage failures arrive as [`PortError`] and are classified into the
//! domain taxonomy without being retried.

use thiserror::Error;

use core_kernel::PortError;

use crate::validation::ValidationReport;

/// Errors that can occur in the account domain
#[derive(Debug, Error)]
pub enum AccountError {
    /// The email address broke one of its constraints
    #[error("Invalid e-mail address: {0}")]
    InvalidEmail(String),

    /// Account validation failed on a field other than the email address
    #[error("Account validation failed: {0}")]
    ValidationFailed(String),

    /// An account must hold at least one address when created
    #[error("At least one address is required")]
    MissingAddress,

    /// Account with the given ID or natural key was not found
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Unique constraint violated on the natural key or email address
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Any other storage failure
    #[error("Repository error: {0}")]
    Repository(#[source] PortError),
}

impl AccountError {
    /// Creates a NotFound error from any ID type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        AccountError::NotFound(id.to_string())
    }

    /// Creates the create-time rejection for a failed report
    ///
    /// Email violations surface as `InvalidEmail`, everything else as
    /// `ValidationFailed`.
    pub fn from_report(report: &ValidationReport) -> Self {
        let messages = report.messages().join("; ");
        if report.has_email_violation() {
            AccountError::InvalidEmail(messages)
        } else {
            AccountError::ValidationFailed(messages)
        }
    }

    /// Returns true for every create-time rejection
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AccountError::InvalidEmail(_) | AccountError::ValidationFailed(_) | AccountError::MissingAddress
        )
    }

    /// Returns true if the account does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccountError::NotFound(_))
    }
}

impl From<PortError> for AccountError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { id, .. } => AccountError::NotFound(id),
            PortError::Conflict { message } => AccountError::DuplicateKey(message),
            other => AccountError::Repository(other),
        }
    }
}
