// Domain error types - collaborator failures surface, notification failures stay contained

use thiserror::Error;

/// Main error type for account security operations
#[derive(Error, Debug)]
pub enum SecurityError {
    /// The account record does not exist in the store
    #[error("Account not found")]
    AccountNotFound,

    /// The backing store failed to read or write the record
    ///
    /// An operation that returns this has committed none of its fields.
    #[error("Store error: {0}")]
    StoreError(String),

    /// Configuration error at startup
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Notification channel errors
///
/// These never propagate out of a lock transition; the dispatcher logs
/// them and the lock stands.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The outbound channel rejected or dropped the message
    #[error("Notification channel error: {0}")]
    ChannelError(String),
}
