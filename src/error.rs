//! Notification Layer Error Types

use thiserror::Error;

/// Result type for notification operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors surfaced by the notification layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// A handle was used after its context was torn down, or before one was
    /// created. This is a programming error, not a runtime condition.
    #[error("notification context is not initialized")]
    NotInitialized,
}
