//! # Common Error Types
//!
//! Consolidated error handling for the client core.
//!
//! ## Error Categories
//!
//! Errors are categorized by where they were detected:
//!
//! - **Transport**: the canister gateway could not be reached or its reply could
//!   not be decoded
//! - **Declined**: the canister understood the request and answered `{"err": ..}`
//! - **Precondition**: an action needed session state that is missing
//! - **Validation**: arguments rejected locally, before any remote call
//! - **Busy**: the same action is already in flight
//! - **Config**: configuration could not be loaded or is invalid
//!
//! Only the first two ever come from the network. The last four are detected by
//! the store itself and short-circuit without a remote call.
//!
//! ## Error Conversion
//!
//! - [`FacadeError`] → `AppError::Transport` / `AppError::Declined`

use thiserror::Error;

use crate::services::facade::FacadeError;

/// Application-wide error type returned by every store action.
///
/// The `Display` text is what ends up in the store's error message, prefixed by
/// the action that failed.
///
/// ```rust
/// use nuru_client::core::error::AppError;
///
/// let err = AppError::Declined("Insufficient balance".to_string());
/// assert_eq!(err.to_string(), "Insufficient balance");
///
/// let err = AppError::Precondition("Not signed in".to_string());
/// assert_eq!(err.to_string(), "Not signed in");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// Gateway unreachable, non-success status or undecodable reply. The
    /// message already names the failure kind.
    #[error("{0}")]
    Transport(String),

    /// The canister rejected the request; carries its reason verbatim.
    #[error("{0}")]
    Declined(String),

    /// Missing session state (no principal, not authenticated).
    #[error("{0}")]
    Precondition(String),

    /// Invalid arguments caught before calling out.
    #[error("{0}")]
    Validation(String),

    /// An action with the same key has not settled yet.
    #[error("{0} is already in progress")]
    Busy(String),

    /// Configuration load or validation failure.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<FacadeError> for AppError {
    fn from(err: FacadeError) -> Self {
        match err {
            FacadeError::Transport(msg) => AppError::Transport(msg),
            FacadeError::Declined(reason) => AppError::Declined(reason),
        }
    }
}
