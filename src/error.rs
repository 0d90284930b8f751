use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to save reminder: {0}")]
    SaveFailed(#[source] StoreError),

    #[error("Failed to delete reminder: {0}")]
    DeleteFailed(#[source] StoreError),

    #[error("Invalid calendar scope: {0}")]
    ScopeInvalid(String),

    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ReminderError {
    pub fn permission_denied<S: Into<String>>(msg: S) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn scope_invalid<S: Into<String>>(msg: S) -> Self {
        Self::ScopeInvalid(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller can reasonably retry, e.g. with a different id.
    /// Permission and configuration failures end the session.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::PermissionDenied(_) | Self::Config(_) => false,
            Self::NotFound(_)
            | Self::SaveFailed(_)
            | Self::DeleteFailed(_)
            | Self::ScopeInvalid(_)
            | Self::Timeout(_)
            | Self::InvalidInput(_)
            | Self::Store(_) => true,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type ReminderResult<T> = Result<T, ReminderError>;
