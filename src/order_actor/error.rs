use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid item format at index {index}: {reason}")]
    InvalidItemShape { index: usize, reason: String },
    #[error("Invalid quantity or price at index {index}: {reason}")]
    InvalidItemRange { index: usize, reason: String },
    #[error("Invalid status value: {0}")]
    InvalidStatus(String),
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// True for rejections caused by the request's content.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OrderError::MissingField(_)
                | OrderError::InvalidItemShape { .. }
                | OrderError::InvalidItemRange { .. }
                | OrderError::InvalidStatus(_)
        )
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
