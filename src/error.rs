use thiserror::Error;

use crate::cancel::CancelReason;

/// Error produced by an external durable job source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum IterationError {
    #[error("Iteration cancelled: {0}")]
    Cancelled(CancelReason),

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl IterationError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, IterationError::Cancelled(_))
    }
}

pub type Result<T> = std::result::Result<T, IterationError>;
