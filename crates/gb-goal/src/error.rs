// error.rs — Error types for the goal store.

use thiserror::Error;

use crate::goal::GoalId;

/// Errors that can occur during goal operations.
#[derive(Debug, Error)]
pub enum GoalError {
    /// No goal with the given id exists in the store.
    #[error("goal not found: {0}")]
    NotFound(GoalId),

    /// The id counter has already handed out the largest possible id.
    #[error("no goal ids left to assign")]
    IdsExhausted,

    /// A file I/O operation failed (event log sink).
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize an event.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
