// error.rs — Client-side error types.

use thiserror::Error;

/// Errors from calling the goal API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{0}")]
    Api(String),
}
