//! App error types.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// A submission was attempted while another session is in flight.
    /// Rejected before any network traffic or presentation change.
    #[error("A processing session is already in flight")]
    SessionActive,

    /// The submitted file failed re-validation. Submission performs no
    /// action in this state.
    #[error("Not a supported video file: {0}")]
    InvalidSelection(String),

    #[error(transparent)]
    Client(#[from] astem_client::ClientError),
}
