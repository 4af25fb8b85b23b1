//! Client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend rejected the upload and supplied (or we substituted)
    /// a human-readable reason.
    #[error("{0}")]
    UploadRejected(String),

    /// A status poll came back non-2xx.
    #[error("Progress request failed")]
    ProgressRequest,

    /// The upload succeeded but the response carried no job id. Treated
    /// as a submission failure so polling never starts without a handle.
    #[error("Upload response did not include a job id")]
    MissingJobId,

    #[error("Invalid server URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn upload_rejected(msg: impl Into<String>) -> Self {
        Self::UploadRejected(msg.into())
    }
}
