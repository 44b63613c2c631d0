//! Error type shared by the history loader and the fetch collaborator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtrError {
    /// No API token was configured when a live fetch was attempted.
    #[error("missing API token: set WTD_API_TOKEN before fetching history")]
    MissingCredential,

    /// The history payload did not have the expected shape or values.
    #[error("malformed history response: {0}")]
    MalformedResponse(String),

    #[error("history request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("history request returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl AtrError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AtrError>;
