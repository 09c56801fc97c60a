#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}
