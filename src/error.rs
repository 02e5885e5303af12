use thiserror::Error;

/// Every way a single call to the content API can fail.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-success status on a read endpoint; the body is not inspected.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// Non-success status with a JSON `{error, details?}` body.
    #[error("HTTP {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Non-success status whose body is not the expected JSON.
    #[error("HTTP {status}: {body}")]
    RawBody { status: u16, body: String },

    /// The request was refused locally before anything was sent.
    #[error("Missing required fields: {}", .fields.join(", "))]
    Invalid { fields: Vec<&'static str> },

    /// The server answered 201, so the article exists, but the body could
    /// not be decoded into an article.
    #[error("Article created, but the response body is unreadable: {source}")]
    CreatedUnreadable { source: serde_json::Error },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status attached to the failure, if a response came back.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status }
            | ApiError::Rejected { status, .. }
            | ApiError::RawBody { status, .. } => Some(*status),
            ApiError::CreatedUnreadable { .. } => Some(201),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Invalid { .. } | ApiError::Decode(_) => None,
        }
    }
}
