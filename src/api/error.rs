use reqwest::StatusCode;
use thiserror::Error;

const MAX_MESSAGE_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Network(#[source] reqwest::Error),

    #[error("client not found")]
    NotFound,

    #[error("request rejected ({status}): {message}")]
    Client { status: StatusCode, message: String },

    #[error("backend error ({status}): {message}")]
    Server { status: StatusCode, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Map a non-success status and its body to an error.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = truncate(body.trim());

        if status == StatusCode::NOT_FOUND {
            ApiError::NotFound
        } else if status.is_client_error() {
            ApiError::Client { status, message }
        } else {
            ApiError::Server { status, message }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_MESSAGE_LEN {
        return body.to_string();
    }
    let mut message: String = body.chars().take(MAX_MESSAGE_LEN).collect();
    message.push_str("...");
    message
}
