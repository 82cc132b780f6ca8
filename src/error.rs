//! Error types shared by the API client and the printer.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a single API call.
///
/// Handlers dispatch on the variant, never on the concrete source error:
/// `Http` carries what the server said, `Transport` means no usable response
/// arrived at all.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{status}: {detail}")]
    Http { status: StatusCode, detail: String },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Build an `Http` error from a non-success status and the raw body.
    ///
    /// The API answers errors with `{"statuscode": .., "message": ..}`; when
    /// the body has that shape only the message is kept.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorPayload {
            message: String,
        }

        let detail = match serde_json::from_str::<ErrorPayload>(body) {
            Ok(payload) => payload.message,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            Err(_) => body.trim().to_string(),
        };
        ApiError::Http { status, detail }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure to render a response for display.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to render JSON")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}
