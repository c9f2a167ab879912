//! Error taxonomy for calls against the rental backend
//!
//! Every failure of a backend call ends up as one of three cases:
//! the request never completed, the server answered with a non-success
//! status, or a success body did not have the expected shape.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a single backend request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never reached the server or no response came back.
    #[error("{0}")]
    Transport(String),

    /// The server answered with a status outside the success range.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A success response whose body could not be decoded.
    #[error("resposta inesperada do servidor: {0}")]
    Decode(String),
}

/// JSON error body returned by the backend. Every field is optional.
#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Builds a `Server` error from a status and raw body.
    ///
    /// The message comes from the body's `message` field when the body is
    /// JSON and carries a non-blank one; otherwise it is synthesized from the
    /// status line, e.g. `Erro 404: Not Found`.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| status_line(status));

        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// True when the server message mentions any of `needles`, ignoring case.
    pub fn mentions(&self, needles: &[&str]) -> bool {
        let message = match self {
            ApiError::Server { message, .. } => message.to_lowercase(),
            _ => return false,
        };

        needles
            .iter()
            .any(|needle| message.contains(&needle.to_lowercase()))
    }

    /// Message shown to the user for a failed action.
    ///
    /// 400 answers are prefixed with `Dados inválidos: `, 404 answers are
    /// replaced by `not_found`, everything else keeps the server message.
    pub fn user_message(&self, not_found: &str) -> String {
        match self {
            ApiError::Server { status: 400, message } => format!("Dados inválidos: {}", message),
            ApiError::Server { status: 404, .. } => not_found.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_timeout() {
            ApiError::Transport(format!("tempo de resposta esgotado: {}", err))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

fn status_line(status: StatusCode) -> String {
    format!(
        "Erro {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}
