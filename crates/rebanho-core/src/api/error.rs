use serde::Deserialize;
use thiserror::Error;

/// A single field-level validation message returned by the API.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    #[serde(alias = "campo")]
    pub field: String,
    #[serde(alias = "mensagem")]
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized - session could not be renewed")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API rejected request (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        field_errors: Vec<FieldError>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error body shape used by the backend for 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "mensagem", alias = "error")]
    message: Option<String>,
    #[serde(default, alias = "erros")]
    errors: Vec<FieldError>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..end],
                body.len()
            )
        }
    }

    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(Self::truncate_body(body)),
            _ => {
                // Prefer the structured error body when the backend sends one
                if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
                    ApiError::Api {
                        status: status.as_u16(),
                        message: parsed
                            .message
                            .unwrap_or_else(|| Self::truncate_body(body)),
                        field_errors: parsed.errors,
                    }
                } else {
                    ApiError::Api {
                        status: status.as_u16(),
                        message: Self::truncate_body(body),
                        field_errors: Vec::new(),
                    }
                }
            }
        }
    }

    /// Whether this error is a terminal authentication failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
