//! Error types for talking to the backend.

use model::ValidationErrors;
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    /// No HTTP response at all: the backend is down or unreachable.
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success status.
    #[error("{status}: {message}")]
    Backend {
        status: u16,
        message: String,
        errors: Vec<String>,
    },

    /// A success response whose body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Client-side checks failed; nothing was sent.
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationErrors),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Error body produced by the backend.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ApiError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn from_body(status: u16, reason: Option<&str>, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| reason.map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        Self::Backend {
            status,
            message,
            errors: parsed.errors,
        }
    }

    /// HTTP status of a backend error; `0` when the backend was unreachable.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unreachable(_) => Some(0),
            ApiError::Backend { status, .. } => Some(*status),
            ApiError::Decode(_) | ApiError::Invalid(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text shown to the user in notifications and banners.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unreachable(_) => "Is the backend up?".to_string(),
            ApiError::Backend {
                message, errors, ..
            } if errors.is_empty() => message.clone(),
            ApiError::Backend {
                message, errors, ..
            } => format!("{message}: {}", errors.join(", ")),
            ApiError::Decode(detail) => format!("Unexpected response from backend: {detail}"),
            ApiError::Invalid(errors) => errors.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::backend(status.as_u16(), e.to_string())
        } else {
            ApiError::Unreachable(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_with_message_and_errors() {
        let err = ApiError::from_body(
            422,
            Some("Unprocessable Entity"),
            r#"{"message":"Validation of horse to create failed","errors":["Horse name cannot be empty"]}"#,
        );
        assert_eq!(err.status(), Some(422));
        assert_eq!(
            err.user_message(),
            "Validation of horse to create failed: Horse name cannot be empty"
        );
    }

    #[test]
    fn test_from_body_falls_back_to_reason() {
        let err = ApiError::from_body(404, Some("Not Found"), "<html>nope</html>");
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Not Found");

        let err = ApiError::from_body(500, None, "");
        assert_eq!(err.user_message(), "Request failed with status 500");
    }

    #[test]
    fn test_unreachable_message() {
        let err = ApiError::Unreachable("connection refused".to_string());
        assert_eq!(err.status(), Some(0));
        assert_eq!(err.user_message(), "Is the backend up?");
    }

    #[test]
    fn test_invalid_from_validation_errors() {
        let err: ApiError = ValidationErrors(vec!["Name is required".to_string()]).into();
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "Name is required");
    }
}
