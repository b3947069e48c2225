use serde::Serialize;
use thiserror::Error;

/// Instructions shown to the operator when no API token is configured.
pub const TOKEN_SETUP_INSTRUCTIONS: &str = "Setup Instructions:
  1. Go to https://huggingface.co/settings/tokens
  2. Create a new token with 'Write' permissions
  3. Add it to the `.env` file as: `HUGGINGFACE_TOKEN=your_token_here`";

/// Why an image generation call failed, as far as the user is concerned.
///
/// Every variant keeps the upstream error text so it can be logged or shown
/// next to the friendly message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureCategory {
    #[error("model loading: {0}")]
    ModelLoading(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("{0}")]
    Unknown(String),
}

impl FailureCategory {
    /// Classify free-form error text.
    ///
    /// Checks run in priority order and are case-insensitive, so text that
    /// mentions both "503" and "429" is reported as `ModelLoading`.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();

        if lowered.contains("503") || lowered.contains("loading") {
            FailureCategory::ModelLoading(message)
        } else if lowered.contains("429") || lowered.contains("rate limit") {
            FailureCategory::RateLimited(message)
        } else if lowered.contains("401") || lowered.contains("unauthorized") {
            FailureCategory::Unauthorized(message)
        } else {
            FailureCategory::Unknown(message)
        }
    }

    /// Classify an upstream response that carried an HTTP status.
    ///
    /// The status decides when it is one of the recognized codes. Otherwise
    /// only the textual markers of the body are considered; bare numbers in
    /// the body are ignored.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();

        match status {
            503 => FailureCategory::ModelLoading(message),
            429 => FailureCategory::RateLimited(message),
            401 => FailureCategory::Unauthorized(message),
            _ => {
                let lowered = message.to_lowercase();
                if lowered.contains("loading") {
                    FailureCategory::ModelLoading(message)
                } else if lowered.contains("rate limit") {
                    FailureCategory::RateLimited(message)
                } else if lowered.contains("unauthorized") {
                    FailureCategory::Unauthorized(message)
                } else {
                    FailureCategory::Unknown(message)
                }
            }
        }
    }

    /// Upstream error text, untouched.
    pub fn raw_message(&self) -> &str {
        match self {
            FailureCategory::ModelLoading(msg)
            | FailureCategory::RateLimited(msg)
            | FailureCategory::Unauthorized(msg)
            | FailureCategory::Unknown(msg) => msg,
        }
    }

    /// Stable machine-readable name, used in JSON error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::ModelLoading(_) => "model_loading",
            FailureCategory::RateLimited(_) => "rate_limited",
            FailureCategory::Unauthorized(_) => "unauthorized",
            FailureCategory::Unknown(_) => "unknown",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            FailureCategory::ModelLoading(_) => "⏳",
            FailureCategory::RateLimited(_) => "⚠️",
            FailureCategory::Unauthorized(_) => "🔒",
            FailureCategory::Unknown(_) => "❌",
        }
    }

    /// Actionable message for the person in front of the page.
    pub fn user_message(&self) -> String {
        match self {
            FailureCategory::ModelLoading(_) => {
                "Model is currently loading. Please wait a moment and try again.".to_string()
            }
            FailureCategory::RateLimited(_) => {
                "Rate limit reached. Please wait a few minutes before trying again.".to_string()
            }
            FailureCategory::Unauthorized(_) => {
                "Authentication failed. Please check your HuggingFace token has 'Write' permissions."
                    .to_string()
            }
            FailureCategory::Unknown(msg) => format!("An error occurred: {}", msg),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageGenError {
    #[error("HuggingFace API token not found")]
    MissingCredential,

    #[error("Please enter a description for your image.")]
    EmptyPrompt,

    #[error(transparent)]
    Generation(#[from] FailureCategory),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

impl ImageGenError {
    pub fn category(&self) -> &'static str {
        match self {
            ImageGenError::MissingCredential => "missing_credential",
            ImageGenError::EmptyPrompt => "empty_prompt",
            ImageGenError::Generation(failure) => failure.as_str(),
            ImageGenError::ConfigError(_) => "config_error",
            ImageGenError::ServerError(_) => "server_error",
        }
    }

    /// Message that is safe to show on the page.
    pub fn user_message(&self) -> String {
        match self {
            ImageGenError::Generation(failure) => failure.user_message(),
            ImageGenError::MissingCredential => {
                format!("HuggingFace API token not found!\n{}", TOKEN_SETUP_INSTRUCTIONS)
            }
            ImageGenError::ConfigError(_) | ImageGenError::ServerError(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// JSON shape of an error returned by the HTTP surface.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&ImageGenError> for ErrorBody {
    fn from(err: &ImageGenError) -> Self {
        let detail = match err {
            ImageGenError::Generation(failure) => Some(failure.raw_message().to_string()),
            _ => None,
        };

        ErrorBody {
            error: ErrorDetails {
                category: err.category().to_string(),
                message: err.user_message(),
                detail,
            },
        }
    }
}

#[cfg(feature = "server")]
mod http {
    use super::{ErrorBody, FailureCategory, ImageGenError};
    use actix_web::{http::StatusCode, HttpResponse, ResponseError};

    impl ResponseError for ImageGenError {
        fn status_code(&self) -> StatusCode {
            match self {
                ImageGenError::EmptyPrompt => StatusCode::BAD_REQUEST,
                ImageGenError::Generation(failure) => match failure {
                    FailureCategory::ModelLoading(_) => StatusCode::SERVICE_UNAVAILABLE,
                    FailureCategory::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                    FailureCategory::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                    FailureCategory::Unknown(_) => StatusCode::BAD_GATEWAY,
                },
                ImageGenError::MissingCredential
                | ImageGenError::ConfigError(_)
                | ImageGenError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status_code()).json(ErrorBody::from(self))
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_503_wins_over_everything() {
        let failure = FailureCategory::from_message("503 loading");
        assert_eq!(failure, FailureCategory::ModelLoading("503 loading".into()));

        let failure = FailureCategory::from_message("HTTP 503: 429 rate limit, 401 unauthorized");
        assert!(matches!(failure, FailureCategory::ModelLoading(_)));
    }

    #[test]
    fn test_loading_is_case_insensitive() {
        let failure = FailureCategory::from_message("Model is currently LOADING");
        assert!(matches!(failure, FailureCategory::ModelLoading(_)));
    }

    #[test]
    fn test_rate_limit_any_case() {
        for msg in ["Rate Limit exceeded", "RATE LIMIT", "you hit the rate limit", "429"] {
            let failure = FailureCategory::from_message(msg);
            assert_eq!(failure, FailureCategory::RateLimited(msg.to_string()));
        }
    }

    #[test]
    fn test_rate_limit_beats_unauthorized() {
        let failure = FailureCategory::from_message("429 and also Unauthorized");
        assert!(matches!(failure, FailureCategory::RateLimited(_)));
    }

    #[test]
    fn test_unauthorized() {
        assert!(matches!(
            FailureCategory::from_message("401 Client Error"),
            FailureCategory::Unauthorized(_)
        ));
        assert!(matches!(
            FailureCategory::from_message("Unauthorized: invalid token"),
            FailureCategory::Unauthorized(_)
        ));
    }

    #[test]
    fn test_unknown_preserves_text_verbatim() {
        let raw = "  Something Odd happened (code 42)\n";
        let failure = FailureCategory::from_message(raw);
        assert_eq!(failure, FailureCategory::Unknown(raw.to_string()));
        assert_eq!(failure.raw_message(), raw);
        assert_eq!(failure.user_message(), format!("An error occurred: {}", raw));
    }

    #[test]
    fn test_status_takes_precedence_over_body() {
        let failure = FailureCategory::from_status(429, "Model is loading");
        assert!(matches!(failure, FailureCategory::RateLimited(_)));

        let failure = FailureCategory::from_status(401, "rate limit");
        assert!(matches!(failure, FailureCategory::Unauthorized(_)));
    }

    #[test]
    fn test_unrecognized_status_ignores_numbers_in_body() {
        let failure = FailureCategory::from_status(500, "worker 503 crashed after 429 retries");
        assert_eq!(
            failure,
            FailureCategory::Unknown("worker 503 crashed after 429 retries".into())
        );

        let failure = FailureCategory::from_status(500, "model is Loading");
        assert!(matches!(failure, FailureCategory::ModelLoading(_)));
    }

    #[test]
    fn test_error_body_carries_detail() {
        let err = ImageGenError::from(FailureCategory::RateLimited("slow down".into()));
        let body = ErrorBody::from(&err);
        assert_eq!(body.error.category, "rate_limited");
        assert_eq!(body.error.detail.as_deref(), Some("slow down"));
        assert!(body.error.message.starts_with("Rate limit reached"));

        let body = ErrorBody::from(&ImageGenError::EmptyPrompt);
        assert_eq!(body.error.category, "empty_prompt");
        assert!(body.error.detail.is_none());
    }
}
