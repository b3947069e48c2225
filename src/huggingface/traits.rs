use crate::error::FailureCategory;
use async_trait::async_trait;
use thiserror::Error;

/// Failure of the external text-to-image call, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("{0}")]
    Transport(String),

    /// A response arrived but did not contain a usable image.
    #[error("{0}")]
    Decode(String),
}

impl From<InferenceError> for FailureCategory {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Status { status, message } => {
                FailureCategory::from_status(status, message)
            }
            InferenceError::Transport(message) => FailureCategory::from_message(message),
            // Decoder messages carry sizes and offsets, never upstream status.
            InferenceError::Decode(message) => FailureCategory::Unknown(message),
        }
    }
}

/// Something that turns a prompt into encoded image bytes.
#[async_trait]
pub trait TextToImage: Send + Sync {
    async fn text_to_image(&self, prompt: &str, model_id: &str)
        -> Result<Vec<u8>, InferenceError>;
}
