//! Text-to-image generation through the HuggingFace inference API, with
//! failures sorted into a small set of user-facing categories.

pub mod config;
pub mod error;
pub mod huggingface;
pub mod logger;
pub mod models;
#[cfg(feature = "server")]
pub mod server;

pub use config::{Config, HuggingFaceConfig};
pub use error::{FailureCategory, ImageGenError, Result};
pub use huggingface::{ImageRequestHandler, InferenceClient, InferenceError, TextToImage};
pub use models::{
    download_filename, GenerateRequest, GenerateResponse, GeneratedImage, ModelInfo, Prompt,
};
