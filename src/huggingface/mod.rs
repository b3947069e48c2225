pub mod handler;
pub mod inference_client;
pub mod traits;

pub use handler::ImageRequestHandler;
pub use inference_client::InferenceClient;
pub use traits::{InferenceError, TextToImage};
