use crate::{
    config::HuggingFaceConfig,
    error::{FailureCategory, Result},
    huggingface::{
        inference_client::InferenceClient,
        traits::{InferenceError, TextToImage},
    },
    logger,
    models::{GeneratedImage, Prompt},
};
use std::sync::Arc;

/// Turns a prompt into an image and every failure into a [`FailureCategory`].
///
/// Holds no per-request state, so one instance can be cloned into every
/// server worker.
#[derive(Clone)]
pub struct ImageRequestHandler {
    backend: Arc<dyn TextToImage>,
    model_id: String,
}

impl ImageRequestHandler {
    pub fn new(config: &HuggingFaceConfig) -> Result<Self> {
        let client = InferenceClient::new(config)?;
        Ok(Self::with_backend(Arc::new(client), config.model.clone()))
    }

    pub fn with_backend(backend: Arc<dyn TextToImage>, model_id: impl Into<String>) -> Self {
        Self {
            backend,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// One call to the text-to-image backend. No retries.
    pub async fn generate(
        &self,
        prompt: &Prompt,
    ) -> std::result::Result<GeneratedImage, FailureCategory> {
        log::info!("Generating image with model: {}", self.model_id);

        let bytes = {
            let _timer = logger::timer("text_to_image");
            self.backend
                .text_to_image(prompt.as_str(), &self.model_id)
                .await
        };

        let image = bytes
            .and_then(|bytes| {
                GeneratedImage::from_bytes(&bytes)
                    .map_err(|e| InferenceError::Decode(format!("Failed to decode image: {}", e)))
            })
            .map_err(|e| {
                let failure = FailureCategory::from(e);
                log::warn!(
                    "Image generation failed ({}): {}",
                    failure.as_str(),
                    failure.raw_message()
                );
                failure
            })?;

        log::info!(
            "Image generated: {}x{} with {}",
            image.width(),
            image.height(),
            self.model_id
        );

        Ok(image)
    }

    /// Validate raw user input, then [`generate`](Self::generate).
    ///
    /// Blank input fails with `EmptyPrompt` without touching the backend.
    pub async fn generate_from_input(&self, input: &str) -> Result<GeneratedImage> {
        let prompt = Prompt::new(input)?;
        Ok(self.generate(&prompt).await?)
    }
}
