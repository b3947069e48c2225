use crate::config::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

/// What the page sidebar shows about the configured model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub description: String,
    pub tips: Vec<String>,
    pub example_prompts: Vec<String>,
}

const TIPS: [&str; 4] = [
    "Be specific and descriptive",
    "Include style, mood, and details",
    "Mention lighting and colors",
    "Specify art style if desired",
];

const EXAMPLE_PROMPTS: [&str; 4] = [
    "A serene lake at sunset, oil painting style, warm colors",
    "A futuristic city at night, cyberpunk style, neon lights",
    "A cute cat wearing a wizard hat, digital art, detailed",
    "Mountain landscape with aurora borealis, photorealistic",
];

impl ModelInfo {
    pub fn for_model(model_id: &str) -> Self {
        let (provider, name) = model_id.split_once('/').unwrap_or(("huggingface", model_id));

        let description = if model_id == DEFAULT_MODEL {
            "FLUX.1-schnell is a fast, high-quality image generation model by Black Forest Labs."
                .to_string()
        } else {
            format!("{} text-to-image model served by the HuggingFace inference API.", name)
        };

        Self {
            id: model_id.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
            description,
            tips: TIPS.iter().map(|t| t.to_string()).collect(),
            example_prompts: EXAMPLE_PROMPTS.iter().map(|p| p.to_string()).collect(),
        }
    }
}
