use crate::error::{ImageGenError, Result};
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

pub const PNG_MIME_TYPE: &str = "image/png";

/// Number of prompt characters kept in a download filename.
const FILENAME_PROMPT_CHARS: usize = 30;

/// A prompt that is known to contain something other than whitespace.
///
/// The text is kept exactly as typed; trimming is only used for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ImageGenError::EmptyPrompt);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn caption(&self) -> String {
        format!("Generated: {}", self.0)
    }

    pub fn download_filename(&self) -> String {
        download_filename(&self.0)
    }
}

/// Suggested filename for a downloaded image: `ai_generated_<prompt>.png`,
/// using the first 30 characters of the prompt with spaces turned into
/// underscores.
pub fn download_filename(prompt: &str) -> String {
    let stem: String = prompt
        .chars()
        .take(FILENAME_PROMPT_CHARS)
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!("ai_generated_{}.png", stem)
}

/// A decoded image produced by one generate call.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    image: DynamicImage,
}

impl GeneratedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Decode raw bytes in any supported format (PNG, JPEG, WebP).
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, image::ImageError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn to_png(&self) -> std::result::Result<Vec<u8>, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub image_base64: String, // PNG
    pub mime_type: String,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub model: String,
    pub caption: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sample_image(width: u32, height: u32) -> GeneratedImage {
        let pixels = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
        GeneratedImage::new(DynamicImage::ImageRgb8(pixels))
    }

    #[test]
    fn test_blank_prompts_are_rejected() {
        for text in ["", " ", "\t\n", "   \r\n  "] {
            assert!(matches!(Prompt::new(text), Err(ImageGenError::EmptyPrompt)));
        }
    }

    #[test]
    fn test_prompt_keeps_original_text() {
        let prompt = Prompt::new("  A cat  ").unwrap();
        assert_eq!(prompt.as_str(), "  A cat  ");
        assert_eq!(Prompt::new("A cat").unwrap().caption(), "Generated: A cat");
    }

    #[test]
    fn test_download_filename_short_prompt() {
        assert_eq!(download_filename("A cat"), "ai_generated_A_cat.png");
        assert_eq!(
            Prompt::new("A cat").unwrap().download_filename(),
            "ai_generated_A_cat.png"
        );
    }

    #[test]
    fn test_download_filename_truncates_to_30_chars() {
        let prompt = "abcdefghij".repeat(5);
        assert_eq!(prompt.chars().count(), 50);
        assert_eq!(
            download_filename(&prompt),
            format!("ai_generated_{}.png", &prompt[..30])
        );
    }

    #[test]
    fn test_download_filename_counts_characters_not_bytes() {
        let prompt = "é".repeat(40);
        let expected = format!("ai_generated_{}.png", "é".repeat(30));
        assert_eq!(download_filename(&prompt), expected);
    }

    #[test]
    fn test_png_round_trip_keeps_dimensions() {
        let image = sample_image(64, 48);
        let png = image.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = GeneratedImage::from_bytes(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn test_garbage_bytes_do_not_decode() {
        assert!(GeneratedImage::from_bytes(b"not an image").is_err());
    }
}
