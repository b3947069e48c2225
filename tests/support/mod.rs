#![allow(dead_code)]

use fluxgen::{GeneratedImage, HuggingFaceConfig, ImageRequestHandler};
use image::{DynamicImage, Rgb, RgbImage};

pub const MODEL: &str = "black-forest-labs/FLUX.1-schnell";
pub const TOKEN: &str = "hf_test_token";

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let pixels = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 200]));
    GeneratedImage::new(DynamicImage::ImageRgb8(pixels))
        .to_png()
        .unwrap()
}

pub fn config_for(base_url: &str) -> HuggingFaceConfig {
    HuggingFaceConfig::new()
        .with_token(TOKEN)
        .with_model(MODEL)
        .with_base_url(base_url)
        .with_timeout(5)
}

pub fn build_handler(base_url: &str) -> ImageRequestHandler {
    ImageRequestHandler::new(&config_for(base_url)).unwrap()
}
