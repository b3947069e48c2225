use crate::error::{ImageGenError, Result};
use secrecy::SecretString;
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "black-forest-labs/FLUX.1-schnell";
pub const DEFAULT_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub token: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub huggingface: HuggingFaceConfig,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        HuggingFaceConfig {
            token: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_INFERENCE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HuggingFaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        // An empty token counts as absent.
        let token = env::var("HUGGINGFACE_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from);
        let model = env::var("HF_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            env::var("HF_INFERENCE_URL").unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string());
        let timeout_secs = env::var("HF_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        HuggingFaceConfig {
            token,
            model,
            base_url,
            timeout_secs,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API token, or `MissingCredential` when none was configured.
    pub fn require_token(&self) -> Result<&SecretString> {
        self.token.as_ref().ok_or(ImageGenError::MissingCredential)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: None,
            port: None,
            huggingface: HuggingFaceConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = env::var("HOST").ok().filter(|h| !h.is_empty());
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config {
            host,
            port,
            huggingface: HuggingFaceConfig::from_env(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_huggingface(mut self, config: HuggingFaceConfig) -> Self {
        self.huggingface = config;
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    pub fn require_token(&self) -> Result<&SecretString> {
        self.huggingface.require_token()
    }

    pub fn validate(&self) -> Result<()> {
        self.require_token()?;

        if self.huggingface.model.trim().is_empty() {
            return Err(ImageGenError::ConfigError("model id must not be empty".into()));
        }
        if !self.huggingface.base_url.starts_with("http://")
            && !self.huggingface.base_url.starts_with("https://")
        {
            return Err(ImageGenError::ConfigError(format!(
                "inference URL must be http(s): {}",
                self.huggingface.base_url
            )));
        }
        if self.huggingface.timeout_secs == 0 {
            return Err(ImageGenError::ConfigError("timeout must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.huggingface.model, DEFAULT_MODEL);
        assert_eq!(config.huggingface.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_missing_token_is_reported() {
        let config = Config::new();
        assert!(matches!(
            config.require_token(),
            Err(ImageGenError::MissingCredential)
        ));
        assert!(matches!(config.validate(), Err(ImageGenError::MissingCredential)));
    }

    #[test]
    fn test_builders() {
        let config = Config::new()
            .with_host("0.0.0.0")
            .with_port(9000)
            .with_huggingface(
                HuggingFaceConfig::new()
                    .with_token("hf_test")
                    .with_model("stabilityai/sdxl")
                    .with_base_url("http://localhost:1234")
                    .with_timeout(5),
            );

        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 9000));
        assert_eq!(config.require_token().unwrap().expose_secret(), "hf_test");
        assert_eq!(config.huggingface.model, "stabilityai/sdxl");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url_and_timeout() {
        let config = Config::new().with_huggingface(
            HuggingFaceConfig::new()
                .with_token("hf_test")
                .with_base_url("ftp://nope"),
        );
        assert!(matches!(config.validate(), Err(ImageGenError::ConfigError(_))));

        let config = Config::new()
            .with_huggingface(HuggingFaceConfig::new().with_token("hf_test").with_timeout(0));
        assert!(matches!(config.validate(), Err(ImageGenError::ConfigError(_))));
    }

    #[test]
    fn test_token_is_not_printed() {
        let config = HuggingFaceConfig::new().with_token("hf_supersecret");
        assert!(!format!("{:?}", config).contains("hf_supersecret"));
    }
}
