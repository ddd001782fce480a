//! AI client configuration.

use std::time::Duration;

use starmaker_models::non_blank;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

/// Credentials and endpoints for the text, image and speech providers.
///
/// A missing key switches that provider's client into simulation mode.
#[derive(Clone)]
pub struct AiConfig {
    /// OpenAI API key (script, music and photo analysis)
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL
    pub openai_base_url: String,
    /// Chat model used for script and music generation
    pub openai_model: String,
    /// ElevenLabs API key (voice cloning and speech)
    pub elevenlabs_api_key: Option<String>,
    /// ElevenLabs API base URL
    pub elevenlabs_base_url: String,
    /// Optional per-request timeout; none by default
    pub request_timeout: Option<Duration>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            elevenlabs_api_key: None,
            elevenlabs_base_url: DEFAULT_ELEVENLABS_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl AiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: non_blank(std::env::var("OPENAI_API_KEY").ok()),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            elevenlabs_api_key: non_blank(std::env::var("ELEVENLABS_API_KEY").ok()),
            elevenlabs_base_url: std::env::var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ELEVENLABS_BASE_URL.to_string()),
            request_timeout: std::env::var("AI_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }

    /// Config with every provider in simulation mode.
    pub fn simulated() -> Self {
        Self::default()
    }

    pub fn with_openai(mut self, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.openai_api_key = non_blank(Some(api_key.into()));
        self.openai_base_url = base_url.into();
        self
    }

    pub fn with_elevenlabs(
        mut self,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        self.elevenlabs_api_key = non_blank(Some(api_key.into()));
        self.elevenlabs_base_url = base_url.into();
        self
    }

    pub fn openai_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }

    pub fn elevenlabs_configured(&self) -> bool {
        self.elevenlabs_api_key.is_some()
    }

    /// Build the shared HTTP client.
    pub(crate) fn http_client(&self) -> reqwest::Client {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("starmaker-ai/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().unwrap_or_default()
    }
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("openai_configured", &self.openai_configured())
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("elevenlabs_configured", &self.elevenlabs_configured())
            .field("elevenlabs_base_url", &self.elevenlabs_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Loose sanity check for API keys pasted into settings.
pub fn validate_api_key(key: &str) -> bool {
    key.trim().len() > 20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_simulated() {
        let config = AiConfig::default();
        assert!(!config.openai_configured());
        assert!(!config.elevenlabs_configured());
        assert_eq!(config.openai_model, "gpt-4");
    }

    #[test]
    fn test_blank_key_stays_unconfigured() {
        let config = AiConfig::default().with_openai("   ", "http://localhost");
        assert!(!config.openai_configured());
    }

    #[test]
    fn test_debug_hides_keys() {
        let config = AiConfig::default().with_openai("sk-secret-value", "http://localhost");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret-value"));
        assert!(rendered.contains("openai_configured: true"));
    }

    #[test]
    fn test_validate_api_key() {
        assert!(!validate_api_key("short"));
        assert!(validate_api_key("sk-0123456789abcdefghijkl"));
    }
}
