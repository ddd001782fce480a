//! Video provider configuration.

use std::time::Duration;

use starmaker_models::non_blank;

pub const DEFAULT_RUNWAY_BASE_URL: &str = "https://api.runwayml.com/v1";
pub const DEFAULT_PIKA_BASE_URL: &str = "https://api.pika.art/v1";

/// Video provider configuration.
///
/// With neither key set the client runs its stepped simulation.
#[derive(Clone)]
pub struct VideoConfig {
    pub runway_api_key: Option<String>,
    pub runway_base_url: String,
    pub pika_api_key: Option<String>,
    pub pika_base_url: String,
    /// Pause after each generated scene
    pub scene_delay: Duration,
    /// Pause after each simulation step
    pub simulation_step_delay: Duration,
    /// Optional per-request timeout; none by default
    pub request_timeout: Option<Duration>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            runway_api_key: None,
            runway_base_url: DEFAULT_RUNWAY_BASE_URL.to_string(),
            pika_api_key: None,
            pika_base_url: DEFAULT_PIKA_BASE_URL.to_string(),
            scene_delay: Duration::from_millis(1000),
            simulation_step_delay: Duration::from_millis(2000),
            request_timeout: None,
        }
    }
}

impl VideoConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            runway_api_key: non_blank(std::env::var("RUNWAY_API_KEY").ok()),
            runway_base_url: std::env::var("RUNWAY_BASE_URL")
                .unwrap_or(defaults.runway_base_url),
            pika_api_key: non_blank(std::env::var("PIKA_API_KEY").ok()),
            pika_base_url: std::env::var("PIKA_BASE_URL").unwrap_or(defaults.pika_base_url),
            scene_delay: std::env::var("VIDEO_SCENE_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.scene_delay),
            simulation_step_delay: std::env::var("VIDEO_SIMULATION_STEP_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.simulation_step_delay),
            request_timeout: std::env::var("VIDEO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }

    /// Config with no provider keys.
    pub fn simulated() -> Self {
        Self::default()
    }

    pub fn with_runway(mut self, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.runway_api_key = non_blank(Some(api_key.into()));
        self.runway_base_url = base_url.into();
        self
    }

    pub fn with_pika(mut self, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.pika_api_key = non_blank(Some(api_key.into()));
        self.pika_base_url = base_url.into();
        self
    }

    /// Zero out pacing delays.
    pub fn without_delays(mut self) -> Self {
        self.scene_delay = Duration::ZERO;
        self.simulation_step_delay = Duration::ZERO;
        self
    }

    /// True when at least one live provider key is set.
    pub fn is_live(&self) -> bool {
        self.runway_api_key.is_some() || self.pika_api_key.is_some()
    }

    pub(crate) fn http_client(&self) -> reqwest::Client {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("starmaker-video/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().unwrap_or_default()
    }
}

impl std::fmt::Debug for VideoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoConfig")
            .field("runway_configured", &self.runway_api_key.is_some())
            .field("runway_base_url", &self.runway_base_url)
            .field("pika_configured", &self.pika_api_key.is_some())
            .field("pika_base_url", &self.pika_base_url)
            .field("scene_delay", &self.scene_delay)
            .field("simulation_step_delay", &self.simulation_step_delay)
            .finish()
    }
}
