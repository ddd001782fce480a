//! Payment API configuration.

use std::time::Duration;

use starmaker_models::non_blank;

pub const DEFAULT_PAYMENT_API_BASE_URL: &str = "http://localhost:3000";

#[derive(Clone)]
pub struct PaymentConfig {
    /// Secret key for the payment backend; absent means simulation
    pub secret_key: Option<String>,
    pub api_base_url: String,
    /// Pause before a simulated confirmation succeeds
    pub simulation_delay: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            api_base_url: DEFAULT_PAYMENT_API_BASE_URL.to_string(),
            simulation_delay: Duration::from_millis(2000),
            request_timeout: None,
        }
    }
}

impl PaymentConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            secret_key: non_blank(std::env::var("PAYMENT_SECRET_KEY").ok()),
            api_base_url: std::env::var("PAYMENT_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PAYMENT_API_BASE_URL.to_string()),
            simulation_delay: std::env::var("PAYMENT_SIMULATION_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_millis(2000)),
            request_timeout: std::env::var("PAYMENT_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }

    pub fn simulated() -> Self {
        Self::default()
    }

    pub fn with_api(mut self, secret_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.secret_key = non_blank(Some(secret_key.into()));
        self.api_base_url = base_url.into();
        self
    }

    pub fn with_simulation_delay(mut self, delay: Duration) -> Self {
        self.simulation_delay = delay;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    pub(crate) fn http_client(&self) -> reqwest::Client {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("starmaker-payment/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().unwrap_or_default()
    }
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("configured", &self.secret_key.is_some())
            .field("api_base_url", &self.api_base_url)
            .field("simulation_delay", &self.simulation_delay)
            .finish()
    }
}
