//! Studio configuration.

use starmaker_ai::AiConfig;
use starmaker_payment::PaymentConfig;
use starmaker_video::VideoConfig;

/// Credentials and pacing for every client the studio drives.
#[derive(Debug, Clone, Default)]
pub struct StudioConfig {
    pub ai: AiConfig,
    pub video: VideoConfig,
    pub payment: PaymentConfig,
}

impl StudioConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            ai: AiConfig::from_env(),
            video: VideoConfig::from_env(),
            payment: PaymentConfig::from_env(),
        }
    }

    /// Every client in simulation mode.
    pub fn simulated() -> Self {
        Self::default()
    }

    /// Zero every pacing delay.
    pub fn without_delays(mut self) -> Self {
        self.video = self.video.without_delays();
        self.payment = self.payment.with_simulation_delay(std::time::Duration::ZERO);
        self
    }

    /// Names of the providers running live, for startup logs.
    pub fn live_providers(&self) -> Vec<&'static str> {
        let mut live = Vec::new();
        if self.ai.openai_configured() {
            live.push("openai");
        }
        if self.ai.elevenlabs_configured() {
            live.push("elevenlabs");
        }
        if self.video.runway_api_key.is_some() {
            live.push("runway");
        }
        if self.video.pika_api_key.is_some() {
            live.push("pika");
        }
        if self.payment.is_configured() {
            live.push("payments");
        }
        live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_has_no_live_providers() {
        assert!(StudioConfig::simulated().live_providers().is_empty());
    }

    #[test]
    fn test_live_providers_listed_in_order() {
        let mut config = StudioConfig::simulated();
        config.video = config.video.with_pika("pk", "http://localhost");
        config.ai = config.ai.with_openai("sk-abc", "http://localhost");
        assert_eq!(config.live_providers(), vec!["openai", "pika"]);
    }
}
