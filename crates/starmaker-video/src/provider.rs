//! Text-to-video provider strategies.
//!
//! Providers are tried in a fixed order. The simulated provider always
//! comes last and never fails, so a chain always yields a clip.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use starmaker_models::{Photo, SceneClip};

use crate::config::VideoConfig;
use crate::error::{VideoError, VideoResult};
use crate::prompt::demo_video_url;

/// Length of a simulated clip in seconds.
pub const SIMULATED_CLIP_SECONDS: f64 = 5.0;

/// Everything a provider needs to render one scene.
#[derive(Debug, Clone)]
pub struct SceneRequest<'a> {
    /// Full generation prompt
    pub prompt: String,
    /// Raw scene description from the script
    pub description: &'a str,
    /// Character reference photos
    pub photos: &'a [Photo],
    pub duration_seconds: u32,
}

/// A text-to-video backend.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Provider name for logging and metrics.
    fn name(&self) -> &'static str;

    /// Whether this provider calls a live API.
    fn is_live(&self) -> bool {
        true
    }

    /// Render one scene.
    async fn attempt(&self, request: &SceneRequest<'_>) -> VideoResult<SceneClip>;
}

/// `POST {base}/generations` response.
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    video_url: String,
    duration: f64,
}

/// Authenticated generation endpoint shared by the live providers.
struct GenerationEndpoint {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GenerationEndpoint {
    fn new(http: Client, api_key: String, base_url: &str) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn generate(&self, form: Form, prompt: &str) -> VideoResult<SceneClip> {
        let url = format!("{}/generations", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VideoError::from_http_status(status.as_u16(), error_text));
        }

        let body: GenerationResponse = response.json().await?;
        Ok(SceneClip {
            url: body.video_url,
            duration: body.duration,
            prompt: prompt.to_string(),
        })
    }
}

/// Common multipart fields plus one image part per photo.
fn generation_form(
    request: &SceneRequest<'_>,
    model: &str,
    image_field_prefix: &str,
) -> VideoResult<Form> {
    let mut form = Form::new()
        .text("prompt", request.prompt.clone())
        .text("model", model.to_string())
        .text("duration", request.duration_seconds.to_string());

    for (index, photo) in request.photos.iter().enumerate() {
        let part = Part::bytes(photo.data.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.content_type)?;
        form = form.part(format!("{}{}", image_field_prefix, index), part);
    }

    Ok(form)
}

/// RunwayML Gen-3.
pub struct RunwayProvider {
    endpoint: GenerationEndpoint,
}

impl RunwayProvider {
    pub const MODEL: &'static str = "gen-3-alpha";

    pub fn new(http: Client, api_key: String, base_url: &str) -> Self {
        Self {
            endpoint: GenerationEndpoint::new(http, api_key, base_url),
        }
    }
}

#[async_trait]
impl VideoProvider for RunwayProvider {
    fn name(&self) -> &'static str {
        "runway"
    }

    async fn attempt(&self, request: &SceneRequest<'_>) -> VideoResult<SceneClip> {
        let form = generation_form(request, Self::MODEL, "reference_image_")?
            .text("aspect_ratio", "16:9");
        self.endpoint.generate(form, &request.prompt).await
    }
}

/// Pika Labs.
pub struct PikaProvider {
    endpoint: GenerationEndpoint,
}

impl PikaProvider {
    pub const MODEL: &'static str = "pika-labs";

    pub fn new(http: Client, api_key: String, base_url: &str) -> Self {
        Self {
            endpoint: GenerationEndpoint::new(http, api_key, base_url),
        }
    }
}

#[async_trait]
impl VideoProvider for PikaProvider {
    fn name(&self) -> &'static str {
        "pika"
    }

    async fn attempt(&self, request: &SceneRequest<'_>) -> VideoResult<SceneClip> {
        let form = generation_form(request, Self::MODEL, "image_")?;
        self.endpoint.generate(form, &request.prompt).await
    }
}

/// Demo clip provider.
#[derive(Debug, Default)]
pub struct SimulatedProvider;

#[async_trait]
impl VideoProvider for SimulatedProvider {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn is_live(&self) -> bool {
        false
    }

    async fn attempt(&self, request: &SceneRequest<'_>) -> VideoResult<SceneClip> {
        Ok(simulated_clip(request.description))
    }
}

pub fn simulated_clip(description: &str) -> SceneClip {
    SceneClip {
        url: demo_video_url().to_string(),
        duration: SIMULATED_CLIP_SECONDS,
        prompt: description.to_string(),
    }
}

/// Providers in precedence order: Runway, Pika, then Simulated.
pub fn provider_chain(config: &VideoConfig) -> Vec<Box<dyn VideoProvider>> {
    let http = config.http_client();
    let mut chain: Vec<Box<dyn VideoProvider>> = Vec::with_capacity(3);

    if let Some(key) = &config.runway_api_key {
        chain.push(Box::new(RunwayProvider::new(
            http.clone(),
            key.clone(),
            &config.runway_base_url,
        )));
    }
    if let Some(key) = &config.pika_api_key {
        chain.push(Box::new(PikaProvider::new(
            http.clone(),
            key.clone(),
            &config.pika_base_url,
        )));
    }
    chain.push(Box::new(SimulatedProvider));

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::DEMO_VIDEO_URLS;

    #[test]
    fn test_chain_order() {
        let names = |config: &VideoConfig| -> Vec<&'static str> {
            provider_chain(config).iter().map(|p| p.name()).collect()
        };

        assert_eq!(names(&VideoConfig::simulated()), vec!["simulated"]);
        assert_eq!(
            names(&VideoConfig::simulated().with_pika("pk", "http://p")),
            vec!["pika", "simulated"]
        );
        assert_eq!(
            names(
                &VideoConfig::simulated()
                    .with_pika("pk", "http://p")
                    .with_runway("rk", "http://r")
            ),
            vec!["runway", "pika", "simulated"]
        );
    }

    #[tokio::test]
    async fn test_simulated_provider_clip() {
        let request = SceneRequest {
            prompt: "full prompt".into(),
            description: "Hero on a rooftop",
            photos: &[],
            duration_seconds: 60,
        };
        let clip = SimulatedProvider.attempt(&request).await.unwrap();
        assert_eq!(clip.prompt, "Hero on a rooftop");
        assert_eq!(clip.duration, SIMULATED_CLIP_SECONDS);
        assert!(DEMO_VIDEO_URLS.contains(&clip.url.as_str()));
        assert!(!SimulatedProvider.is_live());
    }
}
