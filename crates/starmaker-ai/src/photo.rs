//! Per-photo feature extraction.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use starmaker_models::{Photo, PhotoFeatureSet};
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::error::AiResult;
use crate::metrics::{names, record_call};
use crate::openai::OpenAiClient;

/// Raw analysis payload. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageAnalysis {
    age: Option<String>,
    gender: Option<String>,
    emotions: Option<Vec<String>>,
    facial_features: Option<Vec<String>>,
    lighting: Option<String>,
    quality: Option<String>,
}

impl ImageAnalysis {
    fn into_features(self, photo_id: &str) -> PhotoFeatureSet {
        PhotoFeatureSet {
            photo_id: photo_id.to_string(),
            age_range: self.age.unwrap_or_else(|| "unknown".to_string()),
            gender: self.gender.unwrap_or_else(|| "unknown".to_string()),
            emotions: self.emotions.unwrap_or_default(),
            facial_features: self.facial_features.unwrap_or_default(),
            lighting: self.lighting.unwrap_or_else(|| "neutral".to_string()),
            quality: self.quality.unwrap_or_else(|| "good".to_string()),
        }
    }
}

/// Extracts coarse feature tags from reference photos.
#[derive(Clone)]
pub struct PhotoAnalysisClient {
    openai: Option<OpenAiClient>,
}

impl PhotoAnalysisClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            openai: OpenAiClient::from_config(config),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.openai.is_some()
    }

    /// One feature set per photo, in input order.
    ///
    /// A photo whose analysis fails gets the canned feature set.
    pub async fn analyze_photos(&self, photos: &[Photo]) -> Vec<PhotoFeatureSet> {
        let Some(openai) = &self.openai else {
            record_call("photo_analysis", "openai", names::OUTCOME_SIMULATED);
            return photos.iter().map(|p| simulated_features(&p.id)).collect();
        };

        let mut results = Vec::with_capacity(photos.len());
        for photo in photos {
            match analyze_one(openai, photo).await {
                Ok(features) => {
                    record_call("photo_analysis", "openai", names::OUTCOME_LIVE);
                    results.push(features);
                }
                Err(e) => {
                    warn!(
                        photo_id = %photo.id,
                        "Photo analysis failed, using canned features: {}", e
                    );
                    record_call("photo_analysis", "openai", names::OUTCOME_FALLBACK);
                    results.push(simulated_features(&photo.id));
                }
            }
        }

        debug!(count = results.len(), "Analyzed photos");
        results
    }
}

async fn analyze_one(openai: &OpenAiClient, photo: &Photo) -> AiResult<PhotoFeatureSet> {
    let image = Part::bytes(photo.data.clone())
        .file_name(photo.file_name.clone())
        .mime_str(&photo.content_type)?;
    let form = Form::new().part("image", image);

    let analysis: ImageAnalysis = openai.post_form("images/analyses", form).await?;
    Ok(analysis.into_features(&photo.id))
}

/// Canned feature set used when analysis is unavailable.
pub fn simulated_features(photo_id: &str) -> PhotoFeatureSet {
    PhotoFeatureSet {
        photo_id: photo_id.to_string(),
        age_range: "25-35".to_string(),
        gender: "unknown".to_string(),
        emotions: vec!["confident".to_string(), "friendly".to_string()],
        facial_features: vec!["clear".to_string(), "well-lit".to_string()],
        lighting: "good".to_string(),
        quality: "high".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_get_defaults() {
        let analysis: ImageAnalysis = serde_json::from_str("{}").unwrap();
        let features = analysis.into_features("p1");
        assert_eq!(features.photo_id, "p1");
        assert_eq!(features.age_range, "unknown");
        assert_eq!(features.gender, "unknown");
        assert!(features.emotions.is_empty());
        assert!(features.facial_features.is_empty());
        assert_eq!(features.lighting, "neutral");
        assert_eq!(features.quality, "good");
    }

    #[test]
    fn test_present_fields_are_kept() {
        let analysis: ImageAnalysis = serde_json::from_str(
            r#"{"age":"40-50","emotions":["calm"],"facial_features":["beard"],"quality":"high"}"#,
        )
        .unwrap();
        let features = analysis.into_features("p2");
        assert_eq!(features.age_range, "40-50");
        assert_eq!(features.emotions, vec!["calm"]);
        assert_eq!(features.facial_features, vec!["beard"]);
        assert_eq!(features.quality, "high");
        assert_eq!(features.lighting, "neutral");
    }

    #[tokio::test]
    async fn test_simulated_preserves_order_and_count() {
        let client = PhotoAnalysisClient::new(&AiConfig::simulated());
        let photos = vec![Photo::jpeg("a", vec![1]), Photo::jpeg("b", vec![2])];

        let features = client.analyze_photos(&photos).await;
        let ids: Vec<&str> = features.iter().map(|f| f.photo_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(features[0].age_range, "25-35");

        assert!(client.analyze_photos(&[]).await.is_empty());
    }
}
