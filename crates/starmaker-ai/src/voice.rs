//! ElevenLabs voice cloning and text-to-speech.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use starmaker_models::{
    unix_millis, AudioResource, AudioSample, VoiceCloneResult, VoiceTrack, VoiceTrackRequest,
};
use tracing::{info, warn};

use crate::config::AiConfig;
use crate::error::{AiError, AiResult};
use crate::metrics::{names, record_call};

/// Demo media returned when speech synthesis is unavailable.
pub const DEMO_MEDIA_URL: &str = "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_1mb.mp4";

const TTS_MODEL_ID: &str = "eleven_monolingual_v1";
const CLONE_DESCRIPTION: &str = "User voice for movie generation";
const SIMULATED_CLONE_NAME: &str = "User Voice Clone";

/// Text-to-speech request body.
#[derive(Debug, Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

const VOICE_SETTINGS: VoiceSettings = VoiceSettings {
    stability: 0.5,
    similarity_boost: 0.75,
};

/// Voice creation response.
#[derive(Debug, Deserialize)]
struct AddVoiceResponse {
    voice_id: String,
}

struct ElevenLabs {
    http: Client,
    api_key: String,
    base_url: String,
}

/// Voice cloning and speech synthesis with simulation fallback.
pub struct VoiceClient {
    elevenlabs: Option<ElevenLabs>,
}

impl VoiceClient {
    pub fn new(config: &AiConfig) -> Self {
        let elevenlabs = config.elevenlabs_api_key.clone().map(|api_key| ElevenLabs {
            http: config.http_client(),
            api_key,
            base_url: config.elevenlabs_base_url.trim_end_matches('/').to_string(),
        });
        Self { elevenlabs }
    }

    pub fn is_configured(&self) -> bool {
        self.elevenlabs.is_some()
    }

    /// Clone a voice from a recorded sample.
    ///
    /// Never reports failure: provider errors yield a simulated voice id.
    pub async fn clone_voice(&self, sample: &AudioSample, voice_name: &str) -> VoiceCloneResult {
        let Some(elevenlabs) = &self.elevenlabs else {
            record_call("voice_clone", "elevenlabs", names::OUTCOME_SIMULATED);
            return simulated_clone();
        };

        match elevenlabs.add_voice(sample, voice_name).await {
            Ok(voice_id) => {
                record_call("voice_clone", "elevenlabs", names::OUTCOME_LIVE);
                info!(voice_id = %voice_id, "Cloned voice");
                VoiceCloneResult {
                    voice_id,
                    voice_name: voice_name.to_string(),
                    success: true,
                }
            }
            Err(e) => {
                warn!("Voice cloning failed, using simulated voice: {}", e);
                record_call("voice_clone", "elevenlabs", names::OUTCOME_FALLBACK);
                simulated_clone()
            }
        }
    }

    /// Synthesize speech. Falls back to the demo media URL.
    pub async fn synthesize_speech(&self, text: &str, voice_id: &str) -> AudioResource {
        let Some(elevenlabs) = &self.elevenlabs else {
            record_call("speech", "elevenlabs", names::OUTCOME_SIMULATED);
            return AudioResource::Url(DEMO_MEDIA_URL.to_string());
        };

        match elevenlabs.text_to_speech(text, voice_id).await {
            Ok(audio) => {
                record_call("speech", "elevenlabs", names::OUTCOME_LIVE);
                audio
            }
            Err(e) => {
                warn!(voice_id = %voice_id, "Speech synthesis failed, using demo audio: {}", e);
                record_call("speech", "elevenlabs", names::OUTCOME_FALLBACK);
                AudioResource::Url(DEMO_MEDIA_URL.to_string())
            }
        }
    }

    /// Produce a narration track for script text.
    ///
    /// Blank or missing text is rejected before any provider or fallback logic.
    pub async fn generate_voice_track(&self, request: &VoiceTrackRequest) -> AiResult<VoiceTrack> {
        let text = request.text().ok_or_else(|| {
            AiError::invalid_argument("Script text is required and must be a non-empty string")
        })?;

        let voice_id = request
            .voice_id
            .clone()
            .unwrap_or_else(|| format!("voice_{}_{}", request.voice_type, unix_millis()));

        if !self.is_configured() {
            record_call("voice_track", "elevenlabs", names::OUTCOME_SIMULATED);
            return Ok(simulated_track(voice_id, &request.character_name));
        }

        let audio_data = self.synthesize_speech(text, &voice_id).await;
        Ok(VoiceTrack {
            voice_id,
            character_name: request.character_name.clone(),
            audio_data,
            success: true,
        })
    }
}

impl ElevenLabs {
    async fn add_voice(&self, sample: &AudioSample, voice_name: &str) -> AiResult<String> {
        let url = format!("{}/voices/add", self.base_url);

        let file = Part::bytes(sample.data.clone())
            .file_name("voice_sample.wav")
            .mime_str(&sample.content_type)?;
        let form = Form::new()
            .text("name", voice_name.to_string())
            .part("files", file)
            .text("description", CLONE_DESCRIPTION);

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AiError::from_http_status(status.as_u16(), error_text));
        }

        let body: AddVoiceResponse = response
            .json()
            .await
            .map_err(|e| AiError::parse_error(format!("Failed to parse voice response: {}", e)))?;
        Ok(body.voice_id)
    }

    async fn text_to_speech(&self, text: &str, voice_id: &str) -> AiResult<AudioResource> {
        let url = format!("{}/text-to-speech/{}", self.base_url, voice_id);

        let request = TextToSpeechRequest {
            text,
            model_id: TTS_MODEL_ID,
            voice_settings: VOICE_SETTINGS,
        };

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AiError::from_http_status(status.as_u16(), error_text));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();
        let data = response.bytes().await?.to_vec();
        if data.is_empty() {
            return Err(AiError::parse_error("Speech response had no audio"));
        }

        Ok(AudioResource::Bytes { data, content_type })
    }
}

fn simulated_clone() -> VoiceCloneResult {
    VoiceCloneResult {
        voice_id: format!("simulated_voice_{}", unix_millis()),
        voice_name: SIMULATED_CLONE_NAME.to_string(),
        success: true,
    }
}

fn simulated_track(voice_id: String, character_name: &str) -> VoiceTrack {
    VoiceTrack {
        voice_id,
        character_name: character_name.to_string(),
        audio_data: AudioResource::Base64(BASE64.encode(silent_wav(250))),
        success: true,
    }
}

/// 8 kHz, 8-bit mono WAV of silence.
fn silent_wav(duration_ms: u32) -> Vec<u8> {
    const SAMPLE_RATE: u32 = 8000;
    let samples = SAMPLE_RATE * duration_ms / 1000;

    let mut wav = Vec::with_capacity(44 + samples as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + samples).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes()); // byte rate
    wav.extend_from_slice(&1u16.to_le_bytes()); // block align
    wav.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&samples.to_le_bytes());
    wav.resize(44 + samples as usize, 0x80);
    wav
}
