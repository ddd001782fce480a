//! Voice cloning and speech synthesis types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default name given to a cloned voice.
pub const DEFAULT_VOICE_NAME: &str = "User Voice";
/// Default voice type for narration tracks.
pub const DEFAULT_VOICE_TYPE: &str = "narrator";
/// Default character name for narration tracks.
pub const DEFAULT_CHARACTER_NAME: &str = "Main Character";

/// A recorded voice sample uploaded for cloning.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioSample {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl AudioSample {
    pub fn wav(data: Vec<u8>) -> Self {
        Self {
            file_name: "voice_sample.wav".to_string(),
            content_type: "audio/wav".to_string(),
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for AudioSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSample")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Reference to synthesized or demo audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AudioResource {
    /// Raw audio returned by a speech provider
    Bytes { data: Vec<u8>, content_type: String },
    /// Remote media URL
    Url(String),
    /// Base64-encoded inline audio
    Base64(String),
}

impl AudioResource {
    pub fn is_empty(&self) -> bool {
        match self {
            AudioResource::Bytes { data, .. } => data.is_empty(),
            AudioResource::Url(url) => url.is_empty(),
            AudioResource::Base64(encoded) => encoded.is_empty(),
        }
    }

    /// Number of bytes (or characters for URL/base64 payloads).
    pub fn len(&self) -> usize {
        match self {
            AudioResource::Bytes { data, .. } => data.len(),
            AudioResource::Url(url) => url.len(),
            AudioResource::Base64(encoded) => encoded.len(),
        }
    }
}

/// Result of a voice-cloning call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCloneResult {
    /// Opaque provider voice id
    pub voice_id: String,
    pub voice_name: String,
    pub success: bool,
}

/// Request for a narration track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoiceTrackRequest {
    /// Text to narrate; required and non-blank
    pub script_text: Option<String>,
    #[serde(default = "default_voice_type")]
    pub voice_type: String,
    #[serde(default = "default_character_name")]
    pub character_name: String,
    /// Cloned voice to speak with; a fresh id is derived when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

fn default_voice_type() -> String {
    DEFAULT_VOICE_TYPE.to_string()
}

fn default_character_name() -> String {
    DEFAULT_CHARACTER_NAME.to_string()
}

impl VoiceTrackRequest {
    pub fn new(script_text: impl Into<String>) -> Self {
        Self {
            script_text: Some(script_text.into()),
            ..Default::default()
        }
    }

    pub fn with_voice_type(mut self, voice_type: impl Into<String>) -> Self {
        self.voice_type = voice_type.into();
        self
    }

    pub fn with_character_name(mut self, character_name: impl Into<String>) -> Self {
        self.character_name = character_name.into();
        self
    }

    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    /// The script text if it is present and non-blank.
    pub fn text(&self) -> Option<&str> {
        self.script_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

impl Default for VoiceTrackRequest {
    fn default() -> Self {
        Self {
            script_text: None,
            voice_type: default_voice_type(),
            character_name: default_character_name(),
            voice_id: None,
        }
    }
}

/// A synthesized narration track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoiceTrack {
    pub voice_id: String,
    pub character_name: String,
    pub audio_data: AudioResource,
    pub success: bool,
}
