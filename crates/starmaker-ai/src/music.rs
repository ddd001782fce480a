//! Soundtrack descriptions and lyrics.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use starmaker_models::non_blank;
use tracing::warn;

use crate::config::AiConfig;
use crate::metrics::{names, record_call};
use crate::openai::{ChatParams, OpenAiClient};

const MUSIC_PARAMS: ChatParams = ChatParams {
    temperature: 0.7,
    max_tokens: 1000,
};

static LYRICS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Lyrics?:\s*([\s\S]*?)(?:\n\n|$)").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicRequest {
    pub prompt: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

impl MusicRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicTrack {
    #[serde(rename = "musicDescription")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
}

/// Describes a soundtrack for a movie.
#[derive(Clone)]
pub struct MusicGenerationClient {
    openai: Option<OpenAiClient>,
}

impl MusicGenerationClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            openai: OpenAiClient::from_config(config),
        }
    }

    pub async fn generate_music(&self, request: &MusicRequest) -> MusicTrack {
        let Some(openai) = &self.openai else {
            record_call("music", "openai", names::OUTCOME_SIMULATED);
            return simulated_music(request);
        };

        let prompt = build_music_prompt(request);
        match openai.chat_completion(None, &prompt, MUSIC_PARAMS).await {
            Ok(text) => {
                record_call("music", "openai", names::OUTCOME_LIVE);
                MusicTrack {
                    lyrics: extract_lyrics(&text),
                    description: text,
                }
            }
            Err(e) => {
                warn!("Music generation failed, using canned description: {}", e);
                record_call("music", "openai", names::OUTCOME_FALLBACK);
                simulated_music(request)
            }
        }
    }
}

pub fn build_music_prompt(request: &MusicRequest) -> String {
    let mut prompt = format!("Generate music based on the following prompt: {}\n", request.prompt);
    if let Some(genre) = non_blank(request.genre.clone()) {
        prompt.push_str(&format!("Genre: {}\n", genre));
    }
    if let Some(mood) = non_blank(request.mood.clone()) {
        prompt.push_str(&format!("Mood: {}\n", mood));
    }
    prompt.push_str(
        "\nPlease provide a detailed description of the music and any lyrics if appropriate.",
    );
    prompt
}

/// Text after a `Lyrics:` label up to the next blank line.
pub fn extract_lyrics(text: &str) -> Option<String> {
    LYRICS_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|lyrics| !lyrics.is_empty())
}

fn simulated_music(request: &MusicRequest) -> MusicTrack {
    let genre = non_blank(request.genre.clone()).unwrap_or_else(|| "cinematic".to_string());
    let mood = non_blank(request.mood.clone()).unwrap_or_else(|| "uplifting".to_string());
    MusicTrack {
        description: format!(
            "{} {mood} {genre} score with a slow string build, steady percussion and a \
             soaring theme for the final scene.",
            indefinite_article(&mood)
        ),
        lyrics: None,
    }
}

fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "An",
        _ => "A",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_lyrics_stops_at_blank_line() {
        let text = "A bright pop tune.\n\nLyrics: Run with me\nInto the night\n\nOutro fades.";
        assert_eq!(
            extract_lyrics(text).as_deref(),
            Some("Run with me\nInto the night")
        );
    }

    #[test]
    fn test_extract_lyrics_singular_label_to_end() {
        assert_eq!(extract_lyrics("LYRIC: la la la").as_deref(), Some("la la la"));
        assert_eq!(extract_lyrics("instrumental only"), None);
    }

    #[test]
    fn test_prompt_skips_missing_fields() {
        let prompt = build_music_prompt(&MusicRequest::new("heist theme").with_mood("tense"));
        assert!(prompt.contains("prompt: heist theme"));
        assert!(prompt.contains("Mood: tense"));
        assert!(!prompt.contains("Genre:"));
    }

    #[tokio::test]
    async fn test_simulated_music() {
        let client = MusicGenerationClient::new(&AiConfig::simulated());
        let track = client
            .generate_music(&MusicRequest::new("x").with_genre("jazz"))
            .await;
        assert!(track.description.contains("jazz"));
        assert_eq!(track.lyrics, None);
    }

    #[test]
    fn test_simulated_description_article_follows_mood() {
        let tense = simulated_music(&MusicRequest::new("x").with_mood("tense"));
        assert!(tense.description.starts_with("A tense cinematic score"));

        let eerie = simulated_music(&MusicRequest::new("x").with_mood("eerie"));
        assert!(eerie.description.starts_with("An eerie cinematic score"));

        let default = simulated_music(&MusicRequest::new("x"));
        assert!(default.description.starts_with("An uplifting cinematic score"));
    }
}
