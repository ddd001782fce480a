//! Movie script types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::utils::ceil_div;

/// A movie script, either parsed from model output or taken from the canned set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Script title
    pub title: String,
    /// Scenes in play order (never empty)
    pub scenes: Vec<Scene>,
    /// Dialogue lines in order of appearance
    pub dialogue: Vec<DialogueLine>,
    /// Estimated running time in seconds
    pub duration: u32,
    /// Unparsed script text
    pub raw_text: String,
}

impl Script {
    /// Estimated running time rounded up to whole minutes.
    pub fn duration_minutes(&self) -> u32 {
        ceil_div(self.duration, 60)
    }

    /// Sum of the per-scene duration estimates in seconds.
    pub fn total_scene_duration(&self) -> u32 {
        self.scenes.iter().map(|s| s.duration).sum()
    }

    /// Text to narrate for this script.
    ///
    /// Prefers the raw script; falls back to the joined dialogue when the
    /// raw text is blank.
    pub fn narration_text(&self) -> String {
        if !self.raw_text.trim().is_empty() {
            return self.raw_text.clone();
        }
        self.dialogue
            .iter()
            .map(|d| format!("{}: {}", d.character, d.line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// 1-based position in the script
    pub id: u32,
    /// What happens in the scene
    pub description: String,
    /// Estimated duration in seconds
    pub duration: u32,
}

impl Scene {
    pub fn new(id: u32, description: impl Into<String>, duration: u32) -> Self {
        Self {
            id,
            description: description.into(),
            duration,
        }
    }
}

/// One line of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DialogueLine {
    /// Upper-case character label
    pub character: String,
    pub line: String,
}

impl DialogueLine {
    pub fn new(character: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            line: line.into(),
        }
    }
}

/// Genres with a canned script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Action,
    Romance,
    Comedy,
}

impl Genre {
    /// Parse from string (case-insensitive). Unknown genres map to `Action`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "romance" => Genre::Romance,
            "comedy" => Genre::Comedy,
            _ => Genre::Action,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Romance => "romance",
            Genre::Comedy => "comedy",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
