//! Lenient parser for free-text screenplays.
//!
//! Model output has no fixed format, so every field has a default:
//!
//! | field    | extraction                                   | default                 |
//! |----------|----------------------------------------------|-------------------------|
//! | title    | first `TITLE:` line                          | `"Your AI Movie"`       |
//! | scenes   | text between `SCENE` / `INT.` / `EXT.` marks | three-scene outline     |
//! | dialogue | `ALL CAPS LABEL: line` lines                 | one `MAIN CHARACTER` line |
//! | duration | `ceil(words / 150)` minutes                  | one minute              |

use std::sync::LazyLock;

use regex::Regex;
use starmaker_models::{ceil_div, word_count, DialogueLine, Scene, Script};

pub const DEFAULT_TITLE: &str = "Your AI Movie";

/// Spoken words per minute used for the whole-script estimate.
const SCRIPT_WORDS_PER_MINUTE: u32 = 150;
/// Words per minute of screen time used for per-scene estimates.
const SCENE_WORDS_PER_MINUTE: u32 = 100;

static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)TITLE[:\s]+(.+)").unwrap());

static SCENE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SCENE|INT\.|EXT\.").unwrap());

static DIALOGUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*([A-Z][A-Z ]*):[ \t]*(\S.*?)[ \t\r]*$").unwrap());

/// Parse model output into a [`Script`].
pub fn parse_script(text: &str) -> Script {
    let scenes = extract_scenes(text);
    let dialogue = extract_dialogue(text);

    Script {
        title: extract_title(text).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        scenes: if scenes.is_empty() { default_scenes() } else { scenes },
        dialogue: if dialogue.is_empty() { default_dialogue() } else { dialogue },
        duration: estimate_duration(text),
        raw_text: text.to_string(),
    }
}

/// First `TITLE` line, trimmed.
pub fn extract_title(text: &str) -> Option<String> {
    TITLE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Split on scene markers, dropping empty fragments.
pub fn extract_scenes(text: &str) -> Vec<Scene> {
    SCENE_MARKER
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .map(|(index, fragment)| {
            Scene::new(index as u32 + 1, fragment, estimate_scene_duration(fragment))
        })
        .collect()
}

/// `LABEL: line` pairs where the label is upper case.
///
/// `TITLE` is metadata, not a speaker, and is skipped.
pub fn extract_dialogue(text: &str) -> Vec<DialogueLine> {
    DIALOGUE_LINE
        .captures_iter(text)
        .filter_map(|caps| {
            let character = caps.get(1)?.as_str().trim();
            let line = caps.get(2)?.as_str().trim();
            if character.is_empty() || character == "TITLE" {
                return None;
            }
            Some(DialogueLine::new(character, line))
        })
        .collect()
}

/// Whole-script running time in seconds, rounded up to whole minutes.
pub fn estimate_duration(text: &str) -> u32 {
    ceil_div(word_count(text), SCRIPT_WORDS_PER_MINUTE).max(1) * 60
}

/// Scene running time in seconds, rounded up to whole minutes.
pub fn estimate_scene_duration(scene: &str) -> u32 {
    ceil_div(word_count(scene), SCENE_WORDS_PER_MINUTE).max(1) * 60
}

pub fn default_scenes() -> Vec<Scene> {
    vec![
        Scene::new(1, "Opening scene with dramatic entrance", 30),
        Scene::new(2, "Middle scene with character development", 45),
        Scene::new(3, "Climactic finale with resolution", 30),
    ]
}

pub fn default_dialogue() -> Vec<DialogueLine> {
    vec![DialogueLine::new("MAIN CHARACTER", "This is my story.")]
}
