//! Screenplay generation via chat completion.

use starmaker_models::{ceil_div, Script};
use tracing::{info, warn};

use crate::canned::simulated_script;
use crate::config::AiConfig;
use crate::error::AiResult;
use crate::metrics::{names, record_call};
use crate::openai::{ChatParams, OpenAiClient};
use crate::script_parser::parse_script;

const SYSTEM_PROMPT: &str = "You are a professional screenwriter specializing in creating \
    engaging, cinematic scripts for AI-generated movies.";

const SCRIPT_PARAMS: ChatParams = ChatParams {
    temperature: 0.8,
    max_tokens: 1000,
};

/// Writes movie scripts, falling back to canned scripts.
#[derive(Clone)]
pub struct ScriptGenerationClient {
    openai: Option<OpenAiClient>,
}

impl ScriptGenerationClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            openai: OpenAiClient::from_config(config),
        }
    }

    /// Whether calls go to the live provider.
    pub fn is_configured(&self) -> bool {
        self.openai.is_some()
    }

    /// Generate a script. Never fails: provider errors yield the canned script.
    pub async fn generate_script(
        &self,
        genre: &str,
        duration_seconds: u32,
        personality: &str,
    ) -> Script {
        let Some(openai) = &self.openai else {
            record_call("script", "openai", names::OUTCOME_SIMULATED);
            return simulated_script(genre, duration_seconds);
        };

        match self
            .request_script(openai, genre, duration_seconds, personality)
            .await
        {
            Ok(script) => {
                record_call("script", "openai", names::OUTCOME_LIVE);
                info!(
                    title = %script.title,
                    scenes = script.scenes.len(),
                    "Generated script"
                );
                script
            }
            Err(e) => {
                warn!(genre = %genre, "Script generation failed, using canned script: {}", e);
                record_call("script", "openai", names::OUTCOME_FALLBACK);
                simulated_script(genre, duration_seconds)
            }
        }
    }

    async fn request_script(
        &self,
        openai: &OpenAiClient,
        genre: &str,
        duration_seconds: u32,
        personality: &str,
    ) -> AiResult<Script> {
        let prompt = build_script_prompt(genre, duration_seconds, personality);
        let text = openai
            .chat_completion(Some(SYSTEM_PROMPT), &prompt, SCRIPT_PARAMS)
            .await?;
        Ok(parse_script(&text))
    }
}

/// Build the screenplay prompt.
pub fn build_script_prompt(genre: &str, duration_seconds: u32, personality: &str) -> String {
    let minutes = ceil_div(duration_seconds, 60).max(1);
    let personality = if personality.trim().is_empty() {
        "General audience"
    } else {
        personality.trim()
    };

    format!(
        r#"Create a {minutes}-minute {genre} movie script with the following requirements:

Genre: {genre}
Duration: {duration_seconds} seconds (approximately {minutes} minutes)
User Personality: {personality}

Requirements:
- Engaging opening scene
- Clear character development
- Dynamic dialogue
- Cinematic action sequences
- Emotional climax
- Satisfying conclusion

Format the script with:
- A TITLE: line
- Scene headings (INT./EXT.) with descriptions
- Character dialogue as CHARACTER: line
- Action directions
- Camera suggestions

Make it suitable for AI video generation with clear visual elements."#
    )
}
