//! Generative AI clients.
//!
//! This crate provides:
//! - Screenplay generation and a lenient screenplay parser
//! - Voice cloning and speech synthesis
//! - Photo feature extraction
//! - Soundtrack descriptions
//!
//! Every client falls back to canned output when its provider key is
//! missing or the provider call fails.

pub mod canned;
pub mod config;
pub mod error;
pub mod metrics;
pub mod music;
pub mod openai;
pub mod photo;
pub mod script;
pub mod script_parser;
pub mod voice;

pub use canned::simulated_script;
pub use config::{validate_api_key, AiConfig};
pub use error::{AiError, AiResult};
pub use music::{MusicGenerationClient, MusicRequest, MusicTrack};
pub use photo::PhotoAnalysisClient;
pub use script::ScriptGenerationClient;
pub use script_parser::parse_script;
pub use voice::{VoiceClient, DEMO_MEDIA_URL};
