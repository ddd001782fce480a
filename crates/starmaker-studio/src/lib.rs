//! Personalized movie generation.
//!
//! Wires the AI, video and payment clients into one pipeline: reference
//! photos and an optional voice sample go in, a script, narration and a
//! video job come out.

pub mod config;
pub mod error;
pub mod studio;

pub use config::StudioConfig;
pub use error::{StudioError, StudioResult};
pub use studio::{MovieRequest, MovieResult, MovieStudio};
