//! Video generation.
//!
//! This crate provides:
//! - Per-scene generation across Runway and Pika with a simulated fallback
//! - A shared registry of running jobs with cooperative cancellation
//! - Progress notifications over an explicit channel
//! - Structured job logging

pub mod combine;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod metrics;
pub mod progress;
pub mod prompt;
pub mod provider;
pub mod registry;

pub use combine::{combine_clips, CombinedVideo};
pub use config::VideoConfig;
pub use error::{VideoError, VideoResult};
pub use generator::VideoGenerationClient;
pub use logging::{GenerationMode, JobLogger};
pub use progress::ProgressChannel;
pub use prompt::{build_scene_prompt, DEMO_VIDEO_URLS};
pub use provider::{
    PikaProvider, RunwayProvider, SceneRequest, SimulatedProvider, VideoProvider,
};
pub use registry::{JobRegistry, SyncOutcome};
