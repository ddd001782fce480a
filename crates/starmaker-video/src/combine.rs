//! Clip combination.
//!
//! No media is re-encoded: the final video points at the first clip and
//! reports the summed clip durations. Voice audio is accepted but not mixed.

use starmaker_models::{AudioResource, SceneClip};

use crate::error::{VideoError, VideoResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedVideo {
    pub url: String,
    /// Seconds
    pub duration: f64,
}

pub fn combine_clips(
    clips: &[SceneClip],
    _voice_audio: Option<&AudioResource>,
) -> VideoResult<CombinedVideo> {
    let first = clips
        .first()
        .ok_or_else(|| VideoError::combine_failed("no clips were generated"))?;

    Ok(CombinedVideo {
        url: first.url.clone(),
        duration: clips.iter().map(|c| c.duration).sum(),
    })
}
