//! End-to-end pipeline runs.

use serde_json::json;
use starmaker_models::{
    AudioResource, AudioSample, Photo, PipelineStage, ProgressEvent, VideoJobStatus,
};
use starmaker_studio::{MovieRequest, MovieStudio, StudioConfig, StudioError};
use starmaker_video::ProgressChannel;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

fn photos() -> Vec<Photo> {
    vec![Photo::jpeg("front", vec![0xFF, 0xD8]), Photo::jpeg("side", vec![0xFF, 0xD8])]
}

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn stages(events: &[ProgressEvent]) -> Vec<PipelineStage> {
    events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Stage { stage } => Some(*stage),
            ProgressEvent::Video { .. } => None,
        })
        .collect()
}

// =============================================================================
// Simulation
// =============================================================================

#[tokio::test]
async fn test_simulated_pipeline_runs_every_stage() {
    let studio = MovieStudio::new(&StudioConfig::simulated().without_delays());
    let (progress, mut rx) = ProgressChannel::new();

    let request = MovieRequest::new(photos(), "romance", 120)
        .with_voice_sample(AudioSample::wav(vec![0; 64]))
        .with_personality("hopeless romantic");
    let result = studio.create_movie(request, &progress).await.unwrap();

    assert_eq!(result.script.title, "Love in the City");
    assert_eq!(result.photo_features.len(), 2);
    assert_eq!(result.photo_features[1].photo_id, "side");

    let clone = result.voice_clone.expect("voice sample was provided");
    assert_eq!(result.voice_track.voice_id, clone.voice_id);
    assert!(!result.voice_track.audio_data.is_empty());

    assert_eq!(result.job.status, VideoJobStatus::Completed);
    assert_eq!(result.job.progress, 100);
    assert_eq!(result.job.title, "Love in the City");

    let events = drain(&mut rx);
    assert_eq!(
        stages(&events),
        vec![
            PipelineStage::AnalyzingPhotos,
            PipelineStage::CloningVoice,
            PipelineStage::WritingScript,
            PipelineStage::SynthesizingVoice,
            PipelineStage::GeneratingVideo,
            PipelineStage::Completed,
        ]
    );

    let video_progress: Vec<u8> = events.iter().filter_map(|e| e.progress()).collect();
    assert!(video_progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(video_progress.last(), Some(&100));

    assert!(studio.job_status(&result.job.id).await.is_none());
}

#[tokio::test]
async fn test_pipeline_without_voice_sample_skips_cloning() {
    let studio = MovieStudio::new(&StudioConfig::simulated().without_delays());
    let (progress, mut rx) = ProgressChannel::new();

    let result = studio
        .create_movie(MovieRequest::new(photos(), "comedy", 60), &progress)
        .await
        .unwrap();

    assert!(result.voice_clone.is_none());
    assert!(result.voice_track.voice_id.starts_with("voice_narrator_"));
    assert!(!stages(&drain(&mut rx)).contains(&PipelineStage::CloningVoice));
}

#[tokio::test]
async fn test_missing_photos_rejected_before_any_stage() {
    let studio = MovieStudio::new(&StudioConfig::simulated().without_delays());
    let (progress, mut rx) = ProgressChannel::new();

    let err = studio
        .create_movie(MovieRequest::new(vec![], "action", 60), &progress)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidArgument(_)));
    assert!(drain(&mut rx).is_empty());

    let err = studio
        .create_movie(MovieRequest::new(photos(), "action", 0), &progress)
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

// =============================================================================
// Live Providers
// =============================================================================

#[tokio::test]
async fn test_live_script_and_video_providers() {
    let openai = MockServer::start().await;
    let runway = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content":
                "TITLE: Ghost Pilot\nEXT. AIRFIELD - DUSK\nA lone plane lands.\nPILOT: I'm home." } }]
        })))
        .mount(&openai)
        .await;
    Mock::given(method("POST"))
        .and(path("/images/analyses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "age": "20-30" })))
        .mount(&openai)
        .await;
    Mock::given(method("POST"))
        .and(path("/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "video_url": "https://runway.test/ghost.mp4",
            "duration": 6
        })))
        .mount(&runway)
        .await;

    let mut config = StudioConfig::simulated().without_delays();
    config.ai = config.ai.with_openai("sk-test-key-0123456789abcdef", openai.uri());
    config.video = config.video.with_runway("rw-key", runway.uri());

    let studio = MovieStudio::new(&config);
    let result = studio
        .create_movie(MovieRequest::new(photos(), "action", 60), &ProgressChannel::disabled())
        .await
        .unwrap();

    assert_eq!(result.script.title, "Ghost Pilot");
    assert!(result.photo_features.iter().all(|f| f.age_range == "20-30"));
    // No speech key: narration is simulated audio.
    assert!(matches!(result.voice_track.audio_data, AudioResource::Base64(_)));

    assert_eq!(result.job.status, VideoJobStatus::Completed);
    assert_eq!(result.job.video_url.as_deref(), Some("https://runway.test/ghost.mp4"));
    assert_eq!(result.job.scenes.len(), result.script.scenes.len());
}
