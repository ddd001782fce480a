//! Live-path video generation against mocked providers.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use starmaker_models::{Photo, ProgressEvent, Scene, Script, VideoJobStatus, VideoSettings};
use starmaker_video::{
    JobRegistry, ProgressChannel, VideoConfig, VideoGenerationClient, DEMO_VIDEO_URLS,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

fn script(scene_count: u32) -> Script {
    Script {
        title: "Mock Movie".into(),
        scenes: (1..=scene_count)
            .map(|id| Scene::new(id, format!("Scene {} description", id), 30))
            .collect(),
        dialogue: vec![],
        duration: 60,
        raw_text: String::new(),
    }
}

fn client(config: VideoConfig) -> VideoGenerationClient {
    VideoGenerationClient::new(&config.without_delays(), Arc::new(JobRegistry::new()))
}

fn settings() -> VideoSettings {
    VideoSettings::default()
}

fn generation(url: &str, duration: f64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "video_url": url, "duration": duration }))
}

// =============================================================================
// Provider Precedence
// =============================================================================

#[tokio::test]
async fn test_runway_takes_precedence_over_pika() {
    let runway = MockServer::start().await;
    let pika = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generations"))
        .and(header("authorization", "Bearer rw-key"))
        .respond_with(generation("https://runway.test/clip.mp4", 4.0))
        .expect(2)
        .mount(&runway)
        .await;
    Mock::given(method("POST"))
        .and(path("/generations"))
        .respond_with(generation("https://pika.test/clip.mp4", 3.0))
        .expect(0)
        .mount(&pika)
        .await;

    let client = client(
        VideoConfig::simulated()
            .with_runway("rw-key", runway.uri())
            .with_pika("pk-key", pika.uri()),
    );
    assert!(client.is_live());

    let photos = vec![Photo::jpeg("face", vec![0xFF, 0xD8, 0xFF])];
    let job = client
        .generate_video(&script(2), &photos, None, &settings(), &ProgressChannel::disabled())
        .await;

    assert_eq!(job.status, VideoJobStatus::Completed);
    assert_eq!(job.scenes.len(), 2);
    assert!(job.scenes.iter().all(|c| c.url == "https://runway.test/clip.mp4"));
    assert_eq!(job.video_url.as_deref(), Some("https://runway.test/clip.mp4"));
    assert_eq!(job.duration, Some(8.0));

    let requests = runway.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("gen-3-alpha"));
    assert!(body.contains("16:9"));
    assert!(body.contains("reference_image_0"));
    assert!(body.contains("Create a cinematic action movie scene: Scene 1 description."));
}

#[tokio::test]
async fn test_pika_used_when_runway_fails() {
    let runway = MockServer::start().await;
    let pika = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&runway)
        .await;
    Mock::given(method("POST"))
        .and(path("/generations"))
        .and(header("authorization", "Bearer pk-key"))
        .respond_with(generation("https://pika.test/clip.mp4", 3.0))
        .mount(&pika)
        .await;

    let client = client(
        VideoConfig::simulated()
            .with_runway("rw-key", runway.uri())
            .with_pika("pk-key", pika.uri()),
    );

    let job = client
        .generate_video(&script(1), &[], None, &settings(), &ProgressChannel::disabled())
        .await;

    assert_eq!(job.status, VideoJobStatus::Completed);
    assert_eq!(job.scenes[0].url, "https://pika.test/clip.mp4");

    let requests = pika.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("pika-labs"));
    assert!(!body.contains("aspect_ratio"));
}

#[tokio::test]
async fn test_simulated_clip_when_every_provider_fails() {
    let pika = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generations"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&pika)
        .await;

    let client = client(VideoConfig::simulated().with_pika("pk-key", pika.uri()));
    let job = client
        .generate_video(&script(1), &[], None, &settings(), &ProgressChannel::disabled())
        .await;

    assert_eq!(job.status, VideoJobStatus::Completed);
    assert!(DEMO_VIDEO_URLS.contains(&job.scenes[0].url.as_str()));
    assert_eq!(job.scenes[0].prompt, "Scene 1 description");
    assert_eq!(job.duration, Some(5.0));
}

// =============================================================================
// Job Lifecycle
// =============================================================================

#[tokio::test]
async fn test_live_progress_is_monotonic() {
    let runway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generations"))
        .respond_with(generation("https://runway.test/a.mp4", 5.0))
        .mount(&runway)
        .await;

    let client = client(VideoConfig::simulated().with_runway("rw-key", runway.uri()));
    let (progress, mut rx) = ProgressChannel::new();
    let job = client
        .generate_video(&script(3), &[], None, &settings(), &progress)
        .await;

    assert_eq!(job.progress, 100);

    let mut values = Vec::new();
    while let Ok(ProgressEvent::Video { progress, .. }) = rx.try_recv() {
        values.push(progress);
    }
    assert_eq!(values, vec![33, 66, 100, 100]);
    assert_eq!(client.registry().active_count().await, 0);
}

#[tokio::test]
async fn test_empty_script_fails_job() {
    let runway = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(generation("https://runway.test/a.mp4", 5.0))
        .expect(0)
        .mount(&runway)
        .await;

    let client = client(VideoConfig::simulated().with_runway("rw-key", runway.uri()));
    let (progress, mut rx) = ProgressChannel::new();
    let job = client
        .generate_video(&script(0), &[], None, &settings(), &progress)
        .await;

    assert_eq!(job.status, VideoJobStatus::Failed);
    assert!(job.error_message.unwrap().contains("no clips"));
    assert!(job.video_url.is_none());
    assert_eq!(client.registry().active_count().await, 0);

    match rx.try_recv().unwrap() {
        ProgressEvent::Video { status, .. } => assert_eq!(status, VideoJobStatus::Failed),
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_live_job_between_scenes() {
    let runway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generations"))
        .respond_with(generation("https://runway.test/a.mp4", 5.0))
        .mount(&runway)
        .await;

    let config = VideoConfig {
        scene_delay: Duration::from_millis(300),
        ..VideoConfig::simulated().with_runway("rw-key", runway.uri())
    };
    let client = Arc::new(VideoGenerationClient::new(&config, Arc::new(JobRegistry::new())));
    let (progress, mut rx) = ProgressChannel::new();

    let runner = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .generate_video(&script(3), &[], None, &settings(), &progress)
                .await
        })
    };

    let (job_id, first_progress) = match rx.recv().await {
        Some(ProgressEvent::Video { job_id, progress, .. }) => (job_id, progress),
        other => panic!("unexpected event {:?}", other),
    };
    assert_eq!(first_progress, 33);

    // Status lookup matches the event just received.
    let snapshot = client.get_generation_status(&job_id).await.unwrap();
    assert_eq!(snapshot.progress, first_progress);
    assert_eq!(snapshot.scenes.len(), 1);
    assert_eq!(snapshot.status, VideoJobStatus::Generating);

    assert!(client.cancel_generation(&job_id).await);

    let job = runner.await.unwrap();
    assert_eq!(job.status, VideoJobStatus::Cancelled);
    assert_eq!(job.progress, 33);
    assert_eq!(job.scenes.len(), 1);
    assert!(job.video_url.is_none());

    assert!(client.get_generation_status(&job_id).await.is_none());
    assert_eq!(client.registry().active_count().await, 0);
    assert!(!client.cancel_generation(&job_id).await);
    assert_eq!(runway.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_finished_job_cannot_be_cancelled() {
    let runway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generations"))
        .respond_with(generation("https://runway.test/a.mp4", 5.0))
        .mount(&runway)
        .await;

    let client = client(VideoConfig::simulated().with_runway("rw-key", runway.uri()));
    let job = client
        .generate_video(&script(1), &[], None, &settings(), &ProgressChannel::disabled())
        .await;

    assert_eq!(job.status, VideoJobStatus::Completed);
    assert!(!client.cancel_generation(&job.id).await);
}
