//! Scene prompts and demo media.

use rand::prelude::IndexedRandom;
use starmaker_models::VideoSettings;

/// Demo clips used when no live provider answers.
pub const DEMO_VIDEO_URLS: [&str; 3] = [
    "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_1mb.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
];

/// Pick a demo clip at random.
pub fn demo_video_url() -> &'static str {
    let mut rng = rand::rng();
    DEMO_VIDEO_URLS
        .choose(&mut rng)
        .copied()
        .unwrap_or(DEMO_VIDEO_URLS[0])
}

/// Text-to-video prompt for one scene.
pub fn build_scene_prompt(description: &str, settings: &VideoSettings) -> String {
    let style = if settings.style.trim().is_empty() { "cinematic" } else { settings.style.trim() };
    let genre = if settings.genre.trim().is_empty() { "action" } else { settings.genre.trim() };

    format!(
        "Create a {style} {genre} movie scene: {description}. Cinematic lighting, professional \
         camera work, smooth motion, high quality, detailed, photorealistic, 4K resolution. \
         Style: {style}, Genre: {genre}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_prompt() {
        let settings = VideoSettings {
            duration_seconds: 60,
            style: "noir".into(),
            genre: "comedy".into(),
        };
        let prompt = build_scene_prompt("A cat steals a hat", &settings);
        assert!(prompt.starts_with("Create a noir comedy movie scene: A cat steals a hat."));
        assert!(prompt.ends_with("Style: noir, Genre: comedy"));
    }

    #[test]
    fn test_blank_settings_use_defaults() {
        let settings = VideoSettings {
            duration_seconds: 60,
            style: String::new(),
            genre: " ".into(),
        };
        let prompt = build_scene_prompt("x", &settings);
        assert!(prompt.starts_with("Create a cinematic action movie scene"));
    }

    #[test]
    fn test_demo_url_is_from_pool() {
        for _ in 0..10 {
            assert!(DEMO_VIDEO_URLS.contains(&demo_video_url()));
        }
    }
}
