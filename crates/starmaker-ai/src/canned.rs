//! Canned scripts served in simulation mode.

use starmaker_models::{ceil_div, DialogueLine, Genre, Scene, Script};

/// Canned script for a genre name. Unknown genres get the action script.
///
/// Duration is the requested length rounded up to whole minutes (at least one).
pub fn simulated_script(genre: &str, duration_seconds: u32) -> Script {
    let duration = ceil_div(duration_seconds, 60).max(1) * 60;

    match Genre::from_str(genre) {
        Genre::Action => Script {
            title: "The Last Stand".to_string(),
            scenes: vec![
                Scene::new(1, "Hero emerges from shadows, dramatic lighting", 30),
                Scene::new(2, "Intense chase sequence through city streets", 45),
                Scene::new(3, "Climactic showdown with villain", 30),
            ],
            dialogue: vec![
                DialogueLine::new("HERO", "This ends now."),
                DialogueLine::new("VILLAIN", "You think you can stop me?"),
                DialogueLine::new("HERO", "I know I can."),
            ],
            duration,
            raw_text: "Simulated action script...".to_string(),
        },
        Genre::Romance => Script {
            title: "Love in the City".to_string(),
            scenes: vec![
                Scene::new(1, "Chance meeting at coffee shop", 30),
                Scene::new(2, "Romantic walk in the park", 45),
                Scene::new(3, "Emotional confession scene", 30),
            ],
            dialogue: vec![
                DialogueLine::new("LOVER", "I never believed in love at first sight..."),
                DialogueLine::new("BELOVED", "Until now?"),
                DialogueLine::new("LOVER", "Until you."),
            ],
            duration,
            raw_text: "Simulated romance script...".to_string(),
        },
        Genre::Comedy => Script {
            title: "The Great Mishap".to_string(),
            scenes: vec![
                Scene::new(1, "Awkward situation at work", 30),
                Scene::new(2, "Hilarious misunderstanding", 45),
                Scene::new(3, "Happy resolution with laughs", 30),
            ],
            dialogue: vec![
                DialogueLine::new("COMEDIAN", "Well, this is embarrassing..."),
                DialogueLine::new("FRIEND", "You think?"),
                DialogueLine::new("COMEDIAN", "At least it's funny!"),
            ],
            duration,
            raw_text: "Simulated comedy script...".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_genre_has_scenes_and_dialogue() {
        for genre in ["action", "romance", "comedy", "drama", ""] {
            let script = simulated_script(genre, 90);
            assert!(!script.scenes.is_empty(), "{genre} has no scenes");
            assert!(!script.dialogue.is_empty(), "{genre} has no dialogue");
        }
    }

    #[test]
    fn test_unknown_genre_is_action() {
        assert_eq!(simulated_script("horror", 60), simulated_script("action", 60));
        assert_eq!(simulated_script("ROMANCE", 60).title, "Love in the City");
    }

    #[test]
    fn test_duration_does_not_depend_on_genre() {
        for seconds in [1, 59, 60, 61, 300, 601] {
            let expected = simulated_script("action", seconds).duration;
            assert!(expected > 0);
            assert_eq!(expected % 60, 0);
            for genre in ["romance", "comedy", "unknown"] {
                assert_eq!(simulated_script(genre, seconds).duration, expected);
            }
        }
        assert_eq!(simulated_script("action", 61).duration_minutes(), 2);
    }

    #[test]
    fn test_zero_duration_still_positive() {
        assert_eq!(simulated_script("comedy", 0).duration, 60);
    }
}
