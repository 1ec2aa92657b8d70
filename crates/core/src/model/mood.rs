use serde::{Deserialize, Serialize};
use std::fmt;

use super::language::{BilingualText, Language};

/// Learner mood used to pick a study suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Bored,
    Stressed,
    Neutral,
}

impl Mood {
    /// Every mood tag, in draw order.
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Bored, Mood::Stressed, Mood::Neutral];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Bored => "bored",
            Mood::Stressed => "stressed",
            Mood::Neutral => "neutral",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mood| mood.tag() == tag)
    }

    #[must_use]
    pub fn label(self) -> BilingualText {
        match self {
            Mood::Happy => BilingualText::new("Happy", "மகிழ்ச்சி"),
            Mood::Bored => BilingualText::new("Bored", "சலிப்பு"),
            Mood::Stressed => BilingualText::new("Stressed", "அழுத்தம்"),
            Mood::Neutral => BilingualText::new("Neutral", "நடுநிலை"),
        }
    }

    /// Canned study suggestion for this mood.
    #[must_use]
    pub fn suggestion(self) -> BilingualText {
        match self {
            Mood::Happy => BilingualText::new(
                "You're in a great mood! Try a hard lesson or a new chapter today.",
                "நீங்கள் மகிழ்ச்சியாக இருக்கிறீர்கள்! இன்று கடினமான பாடம் அல்லது புதிய அத்தியாயத்தை முயற்சிக்கவும்.",
            ),
            Mood::Bored => BilingualText::new(
                "Feeling bored? A short quiz or a fun lesson will wake you up.",
                "சலிப்பாக உள்ளதா? ஒரு சிறிய வினாடி வினா அல்லது சுவாரஸ்யமான பாடம் உங்களை உற்சாகப்படுத்தும்.",
            ),
            Mood::Stressed => BilingualText::new(
                "Take it slow. Start with an easy lesson and listen to it aloud.",
                "மெதுவாகச் செல்லுங்கள். எளிய பாடத்துடன் தொடங்கி, அதைக் கேளுங்கள்.",
            ),
            Mood::Neutral => BilingualText::new(
                "A steady day. Continue where you left off with a medium lesson.",
                "சீரான நாள். நிறுத்திய இடத்திலிருந்து ஒரு நடுத்தர பாடத்துடன் தொடருங்கள்.",
            ),
        }
    }

    #[must_use]
    pub fn suggestion_in(self, language: Language) -> String {
        self.suggestion().get(language).to_owned()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
