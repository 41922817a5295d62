use std::fmt;

/// Emotion labels the classifier can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprise,
    Fear,
    Disgust,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprise,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Neutral,
    ];

    /// Exact, case-sensitive match on the classifier's label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "happy" => Some(Emotion::Happy),
            "sad" => Some(Emotion::Sad),
            "angry" => Some(Emotion::Angry),
            "surprise" => Some(Emotion::Surprise),
            "fear" => Some(Emotion::Fear),
            "disgust" => Some(Emotion::Disgust),
            "neutral" => Some(Emotion::Neutral),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprise => "surprise",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn mood_word(self) -> &'static str {
        match self {
            Emotion::Happy => "upbeat",
            Emotion::Sad => "sad",
            Emotion::Angry => "rock",
            Emotion::Surprise => "dance",
            Emotion::Fear => "calm",
            Emotion::Disgust => "metal",
            Emotion::Neutral => "lo-fi",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build the search query for an emotion label and a user's preferences.
///
/// Unknown labels fall back to the neutral (lo-fi) query.
pub fn recommend_query(emotion: &str, language: &str, singer: &str) -> String {
    let mood = Emotion::from_label(emotion).unwrap_or(Emotion::Neutral);
    format!("{} {} {} songs", language, singer, mood.mood_word())
}
