use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod display;
pub mod history;

/// The closed expression vocabulary the session understands. Declaration
/// order doubles as the tie-break order in [`dominant_emotion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fearful,
    Surprised,
    Disgusted,
    Neutral,
}

impl Emotion {
    pub const VOCABULARY: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fearful,
        Emotion::Surprised,
        Emotion::Disgusted,
        Emotion::Neutral,
    ];

    /// Wire label, as the detector and the backend both spell it.
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fearful => "fearful",
            Emotion::Surprised => "surprised",
            Emotion::Disgusted => "disgusted",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn from_label(label: &str) -> Option<Emotion> {
        Self::VOCABULARY.into_iter().find(|e| e.label() == label)
    }
}

/// One completed detection. Immutable once created; retained only in the
/// session's rolling history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionObservation {
    pub emotion: Emotion,
    /// Probability the classifier assigned to `emotion`, in [0, 1].
    pub confidence: f64,
    pub observed_at: DateTime<Utc>,
}

/// Winning entry of a classifier distribution: the vocabulary label with the
/// strictly greatest probability. Earlier-declared labels win ties, so the
/// result is deterministic. Labels outside the vocabulary are ignored;
/// returns `None` when no vocabulary label is present at all.
pub fn dominant_emotion(expressions: &HashMap<String, f64>) -> Option<(Emotion, f64)> {
    let mut best: Option<(Emotion, f64)> = None;
    for emotion in Emotion::VOCABULARY {
        let Some(&probability) = expressions.get(emotion.label()) else {
            continue;
        };
        match best {
            Some((_, top)) if probability <= top => {}
            _ => best = Some((emotion, probability)),
        }
    }
    best
}
