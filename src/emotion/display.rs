use serde::Serialize;

use super::Emotion;

/// Semantic color bucket the interface maps onto its theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Success,
    Primary,
    Danger,
    Warning,
    Info,
    Secondary,
}

/// How one emotion is presented: icon, color bucket, human label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionDisplay {
    pub emoji: &'static str,
    pub color: ColorCategory,
    pub label: String,
}

/// Total over the vocabulary; every emotion has exactly one presentation.
pub fn display_for(emotion: Emotion) -> EmotionDisplay {
    let (emoji, color, label) = match emotion {
        Emotion::Happy => ("😊", ColorCategory::Success, "Happy"),
        Emotion::Sad => ("😔", ColorCategory::Primary, "Sad"),
        Emotion::Angry => ("😠", ColorCategory::Danger, "Angry"),
        Emotion::Fearful => ("😨", ColorCategory::Warning, "Fearful"),
        Emotion::Surprised => ("😲", ColorCategory::Info, "Surprised"),
        Emotion::Disgusted => ("🤢", ColorCategory::Secondary, "Disgusted"),
        Emotion::Neutral => ("😐", ColorCategory::Secondary, "Neutral"),
    };
    EmotionDisplay {
        emoji,
        color,
        label: label.to_string(),
    }
}

/// Presentation for a raw label string. The classifier is an external
/// component and may emit labels outside the vocabulary; those get the
/// fallback entry with the raw label echoed back.
pub fn display_for_label(label: &str) -> EmotionDisplay {
    match Emotion::from_label(label) {
        Some(emotion) => display_for(emotion),
        None => EmotionDisplay {
            emoji: "❓",
            color: ColorCategory::Secondary,
            label: label.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_exhaustive_over_the_vocabulary() {
        let expected = [
            (Emotion::Happy, "😊", ColorCategory::Success, "Happy"),
            (Emotion::Sad, "😔", ColorCategory::Primary, "Sad"),
            (Emotion::Angry, "😠", ColorCategory::Danger, "Angry"),
            (Emotion::Fearful, "😨", ColorCategory::Warning, "Fearful"),
            (Emotion::Surprised, "😲", ColorCategory::Info, "Surprised"),
            (Emotion::Disgusted, "🤢", ColorCategory::Secondary, "Disgusted"),
            (Emotion::Neutral, "😐", ColorCategory::Secondary, "Neutral"),
        ];
        assert_eq!(expected.len(), Emotion::VOCABULARY.len());
        for (emotion, emoji, color, label) in expected {
            let display = display_for(emotion);
            assert_eq!(display.emoji, emoji);
            assert_eq!(display.color, color);
            assert_eq!(display.label, label);
        }
    }

    #[test]
    fn known_labels_resolve_to_their_entry() {
        assert_eq!(display_for_label("happy"), display_for(Emotion::Happy));
        assert_eq!(display_for_label("neutral"), display_for(Emotion::Neutral));
    }

    #[test]
    fn unknown_labels_get_the_fallback_entry() {
        let display = display_for_label("contempt");
        assert_eq!(display.emoji, "❓");
        assert_eq!(display.color, ColorCategory::Secondary);
        assert_eq!(display.label, "contempt");
    }
}
