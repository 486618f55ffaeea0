use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Affect types ──────────────────────────────────────────────

/// Emotional tone assigned to a single utterance.
/// Exactly one category is produced per classification; `Neutral` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffectCategory {
    Sad,
    Anxious,
    Happy,
    Tired,
    Neutral,
}

impl AffectCategory {
    /// All categories, in classification priority order.
    pub const ALL: [AffectCategory; 5] = [
        Self::Sad,
        Self::Anxious,
        Self::Happy,
        Self::Tired,
        Self::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sad => "sad",
            Self::Anxious => "anxious",
            Self::Happy => "happy",
            Self::Tired => "tired",
            Self::Neutral => "neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sad" => Some(Self::Sad),
            "anxious" => Some(Self::Anxious),
            "happy" => Some(Self::Happy),
            "tired" => Some(Self::Tired),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Coarse projection used to pick the pet's visual state.
    /// No history dependency: any category maps directly.
    pub fn display_mood(&self) -> DisplayMood {
        match self {
            Self::Sad => DisplayMood::Sad,
            Self::Happy => DisplayMood::Happy,
            Self::Anxious | Self::Tired | Self::Neutral => DisplayMood::Neutral,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Sad => "😢",
            Self::Anxious => "😰",
            Self::Tired => "😴",
            Self::Neutral => "😐",
        }
    }
}

impl std::fmt::Display for AffectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-valued mood driving the pet's presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMood {
    #[default]
    Happy,
    Neutral,
    Sad,
}

impl DisplayMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
        }
    }
}

impl std::fmt::Display for DisplayMood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Dialogue types ────────────────────────────────────────────

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Pet,
}

/// One entry in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    /// Detected affect, attached to pet replies as display metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affect: Option<AffectCategory>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::User,
            affect: None,
            timestamp: Utc::now(),
        }
    }

    pub fn pet(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::Pet,
            affect: None,
            timestamp: Utc::now(),
        }
    }

    /// Pet reply carrying the category it answered.
    pub fn reply(text: impl Into<String>, affect: AffectCategory) -> Self {
        Self {
            affect: Some(affect),
            ..Self::pet(text)
        }
    }
}

// ── Pet care types ────────────────────────────────────────────

/// A pet stat bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Happiness,
    /// Displayed as "Fullness": higher is better fed.
    Hunger,
    Energy,
}

impl Stat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happiness => "happiness",
            Self::Hunger => "hunger",
            Self::Energy => "energy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Happiness => "Happiness",
            Self::Hunger => "Fullness",
            Self::Energy => "Energy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Food,
    Accessory,
}

/// Something the pet can wear. At most one of each at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessory {
    Bow,
    Hat,
    Star,
}

impl Accessory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bow => "bow",
            Self::Hat => "hat",
            Self::Star => "star",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bow" => Some(Self::Bow),
            "hat" => Some(Self::Hat),
            "star" => Some(Self::Star),
            _ => None,
        }
    }
}

impl std::fmt::Display for Accessory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mood_projection() {
        assert_eq!(AffectCategory::Sad.display_mood(), DisplayMood::Sad);
        assert_eq!(AffectCategory::Happy.display_mood(), DisplayMood::Happy);
        assert_eq!(AffectCategory::Anxious.display_mood(), DisplayMood::Neutral);
        assert_eq!(AffectCategory::Tired.display_mood(), DisplayMood::Neutral);
        assert_eq!(AffectCategory::Neutral.display_mood(), DisplayMood::Neutral);
    }

    #[test]
    fn category_labels_round_trip() {
        for category in AffectCategory::ALL {
            assert_eq!(AffectCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(AffectCategory::parse(" HAPPY "), Some(AffectCategory::Happy));
        assert_eq!(AffectCategory::parse("angry"), None);
    }

    #[test]
    fn reply_message_carries_affect() {
        let msg = ChatMessage::reply("hi", AffectCategory::Tired);
        assert_eq!(msg.sender, Sender::Pet);
        assert_eq!(msg.affect, Some(AffectCategory::Tired));
        assert!(ChatMessage::user("hello").affect.is_none());
    }

    #[test]
    fn serializes_lowercase_labels() {
        let json = serde_json::to_string(&AffectCategory::Anxious).unwrap();
        assert_eq!(json, "\"anxious\"");
        let json = serde_json::to_string(&ChatMessage::user("x")).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
        assert!(!json.contains("affect"));
    }
}
