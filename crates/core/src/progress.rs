//! Progress tracking: mood history, derived stats and conversation summaries.

use serde::{Deserialize, Serialize};

use crate::dialogue::ConversationHistory;
use crate::types::AffectCategory;

/// Mood score at or above which a day counts as positive.
const POSITIVE_DAY_SCORE: u8 = 7;
/// Max snippet length in a conversation summary, in characters.
const SNIPPET_CHARS: usize = 60;

/// One day of mood tracking (score out of 10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: String,
    pub score: u8,
    pub label: String,
}

impl MoodEntry {
    pub fn new(date: impl Into<String>, score: u8, label: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            score: score.min(10),
            label: label.into(),
        }
    }
}

/// Summary line of a past conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub date: String,
    pub snippet: String,
    pub affect: AffectCategory,
    pub message_count: usize,
}

/// Reference week shown before any real tracking exists.
pub fn sample_week() -> Vec<MoodEntry> {
    [
        ("Oct 29", 6, "Neutral"),
        ("Oct 30", 7, "Good"),
        ("Oct 31", 5, "Low"),
        ("Nov 1", 8, "Great"),
        ("Nov 2", 7, "Good"),
        ("Nov 3", 9, "Excellent"),
        ("Nov 4", 8, "Great"),
    ]
    .into_iter()
    .map(|(date, score, label)| MoodEntry::new(date, score, label))
    .collect()
}

/// Reference list of past conversations.
pub fn sample_history() -> Vec<HistorySummary> {
    [
        ("Nov 4, 2025", "I'm feeling really good today! Had a great morning...", AffectCategory::Happy, 12),
        ("Nov 3, 2025", "Feeling a bit stressed about upcoming exams...", AffectCategory::Anxious, 18),
        ("Nov 2, 2025", "Just had a good chat with friends, feeling better...", AffectCategory::Happy, 15),
        ("Nov 1, 2025", "Today was challenging but I'm managing...", AffectCategory::Neutral, 10),
        ("Oct 31, 2025", "Feeling down, need someone to talk to...", AffectCategory::Sad, 20),
    ]
    .into_iter()
    .map(|(date, snippet, affect, message_count)| HistorySummary {
        date: date.to_owned(),
        snippet: snippet.to_owned(),
        affect,
        message_count,
    })
    .collect()
}

/// Aggregates over a run of mood entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub days: usize,
    /// Mean score, 0 when there are no entries.
    pub average_mood: f32,
    /// Percent change from the first to the last score, rounded.
    pub trend_percent: i32,
    pub positive_days: usize,
    pub streak: u32,
}

impl ProgressReport {
    pub fn from_entries(entries: &[MoodEntry], streak: u32) -> Self {
        let days = entries.len();
        let average_mood = if days == 0 {
            0.0
        } else {
            entries.iter().map(|e| e.score as f32).sum::<f32>() / days as f32
        };
        let trend_percent = match (entries.first(), entries.last()) {
            (Some(first), Some(last)) if first.score > 0 => {
                let change = (last.score as f32 - first.score as f32) / first.score as f32;
                (change * 100.0).round() as i32
            }
            _ => 0,
        };
        let positive_days = entries
            .iter()
            .filter(|e| e.score >= POSITIVE_DAY_SCORE)
            .count();
        Self {
            days,
            average_mood,
            trend_percent,
            positive_days,
            streak,
        }
    }

    /// Short human-readable observations.
    pub fn insights(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.days == 0 {
            out.push("No mood entries yet. Check in to start tracking!".to_owned());
            return out;
        }
        let direction = match self.trend_percent {
            t if t > 0 => "improving",
            t if t < 0 => "dipping",
            _ => "steady",
        };
        out.push(format!(
            "Your mood has been {direction}! You've had {} positive days this week.",
            self.positive_days
        ));
        if self.streak > 0 {
            out.push(format!("You've checked in {} days in a row.", self.streak));
        }
        out.push("Talking about your feelings helps! Keep sharing with your pet companion.".to_owned());
        out
    }
}

/// Summarize the live conversation in the same shape as past ones.
/// Returns `None` until the user has said something.
pub fn summarize_session(history: &ConversationHistory, date: impl Into<String>) -> Option<HistorySummary> {
    let first = history.user_messages().next()?;
    let affect = history
        .affect_counts()
        .into_iter()
        // ties resolve to the higher-priority category
        .fold(None::<(AffectCategory, usize)>, |best, (c, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((c, n)),
        })
        .map(|(c, _)| c)
        .unwrap_or(AffectCategory::Neutral);
    Some(HistorySummary {
        date: date.into(),
        snippet: snippet(&first.text),
        affect,
        message_count: history.len(),
    })
}

fn snippet(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= SNIPPET_CHARS {
        return text.to_owned();
    }
    let cut: String = text.chars().take(SNIPPET_CHARS).collect();
    format!("{}...", cut.trim_end())
}
