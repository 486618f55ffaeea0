use std::time::Duration;

use rand::Rng;

use super::history::ConversationHistory;
use crate::affect::{AffectClassifier, ClassificationResult, replies};
use crate::config::PetCfg;
use crate::types::{AffectCategory, ChatMessage};

/// A classified reply waiting to be shown.
/// The caller surfaces it after `delay` via [`ChatSession::deliver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub result: ClassificationResult,
    pub delay: Duration,
}

impl PendingReply {
    pub fn category(&self) -> AffectCategory {
        self.result.category
    }
}

/// One user's chat with the pet: history, streak, greeting.
#[derive(Debug, Clone)]
pub struct ChatSession {
    username: String,
    greeting: String,
    history: ConversationHistory,
    streak: u32,
    reply_delay: Duration,
}

impl ChatSession {
    /// Start a session. The history opens with a greeting addressed to `username`.
    pub fn new(username: impl Into<String>, cfg: &PetCfg) -> Self {
        let username = username.into();
        let greeting = replies::greeting(&username);
        let mut history = ConversationHistory::new(cfg.history_cap);
        history.push(ChatMessage::pet(greeting.clone()));
        Self {
            username,
            greeting,
            history,
            streak: cfg.initial_streak,
            reply_delay: cfg.reply_delay(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The opening line. Kept apart from the history, which may evict it.
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Record a user message and classify it.
    /// Blank input is ignored and returns `None`.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        classifier: &AffectClassifier,
        rng: &mut R,
    ) -> Option<PendingReply> {
        if text.trim().is_empty() {
            return None;
        }
        self.history.push(ChatMessage::user(text));
        let result = classifier.classify(text, rng);
        tracing::debug!(
            user = %self.username,
            category = %result.category,
            "utterance classified"
        );
        Some(PendingReply {
            result,
            delay: self.reply_delay,
        })
    }

    /// Append the pet's reply, tagged with the detected category.
    pub fn deliver(&mut self, pending: PendingReply) -> &ChatMessage {
        let PendingReply { result, .. } = pending;
        self.push(ChatMessage::reply(result.reply, result.category))
    }

    /// Daily check-in: bump the streak and congratulate.
    /// The streak saturates at `u32::MAX`.
    pub fn check_in(&mut self) -> &ChatMessage {
        self.streak = self.streak.saturating_add(1);
        tracing::info!(user = %self.username, streak = self.streak, "daily check-in");
        let text = replies::check_in_message(self.streak);
        self.push(ChatMessage::pet(text))
    }

    /// Invite the user to a breathing exercise.
    pub fn mini_game(&mut self) -> &ChatMessage {
        self.push(ChatMessage::pet(replies::mini_game_invite()))
    }

    /// Transcript as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let messages: Vec<&ChatMessage> = self.history.iter().collect();
        serde_json::to_string_pretty(&serde_json::json!({
            "username": self.username,
            "streak": self.streak,
            "messages": messages,
        }))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.history.push(message)
    }
}
