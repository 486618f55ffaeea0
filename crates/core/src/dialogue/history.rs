use std::collections::VecDeque;

use uuid::Uuid;

use crate::types::{AffectCategory, ChatMessage, Sender};

/// Conversation log with a capacity limit. Oldest messages fall off first.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ConversationHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message, dropping the oldest one when full.
    /// Returns the stored message.
    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        if self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.back()
    }

    pub fn get(&self, id: Uuid) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Up to `limit` most recent messages, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<&ChatMessage> {
        let skip = self.messages.len().saturating_sub(limit);
        self.messages.iter().skip(skip).collect()
    }

    /// Messages written by the user.
    pub fn user_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.sender == Sender::User)
    }

    /// How often each category was detected, in priority order.
    /// Categories never seen are omitted.
    pub fn affect_counts(&self) -> Vec<(AffectCategory, usize)> {
        AffectCategory::ALL
            .iter()
            .map(|c| (*c, self.messages.iter().filter(|m| m.affect == Some(*c)).count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_len() {
        let mut history = ConversationHistory::new(4);
        history.push(ChatMessage::user("a"));
        history.push(ChatMessage::pet("b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().text, "b");
    }

    #[test]
    fn drops_oldest_at_capacity() {
        let mut history = ConversationHistory::new(2);
        history.push(ChatMessage::user("first"));
        history.push(ChatMessage::user("second"));
        history.push(ChatMessage::user("third"));
        assert_eq!(history.len(), 2);
        let texts: Vec<_> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "third"]);
    }

    #[test]
    fn zero_capacity_clamped() {
        let mut history = ConversationHistory::new(0);
        history.push(ChatMessage::user("x"));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let mut history = ConversationHistory::new(8);
        for text in ["a", "b", "c", "d"] {
            history.push(ChatMessage::user(text));
        }
        let tail: Vec<_> = history.recent(2).iter().map(|m| m.text.as_str()).collect();
        assert_eq!(tail, vec!["c", "d"]);
        assert_eq!(history.recent(10).len(), 4);
    }

    #[test]
    fn lookup_by_id() {
        let mut history = ConversationHistory::new(4);
        let msg = ChatMessage::user("find me");
        let id = msg.id;
        history.push(msg);
        assert_eq!(history.get(id).unwrap().text, "find me");
        assert!(history.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn counts_detected_affect() {
        let mut history = ConversationHistory::new(8);
        history.push(ChatMessage::user("sad"));
        history.push(ChatMessage::reply("r1", AffectCategory::Sad));
        history.push(ChatMessage::reply("r2", AffectCategory::Happy));
        history.push(ChatMessage::reply("r3", AffectCategory::Sad));
        assert_eq!(
            history.affect_counts(),
            vec![(AffectCategory::Sad, 2), (AffectCategory::Happy, 1)]
        );
        assert_eq!(history.user_messages().count(), 1);
    }
}
