use tokio::sync::mpsc;

use crate::types::{AffectCategory, DisplayMood};

/// What kind of line the front end is receiving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Pet reply to something the user said.
    Reply,
    /// Pet line not tied to classification (check-in, mini-game).
    Pet,
    /// Status, report or error text.
    Info,
}

/// An outbound line to deliver to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMessage {
    pub content: String,
    pub kind: OutputKind,
    pub affect: Option<AffectCategory>,
    pub mood: Option<DisplayMood>,
}

impl OutputMessage {
    pub fn reply(content: impl Into<String>, affect: AffectCategory) -> Self {
        Self {
            content: content.into(),
            kind: OutputKind::Reply,
            affect: Some(affect),
            mood: Some(affect.display_mood()),
        }
    }

    pub fn pet(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: OutputKind::Pet,
            affect: None,
            mood: None,
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: OutputKind::Info,
            affect: None,
            mood: None,
        }
    }
}

/// Output channel sender: the runtime pushes lines here.
pub type OutputSender = mpsc::Sender<OutputMessage>;
/// Output channel receiver: the front end consumes from here.
pub type OutputReceiver = mpsc::Receiver<OutputMessage>;

/// Create an output channel with the given buffer size.
pub fn channel(buffer: usize) -> (OutputSender, OutputReceiver) {
    mpsc::channel(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_carries_affect_and_mood() {
        let msg = OutputMessage::reply("there there", AffectCategory::Tired);
        assert_eq!(msg.kind, OutputKind::Reply);
        assert_eq!(msg.affect, Some(AffectCategory::Tired));
        assert_eq!(msg.mood, Some(DisplayMood::Neutral));
    }

    #[test]
    fn info_message() {
        let msg = OutputMessage::info("status");
        assert_eq!(msg.kind, OutputKind::Info);
        assert!(msg.affect.is_none());
    }

    #[tokio::test]
    async fn channel_send_recv() {
        let (tx, mut rx) = channel(4);
        tx.send(OutputMessage::pet("test")).await.unwrap();
        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.content, "test");
    }
}
