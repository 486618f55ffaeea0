use tokio::sync::watch;

use crate::affect::ClassificationResult;
use crate::types::DisplayMood;

/// Mood actor: owns the pet's displayed mood and exposes a watch channel.
/// Any mood can follow any other; there are no transition rules.
#[derive(Debug)]
pub struct MoodActor {
    mood: DisplayMood,
    tx: watch::Sender<DisplayMood>,
}

impl MoodActor {
    /// Create a new mood actor.
    /// Returns the actor and a watch receiver for renderers.
    pub fn new(initial: DisplayMood) -> (Self, watch::Receiver<DisplayMood>) {
        let (tx, rx) = watch::channel(initial);
        (Self { mood: initial, tx }, rx)
    }

    fn broadcast(&self) {
        // send only fails once every renderer has gone away
        let _ = self.tx.send(self.mood);
    }

    /// Set the displayed mood. Returns true if it changed.
    pub fn apply(&mut self, mood: DisplayMood) -> bool {
        let changed = self.mood != mood;
        self.mood = mood;
        if changed {
            tracing::debug!(mood = %mood, "pet mood changed");
        }
        self.broadcast();
        changed
    }

    /// Project a classification onto the display.
    pub fn on_classification(&mut self, result: &ClassificationResult) -> bool {
        self.apply(result.display_mood())
    }

    pub fn current(&self) -> DisplayMood {
        self.mood
    }

    /// Extra subscriber, e.g. for a second renderer.
    pub fn subscribe(&self) -> MoodWatch {
        self.tx.subscribe()
    }
}

impl Default for MoodActor {
    fn default() -> Self {
        Self::new(DisplayMood::default()).0
    }
}

/// Shared handle for reading the pet's mood from any task.
pub type MoodWatch = watch::Receiver<DisplayMood>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AffectCategory;

    fn result(category: AffectCategory) -> ClassificationResult {
        ClassificationResult { category, reply: String::new() }
    }

    #[test]
    fn starts_happy_by_default() {
        let actor = MoodActor::default();
        assert_eq!(actor.current(), DisplayMood::Happy);
    }

    #[test]
    fn sad_classification_turns_pet_sad() {
        let (mut actor, rx) = MoodActor::new(DisplayMood::Happy);
        assert!(actor.on_classification(&result(AffectCategory::Sad)));
        assert_eq!(*rx.borrow(), DisplayMood::Sad);
    }

    #[test]
    fn anxious_and_tired_show_neutral() {
        let (mut actor, rx) = MoodActor::new(DisplayMood::Happy);
        actor.on_classification(&result(AffectCategory::Anxious));
        assert_eq!(*rx.borrow(), DisplayMood::Neutral);
        assert!(!actor.on_classification(&result(AffectCategory::Tired)));
        assert_eq!(*rx.borrow(), DisplayMood::Neutral);
    }

    #[test]
    fn any_transition_allowed() {
        let (mut actor, _rx) = MoodActor::new(DisplayMood::Sad);
        assert!(actor.apply(DisplayMood::Happy));
        assert!(actor.apply(DisplayMood::Sad));
        assert!(actor.apply(DisplayMood::Neutral));
    }

    #[test]
    fn survives_dropped_receivers() {
        let (mut actor, rx) = MoodActor::new(DisplayMood::Happy);
        drop(rx);
        actor.apply(DisplayMood::Sad);
        assert_eq!(actor.current(), DisplayMood::Sad);
    }

    #[tokio::test]
    async fn subscriber_sees_change() {
        let (mut actor, _rx) = MoodActor::new(DisplayMood::Happy);
        let mut sub = actor.subscribe();
        actor.apply(DisplayMood::Sad);
        sub.changed().await.unwrap();
        assert_eq!(*sub.borrow(), DisplayMood::Sad);
    }
}
