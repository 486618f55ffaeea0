//! Canned reply pools, one per affect category.
//!
//! Pools are authored data: built once, validated at construction, never
//! mutated afterwards.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::AffectCategory;

const SAD_REPLIES: &[&str] = &[
    "I'm here for you. That sounds really tough. Would you like to talk about what's making you feel this way? 💙",
    "I can sense you're going through a hard time. Remember, it's okay to not be okay. I'm here to listen. 🫂",
    "That sounds challenging. You're brave for sharing this with me. How can I support you right now? 💙",
];

const ANXIOUS_REPLIES: &[&str] = &[
    "I hear you. Anxiety can feel overwhelming. Let's take a deep breath together. What's on your mind? 🌸",
    "That sounds stressful. Remember to breathe. Would you like to try a calming mini-game with me? 🌿",
    "I understand. When I feel anxious, I focus on the present moment. What's one thing you can see right now? 💚",
];

const HAPPY_REPLIES: &[&str] = &[
    "Yay! Your happiness makes me so happy too! Tell me more about what's making you feel good! ✨",
    "That's wonderful! I love seeing you this happy! Keep that positive energy going! 🌟",
    "Amazing! Your smile brightens my day! What happened that made you feel this way? 💖",
];

const TIRED_REPLIES: &[&str] = &[
    "Rest is important. Make sure you're taking care of yourself. Have you been getting enough sleep? 😴",
    "Being tired is your body's way of asking for care. Maybe it's time for a break? 💜",
];

const NEUTRAL_REPLIES: &[&str] = &[
    "Thank you for sharing that with me. How did that make you feel? 💭",
    "I'm listening. Tell me more about what's on your mind. 🌸",
    "That's interesting! I'd love to hear more about your day. 💜",
    "I appreciate you opening up to me. What else would you like to talk about? ✨",
];

const MINI_GAME_INVITE: &str =
    "Let's play! Mini-games help reduce stress. How about a quick breathing exercise? Inhale... Exhale... 🌸";

/// First line of every conversation.
pub fn greeting(username: &str) -> String {
    format!("Hi {username}! I'm so happy to see you today! 💜 How are you feeling?")
}

/// Congratulation after a daily check-in.
pub fn check_in_message(streak: u32) -> String {
    format!("Awesome! You've checked in {streak} days in a row! 🎉 Keep up the amazing work!")
}

pub fn mini_game_invite() -> &'static str {
    MINI_GAME_INVITE
}

/// Misconfigured reply data. Raised while building pools, never per call.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AffectConfigError {
    #[error("reply pool for '{0}' is empty")]
    EmptyPool(AffectCategory),
    #[error("no reply pool configured for '{0}'")]
    MissingPool(AffectCategory),
    #[error("duplicate reply pool for '{0}'")]
    DuplicatePool(AffectCategory),
}

/// Ordered, non-empty list of replies for one category.
#[derive(Debug, Clone)]
pub struct ReplyPool {
    category: AffectCategory,
    replies: Vec<String>,
}

impl ReplyPool {
    pub fn new<I, S>(category: AffectCategory, replies: I) -> Result<Self, AffectConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies: Vec<String> = replies.into_iter().map(Into::into).collect();
        if replies.is_empty() {
            return Err(AffectConfigError::EmptyPool(category));
        }
        Ok(Self { category, replies })
    }

    pub fn category(&self) -> AffectCategory {
        self.category
    }

    /// Uniform pick. Each call is an independent draw; repeats are allowed.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Non-empty by construction, so `choose` always yields.
        self.replies
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn contains(&self, reply: &str) -> bool {
        self.replies.iter().any(|r| r == reply)
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.replies.iter().map(String::as_str)
    }
}

/// One validated pool per affect category.
#[derive(Debug, Clone)]
pub struct ReplyBook {
    // Indexed by position in `AffectCategory::ALL`.
    pools: Vec<ReplyPool>,
}

impl ReplyBook {
    /// Build a book from pools. Every category must appear exactly once.
    pub fn new(pools: Vec<ReplyPool>) -> Result<Self, AffectConfigError> {
        let mut slots: Vec<Option<ReplyPool>> = vec![None; AffectCategory::ALL.len()];
        for pool in pools {
            let idx = slot_of(pool.category);
            if slots[idx].is_some() {
                return Err(AffectConfigError::DuplicatePool(pool.category));
            }
            slots[idx] = Some(pool);
        }

        let mut ordered = Vec::with_capacity(slots.len());
        for (slot, category) in slots.into_iter().zip(AffectCategory::ALL) {
            ordered.push(slot.ok_or(AffectConfigError::MissingPool(category))?);
        }
        Ok(Self { pools: ordered })
    }

    pub fn pool(&self, category: AffectCategory) -> &ReplyPool {
        &self.pools[slot_of(category)]
    }
}

impl Default for ReplyBook {
    fn default() -> Self {
        let pool = |category, replies: &[&str]| ReplyPool {
            category,
            replies: replies.iter().map(|r| (*r).to_owned()).collect(),
        };
        Self {
            pools: vec![
                pool(AffectCategory::Sad, SAD_REPLIES),
                pool(AffectCategory::Anxious, ANXIOUS_REPLIES),
                pool(AffectCategory::Happy, HAPPY_REPLIES),
                pool(AffectCategory::Tired, TIRED_REPLIES),
                pool(AffectCategory::Neutral, NEUTRAL_REPLIES),
            ],
        }
    }
}

fn slot_of(category: AffectCategory) -> usize {
    match category {
        AffectCategory::Sad => 0,
        AffectCategory::Anxious => 1,
        AffectCategory::Happy => 2,
        AffectCategory::Tired => 3,
        AffectCategory::Neutral => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn full_set() -> Vec<ReplyPool> {
        AffectCategory::ALL
            .iter()
            .map(|c| ReplyPool::new(*c, [format!("{c} reply")]).unwrap())
            .collect()
    }

    #[test]
    fn default_pool_sizes() {
        let book = ReplyBook::default();
        assert_eq!(book.pool(AffectCategory::Sad).len(), 3);
        assert_eq!(book.pool(AffectCategory::Anxious).len(), 3);
        assert_eq!(book.pool(AffectCategory::Happy).len(), 3);
        assert_eq!(book.pool(AffectCategory::Tired).len(), 2);
        assert_eq!(book.pool(AffectCategory::Neutral).len(), 4);
    }

    #[test]
    fn default_pools_match_their_slot() {
        let book = ReplyBook::default();
        for category in AffectCategory::ALL {
            assert_eq!(book.pool(category).category(), category);
        }
    }

    #[test]
    fn empty_pool_rejected() {
        let err = ReplyPool::new(AffectCategory::Tired, Vec::<String>::new()).unwrap_err();
        assert_eq!(err, AffectConfigError::EmptyPool(AffectCategory::Tired));
    }

    #[test]
    fn missing_pool_rejected() {
        let mut pools = full_set();
        pools.retain(|p| p.category() != AffectCategory::Happy);
        let err = ReplyBook::new(pools).unwrap_err();
        assert_eq!(err, AffectConfigError::MissingPool(AffectCategory::Happy));
    }

    #[test]
    fn duplicate_pool_rejected() {
        let mut pools = full_set();
        pools.push(ReplyPool::new(AffectCategory::Sad, ["again"]).unwrap());
        let err = ReplyBook::new(pools).unwrap_err();
        assert_eq!(err, AffectConfigError::DuplicatePool(AffectCategory::Sad));
    }

    #[test]
    fn custom_book_accepts_any_order() {
        let mut pools = full_set();
        pools.reverse();
        let book = ReplyBook::new(pools).unwrap();
        assert!(book.pool(AffectCategory::Sad).contains("sad reply"));
    }

    #[test]
    fn pick_stays_in_pool_and_covers_it() {
        let pool = ReplyBook::default().pool(AffectCategory::Neutral).clone();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            let reply = pool.pick(&mut rng);
            assert!(pool.contains(reply));
            seen.insert(reply.to_owned());
        }
        assert_eq!(seen.len(), pool.len());
    }

    #[test]
    fn templated_lines() {
        assert!(greeting("demo").starts_with("Hi demo!"));
        assert!(check_in_message(8).contains("8 days in a row"));
        assert!(mini_game_invite().contains("breathing exercise"));
    }
}
