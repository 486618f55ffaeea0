//! petpal core: the virtual pet companion's logic, free of any UI.
//!
//! The heart is [`affect::AffectClassifier`]: a keyword-priority mood
//! classifier that picks a canned reply for each utterance. Around it sit
//! the conversation session, pet care, accounts, progress reporting and an
//! async runtime that paces replies.

pub mod account;
pub mod affect;
pub mod config;
pub mod dialogue;
pub mod io;
pub mod pet;
pub mod progress;
pub mod runtime;
pub mod types;
