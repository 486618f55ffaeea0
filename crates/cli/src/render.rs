//! Text rendering for the REPL.

use std::fmt::Write as _;

use petpal_core::config::PetCfg;
use petpal_core::io::output::{OutputKind, OutputMessage};
use petpal_core::types::DisplayMood;

pub fn face(mood: DisplayMood) -> &'static str {
    match mood {
        DisplayMood::Happy => "(^ω^)",
        DisplayMood::Neutral => "(・_・)",
        DisplayMood::Sad => "(._.)",
    }
}

/// One output line. A reply carries the mood it produced; other pet lines
/// show whatever mood the pet is currently in.
pub fn line(msg: &OutputMessage, current: DisplayMood) -> String {
    match msg.kind {
        OutputKind::Reply => {
            let face = face(msg.mood.unwrap_or(current));
            match msg.affect {
                Some(affect) => format!("{face} Pet: {}  [detected: {affect}]", msg.content),
                None => format!("{face} Pet: {}", msg.content),
            }
        }
        OutputKind::Pet => format!("{} Pet: {}", face(current), msg.content),
        OutputKind::Info => msg.content.clone(),
    }
}

pub fn mood_line(mood: DisplayMood) -> String {
    format!("{} Your pet is feeling {mood}.", face(mood))
}

/// Typing indicator frame; starts with `\r` to overwrite itself.
pub fn typing_frame(tick: usize) -> String {
    const DOTS: [&str; 4] = [".  ", ".. ", "...", " .."];
    format!("\rPet is typing{}", DOTS[tick % DOTS.len()])
}

pub fn config_table(cfg: &PetCfg) -> String {
    let mut out = String::new();
    for (key, value, description) in cfg.to_entries() {
        let _ = writeln!(out, "  {key:<24} {value:>6}  {description}");
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use petpal_core::io::input::Command;
    use petpal_core::runtime::Runtime;
    use petpal_core::types::AffectCategory;

    use super::*;

    #[test]
    fn reply_uses_its_own_mood() {
        let msg = OutputMessage::reply("there there", AffectCategory::Sad);
        assert_eq!(
            line(&msg, DisplayMood::Happy),
            "(._.) Pet: there there  [detected: sad]"
        );
    }

    #[test]
    fn pet_line_uses_current_mood() {
        let msg = OutputMessage::pet("Let's play!");
        assert_eq!(line(&msg, DisplayMood::Neutral), "(・_・) Pet: Let's play!");
        assert_eq!(line(&msg, DisplayMood::Happy), "(^ω^) Pet: Let's play!");
    }

    #[test]
    fn info_is_plain() {
        assert_eq!(line(&OutputMessage::info("Pet Status"), DisplayMood::Sad), "Pet Status");
    }

    #[test]
    fn typing_frames_cycle() {
        assert_eq!(typing_frame(0), typing_frame(4));
        assert_ne!(typing_frame(0), typing_frame(1));
        assert!(typing_frame(2).starts_with("\rPet is typing"));
    }

    #[test]
    fn config_table_lists_every_entry() {
        let table = config_table(&PetCfg::default());
        assert_eq!(table.lines().count(), PetCfg::default().to_entries().len());
        assert!(table.contains("reply_delay_ms"));
    }

    #[tokio::test]
    async fn check_in_after_sad_reply_keeps_sad_face() {
        let cfg = Arc::new(PetCfg {
            reply_delay_ms: 0,
            ..PetCfg::default()
        });
        let (mut rt, tx, mut rx, mood_rx) = Runtime::new(cfg, "demo");
        tx.send(Command::Say("I feel really sad today".into())).await.unwrap();
        tx.send(Command::CheckIn).await.unwrap();
        drop(tx);
        rt.run().await;

        let reply = rx.recv().await.unwrap();
        let check_in = rx.recv().await.unwrap();
        let current = *mood_rx.borrow();
        assert_eq!(current, DisplayMood::Sad);
        assert!(line(&reply, current).starts_with("(._.) Pet:"));
        assert!(line(&check_in, current).starts_with("(._.) Pet: Awesome!"));
        assert_eq!(mood_line(current), "(._.) Your pet is feeling sad.");
    }
}
