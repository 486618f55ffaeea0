use std::fmt::Write as _;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;

use crate::affect::AffectClassifier;
use crate::config::PetCfg;
use crate::dialogue::ChatSession;
use crate::io::input::{self, Command, InputReceiver, InputSender};
use crate::io::output::{self, OutputMessage, OutputReceiver, OutputSender};
use crate::pet::care::{self, ItemOutcome, StatBand};
use crate::pet::{MoodActor, MoodWatch, PetCare};
use crate::progress::{self, ProgressReport};
use crate::types::{DisplayMood, Stat};

/// The companion loop: takes commands, drives the chat session and pet
/// state, and emits output lines. Pet replies are held back by the
/// configured reply delay.
#[derive(Debug)]
pub struct Runtime {
    cfg: Arc<PetCfg>,
    classifier: AffectClassifier,
    session: ChatSession,
    care: PetCare,
    mood: MoodActor,
    rng: StdRng,
    input_rx: InputReceiver,
    output_tx: OutputSender,
    token: CancellationToken,
}

impl Runtime {
    /// Build a runtime for a logged-in user.
    /// Returns the runtime, the command sender, the output receiver and a
    /// watch on the pet's displayed mood.
    pub fn new(
        cfg: Arc<PetCfg>,
        username: &str,
    ) -> (Self, InputSender, OutputReceiver, MoodWatch) {
        let (input_tx, input_rx) = input::channel(cfg.channel_buffer);
        let (output_tx, output_rx) = output::channel(cfg.channel_buffer);
        let (mood, mood_rx) = MoodActor::new(DisplayMood::Happy);
        let runtime = Self {
            session: ChatSession::new(username, &cfg),
            care: PetCare::new(&cfg),
            classifier: AffectClassifier::default(),
            mood,
            rng: StdRng::from_entropy(),
            input_rx,
            output_tx,
            token: CancellationToken::new(),
            cfg,
        };
        (runtime, input_tx, output_rx, mood_rx)
    }

    /// Replace the random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_classifier(mut self, classifier: AffectClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn care(&self) -> &PetCare {
        &self.care
    }

    /// The opening greeting, for the front end to print first.
    pub fn greeting(&self) -> &str {
        self.session.greeting()
    }

    /// Process commands until cancelled, the input closes, or the output
    /// receiver goes away.
    pub async fn run(&mut self) {
        tracing::info!(user = self.session.username(), "petpal runtime started");
        let token = self.token.clone();
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!("shutdown requested, exiting command loop");
                    break;
                }
                cmd = self.input_rx.recv() => {
                    let Some(cmd) = cmd else {
                        tracing::info!("input closed, exiting command loop");
                        break;
                    };
                    if !self.handle(cmd).await {
                        break;
                    }
                }
            }
        }
        tracing::info!(
            messages = self.session.history().len(),
            streak = self.session.streak(),
            "petpal runtime stopped"
        );
    }

    /// Handle one command. Returns false when the loop should stop.
    async fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Say(text) => self.say(&text).await,
            Command::CheckIn => {
                let text = self.session.check_in().text.clone();
                self.emit(OutputMessage::pet(text)).await
            }
            Command::MiniGame => {
                let text = self.session.mini_game().text.clone();
                self.emit(OutputMessage::pet(text)).await
            }
            Command::UseItem(name) => {
                let msg = match self.care.use_item(&name) {
                    Ok(outcome) => OutputMessage::info(describe_outcome(&outcome)),
                    Err(e) => {
                        tracing::warn!(item = %name, error = %e, "item use rejected");
                        OutputMessage::info(format!("⚠️ {e}"))
                    }
                };
                self.emit(msg).await
            }
            Command::RemoveAccessory(name) => {
                let msg = match self.care.remove_accessory(&name) {
                    Ok(accessory) => OutputMessage::info(format!("Took off the {accessory}.")),
                    Err(e) => {
                        tracing::warn!(accessory = %name, error = %e, "accessory removal rejected");
                        OutputMessage::info(format!("⚠️ {e}"))
                    }
                };
                self.emit(msg).await
            }
            Command::CareStatus => {
                let text = care_report(&self.care);
                self.emit(OutputMessage::info(text)).await
            }
            Command::Progress => {
                let text = progress_report(&self.session);
                self.emit(OutputMessage::info(text)).await
            }
            Command::Export => {
                let msg = match self.session.to_json() {
                    Ok(json) => OutputMessage::info(json),
                    Err(e) => {
                        tracing::warn!(error = %e, "transcript export failed");
                        OutputMessage::info(format!("⚠️ export failed: {e}"))
                    }
                };
                self.emit(msg).await
            }
        }
    }

    async fn say(&mut self, text: &str) -> bool {
        let Some(pending) = self.session.submit(text, &self.classifier, &mut self.rng) else {
            return true;
        };
        if !pending.delay.is_zero() {
            tokio::select! {
                _ = self.token.cancelled() => {
                    tracing::debug!("pending reply dropped on shutdown");
                    return false;
                }
                _ = tokio::time::sleep(pending.delay) => {}
            }
        }
        let category = pending.category();
        self.mood.on_classification(&pending.result);
        let reply = self.session.deliver(pending).text.clone();
        self.emit(OutputMessage::reply(reply, category)).await
    }

    async fn emit(&self, msg: OutputMessage) -> bool {
        if self.output_tx.send(msg).await.is_err() {
            tracing::debug!("output receiver dropped");
            return false;
        }
        true
    }

    pub fn cfg(&self) -> &PetCfg {
        &self.cfg
    }
}

fn describe_outcome(outcome: &ItemOutcome) -> String {
    match outcome {
        ItemOutcome::Fed { stat, value } => {
            format!("❤️ Yum! {} is now {value}%.", stat.label())
        }
        ItemOutcome::Wore { accessory, stat: Some(stat), value } => {
            format!("Your pet is wearing the {accessory}! {} is now {value}%.", stat.label())
        }
        ItemOutcome::Wore { accessory, stat: None, .. } => {
            format!("Your pet is wearing the {accessory}!")
        }
        ItemOutcome::AlreadyWorn(accessory) => {
            format!("Your pet is already wearing the {accessory}.")
        }
    }
}

fn care_report(care: &PetCare) -> String {
    let stats = care.stats();
    let mut out = String::from("Pet Status\n");
    for stat in [Stat::Happiness, Stat::Hunger, Stat::Energy] {
        let value = stats.get(stat);
        let marker = match care::band(value) {
            StatBand::High => "🟢",
            StatBand::Medium => "🟡",
            StatBand::Low => "🔴",
        };
        let _ = writeln!(out, "  {marker} {:<10} {value:>3}%", stat.label());
    }
    if !care.accessories().is_empty() {
        let worn: Vec<&str> = care.accessories().iter().map(|a| a.as_str()).collect();
        let _ = writeln!(out, "  Wearing: {}", worn.join(", "));
    }
    let _ = writeln!(out, "  Inventory:");
    for item in care::catalogue() {
        let _ = writeln!(out, "    {} {} ({})", item.icon, item.name, item.id);
    }
    out.push_str(care.status_line());
    out
}

fn progress_report(session: &ChatSession) -> String {
    let week = progress::sample_week();
    let report = ProgressReport::from_entries(&week, session.streak());
    let mut out = String::from("Your Progress\n");
    let _ = writeln!(
        out,
        "  Avg mood {:.1}/10 | Trend {:+}% | Check-ins {} days",
        report.average_mood, report.trend_percent, report.streak
    );
    for entry in &week {
        let _ = writeln!(out, "  {:<7} {:<10} {}", entry.date, entry.label, "▇".repeat(entry.score as usize));
    }
    for insight in report.insights() {
        let _ = writeln!(out, "  • {insight}");
    }
    let today = chrono::Local::now().format("%b %-d, %Y").to_string();
    let recent = progress::summarize_session(session.history(), today)
        .into_iter()
        .chain(progress::sample_history());
    let _ = writeln!(out, "Chat History");
    for chat in recent {
        let _ = writeln!(
            out,
            "  {} {:<13} {} ({} messages)",
            chat.affect.emoji(),
            chat.date,
            chat.snippet,
            chat.message_count
        );
    }
    out.trim_end().to_owned()
}
