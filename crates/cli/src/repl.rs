use std::io::Write;
use std::time::Duration;

use petpal_core::config::PetCfg;
use petpal_core::io::input::{Command, InputSender};
use petpal_core::io::output::OutputReceiver;
use petpal_core::pet::MoodWatch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::prompt::{Input, Prompter};
use crate::render;

const PROMPT: &str = "You> ";

pub const HELP: &str = "\
Talk to your pet, or use a command:
  /checkin          daily check-in
  /game             play a calming mini-game
  /use <item>       feed or dress up your pet (name or id)
  /remove <acc>     take off an accessory (bow, hat, star)
  /care             pet stats and inventory
  /progress         mood tracking and chat history
  /export           conversation as JSON
  /mood             how your pet is feeling
  /config           current settings
  /help             this list
  /quit             leave";

/// Commands the REPL answers itself, without the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    Help,
    Config,
    Mood,
    Quit,
}

impl LocalCommand {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "/help" | "/?" => Some(Self::Help),
            "/config" => Some(Self::Config),
            "/mood" => Some(Self::Mood),
            "/q" | "/quit" | "/exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Everything the loop needs from the runtime side.
pub struct Session {
    pub cmd_tx: InputSender,
    pub output_rx: OutputReceiver,
    pub mood_rx: MoodWatch,
    pub token: CancellationToken,
}

/// Read lines and print runtime output until the user quits or the
/// token is cancelled. A new prompt is shown only once the previous line
/// has been answered.
pub async fn run(prompter: &mut Prompter, cfg: &PetCfg, session: Session) -> anyhow::Result<()> {
    let Session {
        cmd_tx,
        mut output_rx,
        mood_rx,
        token,
    } = session;

    // Some(tick) while a reply is pending
    let mut typing: Option<usize> = None;
    let mut ticker = tokio::time::interval(Duration::from_millis(150));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    prompter.ask(PROMPT);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick(), if typing.is_some() => {
                let tick = typing.map_or(0, |t| t + 1);
                typing = Some(tick);
                show(&render::typing_frame(tick))?;
            }
            input = prompter.next() => {
                let line = match input {
                    Input::Line(line) => line,
                    Input::Quit => break,
                    Input::Failed(err) => {
                        eprintln!("input error: {err}");
                        break;
                    }
                };
                let text = line.trim();
                if text.is_empty() {
                    prompter.ask(PROMPT);
                    continue;
                }
                if let Some(local) = LocalCommand::parse(text) {
                    match local {
                        LocalCommand::Quit => break,
                        LocalCommand::Help => println!("{HELP}"),
                        LocalCommand::Config => print!("{}", render::config_table(cfg)),
                        LocalCommand::Mood => println!("{}", render::mood_line(*mood_rx.borrow())),
                    }
                    prompter.ask(PROMPT);
                    continue;
                }
                let Some(cmd) = Command::parse(text) else {
                    println!("Unknown command. Type /help for the list.");
                    prompter.ask(PROMPT);
                    continue;
                };
                let speech = matches!(cmd, Command::Say(_));
                if cmd_tx.send(cmd).await.is_err() {
                    break;
                }
                if speech {
                    typing = Some(0);
                    show(&render::typing_frame(0))?;
                }
            }
            msg = output_rx.recv() => {
                let Some(msg) = msg else {
                    break;
                };
                if typing.take().is_some() {
                    show("\r\x1b[2K")?;
                }
                println!("{}", render::line(&msg, *mood_rx.borrow()));
                prompter.ask(PROMPT);
            }
        }
    }

    if typing.is_some() {
        show("\r\x1b[2K")?;
    }
    Ok(())
}

fn show(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_commands() {
        assert_eq!(LocalCommand::parse("/help"), Some(LocalCommand::Help));
        assert_eq!(LocalCommand::parse(" /MOOD "), Some(LocalCommand::Mood));
        assert_eq!(LocalCommand::parse("/exit"), Some(LocalCommand::Quit));
        assert_eq!(LocalCommand::parse("/config"), Some(LocalCommand::Config));
    }

    #[test]
    fn runtime_commands_are_not_local() {
        assert_eq!(LocalCommand::parse("/checkin"), None);
        assert_eq!(LocalCommand::parse("help"), None);
        assert!(Command::parse("/checkin").is_some());
    }

    #[test]
    fn help_lists_local_and_runtime_commands() {
        for cmd in ["/mood", "/config", "/checkin", "/use", "/export"] {
            assert!(HELP.contains(cmd), "{cmd} missing from help");
        }
    }
}
