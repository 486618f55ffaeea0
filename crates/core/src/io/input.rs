use tokio::sync::mpsc;

/// A request from the front end to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text for the pet.
    Say(String),
    CheckIn,
    MiniGame,
    UseItem(String),
    RemoveAccessory(String),
    CareStatus,
    Progress,
    Export,
}

impl Command {
    /// Parse a REPL line. Lines starting with `/` are commands; anything
    /// else is speech. Returns `None` for an unknown or incomplete command.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Some(Self::Say(line.to_owned()));
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match (name.to_lowercase().as_str(), arg.is_empty()) {
            ("checkin", _) => Some(Self::CheckIn),
            ("game", _) => Some(Self::MiniGame),
            ("use", false) | ("feed", false) => Some(Self::UseItem(arg.to_owned())),
            ("remove", false) => Some(Self::RemoveAccessory(arg.to_owned())),
            ("care", _) | ("status", _) => Some(Self::CareStatus),
            ("progress", _) => Some(Self::Progress),
            ("export", _) => Some(Self::Export),
            _ => None,
        }
    }
}

/// Input channel sender: the front end pushes commands here.
pub type InputSender = mpsc::Sender<Command>;
/// Input channel receiver: the runtime consumes from here.
pub type InputReceiver = mpsc::Receiver<Command>;

/// Create an input channel with the given buffer size.
pub fn channel(buffer: usize) -> (InputSender, InputReceiver) {
    mpsc::channel(buffer)
}

/// Submit user text as speech.
pub async fn submit_text(
    tx: &InputSender,
    text: impl Into<String>,
) -> Result<(), mpsc::error::SendError<Command>> {
    tx.send(Command::Say(text.into())).await
}
