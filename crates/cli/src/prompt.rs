//! Line input. rustyline blocks, so the editor lives on its own thread and
//! reads exactly one line per request from the async side.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

/// Result of one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C or Ctrl-D at the prompt.
    Quit,
    Failed(String),
}

struct Request {
    prompt: String,
    remember: bool,
}

/// Handle to the reader thread. One `ask` produces one `next`.
pub struct Prompter {
    requests: std::sync::mpsc::Sender<Request>,
    inputs: mpsc::UnboundedReceiver<Input>,
}

impl Prompter {
    pub fn spawn() -> Self {
        let (requests, request_rx) = std::sync::mpsc::channel();
        let (input_tx, inputs) = mpsc::unbounded_channel();
        std::thread::spawn(move || read_lines(request_rx, input_tx));
        Self { requests, inputs }
    }

    /// Show `prompt` and read a line into the editor history.
    pub fn ask(&self, prompt: &str) {
        self.request(prompt, true);
    }

    /// Like [`ask`](Self::ask), but the line is kept out of the history.
    pub fn ask_private(&self, prompt: &str) {
        self.request(prompt, false);
    }

    fn request(&self, prompt: &str, remember: bool) {
        // a closed reader has already reported Quit or Failed
        let _ = self.requests.send(Request {
            prompt: prompt.to_owned(),
            remember,
        });
    }

    /// Next answer. Cancel-safe, so it can sit in a `select!`.
    pub async fn next(&mut self) -> Input {
        self.inputs.recv().await.unwrap_or(Input::Quit)
    }
}

fn read_lines(requests: std::sync::mpsc::Receiver<Request>, inputs: mpsc::UnboundedSender<Input>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            let _ = inputs.send(Input::Failed(e.to_string()));
            return;
        }
    };

    for Request { prompt, remember } in requests {
        let input = match editor.readline(&prompt) {
            Ok(line) => {
                if remember && !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                Input::Line(line)
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Input::Quit,
            Err(e) => Input::Failed(e.to_string()),
        };
        let last = !matches!(input, Input::Line(_));
        if inputs.send(input).is_err() || last {
            break;
        }
    }
}
