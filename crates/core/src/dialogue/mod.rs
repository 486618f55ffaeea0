pub mod history;
pub mod session;

pub use history::ConversationHistory;
pub use session::{ChatSession, PendingReply};
