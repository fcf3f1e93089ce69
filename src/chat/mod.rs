mod message;
mod session;

pub use message::{ChatMessage, Role};
pub use session::{ChatSession, ChatState, PendingAdvice, FALLBACK_TEXT, GREETING_TEXT};
