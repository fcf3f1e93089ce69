pub mod error;
mod gemini;

use async_trait::async_trait;

pub use error::{AdviceUnavailable, UnavailableCause};
pub use gemini::{GeminiClient, SYSTEM_INSTRUCTION};

/// Turns a free-text listener query into music advice.
///
/// Implementations issue at most one outbound request per call and never
/// retry. Every failure surfaces as [`AdviceUnavailable`]; callers decide
/// what the listener sees instead.
#[async_trait]
pub trait AdviceService: Send + Sync {
    async fn advise(&self, query: &str) -> Result<String, AdviceUnavailable>;
}
