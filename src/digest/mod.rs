//! Email digest: prompt assembly and the generative-text seam.

pub mod gemini;
pub mod prompt;
pub mod summarizer;

use async_trait::async_trait;

use crate::error::ProviderError;

/// A remote text-generation service. One prompt in, raw text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
