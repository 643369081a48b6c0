//! Gemini provider adapters with a unified, retry-aware error taxonomy.
//!
//! The crate exposes two capability traits, [`Embedder`] and [`Generator`],
//! and one real implementation of both: [`GeminiService`]. Pipelines take
//! the traits as injected dependencies instead of reaching for module-level
//! singletons, so tests can substitute fakes without touching the network.
//!
//! Error policy lives in [`error_handler`]: every upstream failure is folded
//! into [`LlmError`] at the HTTP boundary, and `LlmError::is_transient()` is
//! the only signal the retry layer above consults.

pub mod config;
pub mod error_handler;
pub mod services;

use std::future::Future;

pub use error_handler::LlmError;
pub use services::gemini_service::GeminiService;

/// Text → fixed-length embedding vector.
///
/// Implementations must validate the provider payload: a returned vector is
/// always non-empty and finite, or the call fails with
/// [`LlmError::InvalidResponse`].
pub trait Embedder: Send + Sync {
    /// Embed one text into a numeric vector.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, LlmError>> + Send;
}

/// Structured prompt → free-text completion.
pub trait Generator: Send + Sync {
    /// Generate a completion for the given prompt.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}

impl Embedder for GeminiService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.embed_text(text).await
    }
}

impl Generator for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.generate_text(prompt).await
    }
}
