//! Typed error for the chat gateway plus the caller-visible status mapping.
//!
//! The core never renders error prose for end users. It returns structured
//! failure information; the caller boundary turns [`AnswerStatus`] into
//! whatever its transport speaks (HTTP statuses, exit codes, ...).

use std::time::Duration;

use llm_service::LlmError;
use rag_core::RagError;
use thiserror::Error;

/// Root error type for the gateway pipeline.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or missing query.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors from the retrieval core (ranking, corpus access).
    #[error(transparent)]
    Rag(#[from] RagError),

    /// Errors from the embedding/generation providers.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The whole generation step (retries included) exceeded its deadline.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
}

/// Caller-visible status categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    /// The query itself was unusable.
    InvalidInput,
    /// Credentials were rejected by a provider.
    Unauthorized,
    /// A provider throttled us; retrying later may help, retrying now won't.
    RateLimited,
    /// Transient unavailability; the caller may retry.
    Unavailable,
    /// Everything else, including internal invariant violations.
    Failed,
}

impl GatewayError {
    /// Map the internal error kind to its caller-visible category.
    ///
    /// `DimensionMismatch` lands in `Failed` on purpose: it is a
    /// programming-error-class condition that should never have reached the
    /// caller boundary, not something a user can act on.
    pub fn status(&self) -> AnswerStatus {
        match self {
            GatewayError::Validation(_) => AnswerStatus::InvalidInput,
            GatewayError::Timeout(_) => AnswerStatus::Unavailable,
            GatewayError::Llm(e) => match e {
                LlmError::Unauthorized => AnswerStatus::Unauthorized,
                LlmError::RateLimited { .. } => AnswerStatus::RateLimited,
                e if e.is_transient() => AnswerStatus::Unavailable,
                _ => AnswerStatus::Failed,
            },
            GatewayError::Rag(_) => AnswerStatus::Failed,
        }
    }
}
