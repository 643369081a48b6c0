//! Unified error type for the rag-core crate.

use thiserror::Error;

/// Errors produced by the retrieval core.
#[derive(Debug, Error)]
pub enum RagError {
    // ── Invariant violations ────────────────────────────────────────────────
    /// Two vectors of different dimensionality were compared. This is a
    /// programming-error-class failure: it means the query embedding and the
    /// corpus were produced by different models, never a user condition.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The ranker was asked for zero results. The limit contract is a
    /// positive integer; zero is rejected loudly instead of returning an
    /// empty list that looks like "no matches".
    #[error("rank limit must be a positive integer")]
    InvalidLimit,

    // ── I/O & filesystem ────────────────────────────────────────────────────
    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // ── JSON / serialization ────────────────────────────────────────────────
    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
