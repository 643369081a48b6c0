//! Brute-force document ranking.
//!
//! The corpus is small, so ranking is a full scan: score every document,
//! sort once, truncate. There is no early termination — similarity is not
//! monotonic in insertion order — and no index structure; if the corpus ever
//! grows past brute-force territory an ANN index would replace this module
//! wholesale.

use tracing::debug;

use crate::errors::rag_error::RagError;
use crate::similarity::cosine_similarity;
use crate::structs::document::{ScoredDocument, StoredDocument};

/// Score all documents against `query` and return at most `limit` results,
/// sorted by descending similarity.
///
/// Ties keep their corpus order: the sort is stable and no secondary key is
/// used, which makes ranking output deterministic for equal scores.
///
/// # Errors
/// - [`RagError::InvalidLimit`] when `limit == 0`
/// - [`RagError::DimensionMismatch`] when any document's embedding length
///   differs from the query's
pub fn rank_documents(
    query: &[f32],
    documents: &[StoredDocument],
    limit: usize,
) -> Result<Vec<ScoredDocument>, RagError> {
    if limit == 0 {
        return Err(RagError::InvalidLimit);
    }

    let mut scored = Vec::with_capacity(documents.len());
    for document in documents {
        let similarity = cosine_similarity(query, &document.embedding)?;
        scored.push(ScoredDocument {
            document: document.clone(),
            similarity,
        });
    }

    // `sort_by` is stable, so equal scores preserve input order.
    scored.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(limit);

    debug!(
        target: "rag_core::rank",
        corpus = documents.len(),
        returned = scored.len(),
        "rank_documents: done"
    );

    Ok(scored)
}
