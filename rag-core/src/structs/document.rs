//! Corpus data model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One reference document in the corpus, created offline by ingestion and
/// read-only during serving.
///
/// `metadata` carries the structured drug-label attributes (generic name,
/// active ingredients, dosage form, ...) keyed by ingestion field names; the
/// context assembler owns the mapping from those keys to output labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Stable document id from the ingestion process.
    pub id: String,

    /// Display title, usually the trade name.
    pub title: String,

    /// Flattened label text used both for embedding and as prompt content.
    pub content: String,

    /// Precomputed embedding vector. All documents in one corpus share the
    /// same dimensionality; the similarity layer enforces it.
    pub embedding: Vec<f32>,

    /// String attributes of the label. Keys are unique; order is irrelevant.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A stored document plus its per-query similarity. Transient: computed
/// per request, never persisted.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: StoredDocument,
    /// Cosine similarity to the query, in `[-1, 1]`.
    pub similarity: f32,
}
