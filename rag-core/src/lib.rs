//! Retrieval core for the drug-information chat.
//!
//! Public API:
//! - [`structs::document::StoredDocument`] / [`structs::document::ScoredDocument`]: the corpus data model.
//! - [`similarity::cosine_similarity`]: strict-dimension cosine scoring.
//! - [`rank::rank_documents`]: brute-force score-all + stable sort + truncate.
//! - [`store::DocumentStore`]: read-only bulk corpus access, with in-memory
//!   and JSONL-file implementations.

pub mod errors;
pub mod rank;
pub mod similarity;
pub mod store;
pub mod structs;

pub use errors::rag_error::RagError;
pub use rank::rank_documents;
pub use similarity::cosine_similarity;
pub use store::{DocumentStore, InMemoryDocumentStore, JsonlDocumentStore};
pub use structs::document::{ScoredDocument, StoredDocument};
