//! Read-only document store contract and file-backed implementation.
//!
//! Serving only ever needs a bulk fetch of the whole corpus; creation and
//! deletion belong to the offline ingestion process and have no API here.
//!
//! # Why no persistent handle/cursor type?
//! Corpora are small and fetched once per request. Stateless bulk reads keep
//! call sites simple; a caching layer would be an extension on top of this
//! trait, not a change to it.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::errors::rag_error::RagError;
use crate::structs::document::StoredDocument;

/// Read-only bulk access to the corpus.
pub trait DocumentStore: Send + Sync {
    /// Fetch every stored document.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<StoredDocument>, RagError>> + Send;
}

/// `Vec`-backed store for tests and embedded corpora.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Vec<StoredDocument>,
}

impl InMemoryDocumentStore {
    pub fn new(documents: Vec<StoredDocument>) -> Self {
        Self { documents }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    async fn fetch_all(&self) -> Result<Vec<StoredDocument>, RagError> {
        Ok(self.documents.clone())
    }
}

/// Store reading one JSON-encoded [`StoredDocument`] per line.
///
/// Lines that fail to parse are **skipped** so one corrupt record cannot
/// take the whole corpus offline; skips are logged at debug level.
#[derive(Debug, Clone)]
pub struct JsonlDocumentStore {
    path: PathBuf,
}

impl JsonlDocumentStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentStore for JsonlDocumentStore {
    async fn fetch_all(&self) -> Result<Vec<StoredDocument>, RagError> {
        let file = File::open(&self.path).await?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let mut out = Vec::new();
        let mut skipped = 0usize;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StoredDocument>(&line) {
                Ok(doc) => out.push(doc),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(
                target: "rag_core::store",
                skipped,
                "fetch_all: skipped malformed jsonl lines"
            );
        }

        Ok(out)
    }
}
