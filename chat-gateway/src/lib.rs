//! RAG chat gateway with a single public entry point.
//!
//! Public API: [`ChatGateway::answer`]. It classifies the query, embeds it
//! when the domain matches, ranks the corpus by cosine similarity, builds a
//! deduplicated context block, selects the grounded or general template,
//! calls the generator with bounded retries, and normalizes the output text.
//!
//! Providers and the document store are injected capabilities
//! ([`llm_service::Embedder`], [`llm_service::Generator`],
//! [`rag_core::DocumentStore`]) so the whole pipeline runs against fakes in
//! tests.

pub mod cfg;
pub mod classify;
pub mod context;
pub mod error;
pub mod normalize;
pub mod prompt;
pub mod retry;

pub use cfg::GatewayConfig;
pub use classify::{KeywordClassifier, QueryKind};
pub use context::{PromptContext, assemble};
pub use error::{AnswerStatus, GatewayError};
pub use prompt::{NO_MATCHES_DISCLAIMER, PromptTemplate};

use std::time::Duration;

use llm_service::{Embedder, Generator};
use rag_core::{DocumentStore, rank_documents};
use tracing::{debug, info};

/// One configured pipeline instance. Cheap to construct; holds no
/// per-request state, so one instance serves concurrent requests.
pub struct ChatGateway<E, G, S> {
    embedder: E,
    generator: G,
    store: S,
    classifier: KeywordClassifier,
    cfg: GatewayConfig,
}

impl<E, G, S> ChatGateway<E, G, S>
where
    E: Embedder,
    G: Generator,
    S: DocumentStore,
{
    /// Wire up a gateway from its collaborators.
    pub fn new(embedder: E, generator: G, store: S, cfg: GatewayConfig) -> Self {
        let classifier = match &cfg.keywords {
            Some(list) => KeywordClassifier::new(list.iter().map(String::as_str)),
            None => KeywordClassifier::default(),
        };
        Self {
            embedder,
            generator,
            store,
            classifier,
            cfg,
        }
    }

    /// Answer one query end-to-end.
    ///
    /// # Errors
    /// [`GatewayError`]; call [`GatewayError::status`] for the caller-visible
    /// category.
    pub async fn answer(&self, query: &str) -> Result<String, GatewayError> {
        // 1) Validate
        let query = query.trim();
        if query.is_empty() {
            return Err(GatewayError::Validation("query must not be empty".into()));
        }

        // 2) Route; the template is fixed for the rest of the request
        let kind = self.classifier.classify(query);
        let template = PromptTemplate::for_query(kind);
        info!(target: "chat_gateway", ?template, "answer: routed query");

        match template {
            PromptTemplate::General => {
                let built = prompt::build_general_prompt(query);
                self.generate_normalized(&built).await
            }
            PromptTemplate::Retrieval => {
                // 3) Embed the query. No retry here: only the generation
                //    step recovers locally, everything else propagates.
                let query_vec = self.embedder.embed(query).await?;

                // 4) Fetch the corpus and rank it brute-force
                let corpus = self.store.fetch_all().await?;
                let ranked = rank_documents(&query_vec, &corpus, self.cfg.top_k)?;

                // 5) Assemble; an empty context takes the explicit
                //    disclaimer path instead of reaching the model
                let context = assemble(&ranked);
                if context.no_matches() {
                    debug!(target: "chat_gateway", "answer: no usable matches, disclaimer path");
                    return Ok(NO_MATCHES_DISCLAIMER.to_string());
                }

                // 6) Grounded prompt + generation
                let built = prompt::build_grounded_prompt(query, &context);
                self.generate_normalized(&built).await
            }
        }
    }

    /// Generation with bounded retries, an overall deadline, and output
    /// normalization.
    async fn generate_normalized(&self, built: &str) -> Result<String, GatewayError> {
        let deadline = Duration::from_secs(self.cfg.generation_timeout_secs);
        let attempts = retry::retry_with_backoff(
            self.cfg.max_attempts,
            Duration::from_millis(self.cfg.initial_backoff_ms),
            || self.generator.generate(built),
        );

        let raw = tokio::time::timeout(deadline, attempts)
            .await
            .map_err(|_| GatewayError::Timeout(deadline))??;

        Ok(normalize::normalize_answer(&raw))
    }
}
