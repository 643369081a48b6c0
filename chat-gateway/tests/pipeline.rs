//! End-to-end pipeline scenarios against in-process fakes.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chat_gateway::{AnswerStatus, ChatGateway, GatewayConfig, GatewayError, NO_MATCHES_DISCLAIMER};
use llm_service::{Embedder, Generator, LlmError};
use rag_core::{DocumentStore, RagError, StoredDocument};

/* ------------------------------- fakes -------------------------------- */

/// Always returns the same vector; counts calls.
#[derive(Clone)]
struct FixedEmbedder {
    vector: Vec<f32>,
    calls: Arc<AtomicU32>,
}

impl FixedEmbedder {
    fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector.clone())
    }
}

/// Fails every call the way a malformed provider payload does.
struct MalformedEmbedder;

impl Embedder for MalformedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
        Err(LlmError::InvalidResponse(
            "embedding payload missing".into(),
        ))
    }
}

/// Records every prompt it sees and replies with canned text.
#[derive(Clone)]
struct RecordingGenerator {
    prompts: Arc<Mutex<Vec<String>>>,
    reply: String,
}

impl RecordingGenerator {
    fn new(reply: &str) -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            reply: reply.into(),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Generator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails with 503 `fail_times` times, then succeeds. Records call times on
/// the (test-paused) tokio clock.
#[derive(Clone)]
struct FlakyGenerator {
    fail_times: u32,
    calls: Arc<AtomicU32>,
    call_times: Arc<Mutex<Vec<tokio::time::Instant>>>,
    reply: String,
}

impl FlakyGenerator {
    fn new(fail_times: u32, reply: &str) -> Self {
        Self {
            fail_times,
            calls: Arc::new(AtomicU32::new(0)),
            call_times: Arc::new(Mutex::new(Vec::new())),
            reply: reply.into(),
        }
    }
}

impl Generator for FlakyGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        self.call_times.lock().unwrap().push(tokio::time::Instant::now());
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.fail_times {
            Err(LlmError::Overloaded(503))
        } else {
            Ok(self.reply.clone())
        }
    }
}

/// Generator that never resolves; exercises the overall deadline.
struct StuckGenerator;

impl Generator for StuckGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

/// Corpus store that counts fetches.
#[derive(Clone)]
struct CountingStore {
    documents: Vec<StoredDocument>,
    calls: Arc<AtomicU32>,
}

impl CountingStore {
    fn new(documents: Vec<StoredDocument>) -> Self {
        Self {
            documents,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl DocumentStore for CountingStore {
    async fn fetch_all(&self) -> Result<Vec<StoredDocument>, RagError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.documents.clone())
    }
}

fn drug_doc(title: &str, embedding: Vec<f32>, meta: &[(&str, &str)]) -> StoredDocument {
    StoredDocument {
        id: title.to_lowercase(),
        title: title.into(),
        content: format!("FDA label text for {title}"),
        embedding,
        metadata: meta
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    }
}

/* ----------------------------- scenarios ------------------------------ */

#[tokio::test]
async fn drug_query_builds_grounded_context_for_single_match() {
    let embedder = FixedEmbedder::new(vec![1.0, 0.0, 0.0]);
    let generator = RecordingGenerator::new("Take as directed.");
    let store = CountingStore::new(vec![drug_doc(
        "Ibuprofen",
        vec![0.9, 0.1, 0.0],
        &[("activeIngredients", "ibuprofen")],
    )]);

    let gateway = ChatGateway::new(
        embedder.clone(),
        generator.clone(),
        store,
        GatewayConfig::default(),
    );
    let answer = gateway.answer("ibuprofen dosage").await.unwrap();

    assert_eq!(answer, "Take as directed.");
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("1. DRUG INFORMATION:"));
    assert!(prompt.contains("• Name: Ibuprofen"));
    assert!(prompt.contains("• Active Ingredients: ibuprofen"));
    assert!(prompt.contains("User Query: ibuprofen dosage"));
    // Single match, single block.
    assert!(!prompt.contains("2. DRUG INFORMATION:"));
}

#[tokio::test]
async fn general_query_skips_embedding_and_ranking() {
    let embedder = FixedEmbedder::new(vec![1.0, 0.0]);
    let generator = RecordingGenerator::new("Hi there!");
    let store = CountingStore::new(vec![drug_doc("Ibuprofen", vec![1.0, 0.0], &[])]);
    let store_calls = Arc::clone(&store.calls);

    let gateway = ChatGateway::new(
        embedder.clone(),
        generator.clone(),
        store,
        GatewayConfig::default(),
    );
    let answer = gateway.answer("hello, how are you").await.unwrap();

    assert_eq!(answer, "Hi there!");
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(store_calls.load(Ordering::SeqCst), 0);
    assert!(generator.prompts()[0].contains("helpful AI assistant"));
}

#[tokio::test]
async fn malformed_embedding_response_fails_before_ranking() {
    let generator = RecordingGenerator::new("unused");
    let store = CountingStore::new(vec![drug_doc("Ibuprofen", vec![1.0, 0.0], &[])]);
    let store_calls = Arc::clone(&store.calls);

    let gateway = ChatGateway::new(
        MalformedEmbedder,
        generator.clone(),
        store,
        GatewayConfig::default(),
    );
    let err = gateway.answer("ibuprofen dosage").await.unwrap_err();

    assert!(matches!(
        err,
        GatewayError::Llm(LlmError::InvalidResponse(_))
    ));
    assert_eq!(err.status(), AnswerStatus::Failed);
    // The ranker never ran: the corpus was never fetched.
    assert_eq!(store_calls.load(Ordering::SeqCst), 0);
    assert!(generator.prompts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn transient_generation_failures_retry_with_growing_delays() {
    let embedder = FixedEmbedder::new(vec![1.0, 0.0]);
    let generator = FlakyGenerator::new(2, "Recovered answer.");
    let store = CountingStore::new(vec![drug_doc(
        "Ibuprofen",
        vec![1.0, 0.0],
        &[("activeIngredients", "ibuprofen")],
    )]);

    let gateway = ChatGateway::new(embedder, generator.clone(), store, GatewayConfig::default());
    let answer = gateway.answer("ibuprofen dosage").await.unwrap();

    assert_eq!(answer, "Recovered answer.");
    assert_eq!(generator.calls.load(Ordering::SeqCst), 3);

    // Delays between attempts strictly increase: 1000ms then 2000ms.
    let times = generator.call_times.lock().unwrap().clone();
    assert_eq!(times.len(), 3);
    let first_gap = times[1] - times[0];
    let second_gap = times[2] - times[1];
    assert_eq!(first_gap, Duration::from_millis(1000));
    assert_eq!(second_gap, Duration::from_millis(2000));
    assert!(second_gap > first_gap);
}

#[tokio::test]
async fn query_dimension_mismatch_is_loud() {
    let embedder = FixedEmbedder::new(vec![1.0, 0.0]);
    let generator = RecordingGenerator::new("unused");
    let store = CountingStore::new(vec![drug_doc("Ibuprofen", vec![1.0, 0.0, 0.0], &[])]);

    let gateway = ChatGateway::new(embedder, generator.clone(), store, GatewayConfig::default());
    let err = gateway.answer("ibuprofen dosage").await.unwrap_err();

    assert!(matches!(
        err,
        GatewayError::Rag(RagError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    ));
    assert_eq!(err.status(), AnswerStatus::Failed);
    assert!(generator.prompts().is_empty());
}

/* --------------------------- edge behaviors --------------------------- */

#[tokio::test]
async fn empty_query_is_invalid_input() {
    let gateway = ChatGateway::new(
        FixedEmbedder::new(vec![1.0]),
        RecordingGenerator::new("unused"),
        CountingStore::new(vec![]),
        GatewayConfig::default(),
    );
    let err = gateway.answer("   ").await.unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));
    assert_eq!(err.status(), AnswerStatus::InvalidInput);
}

#[tokio::test]
async fn empty_corpus_takes_the_disclaimer_path() {
    let generator = RecordingGenerator::new("unused");
    let gateway = ChatGateway::new(
        FixedEmbedder::new(vec![1.0, 0.0]),
        generator.clone(),
        CountingStore::new(vec![]),
        GatewayConfig::default(),
    );
    let answer = gateway.answer("ibuprofen dosage").await.unwrap();

    assert_eq!(answer, NO_MATCHES_DISCLAIMER);
    // The disclaimer never touches the model.
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn rate_limited_generation_is_not_retried() {
    struct RateLimitedGenerator {
        calls: Arc<AtomicU32>,
    }
    impl Generator for RateLimitedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::RateLimited {
                retry_after_secs: Some(30),
            })
        }
    }

    let calls = Arc::new(AtomicU32::new(0));
    let gateway = ChatGateway::new(
        FixedEmbedder::new(vec![1.0]),
        RateLimitedGenerator {
            calls: Arc::clone(&calls),
        },
        CountingStore::new(vec![]),
        GatewayConfig::default(),
    );
    let err = gateway.answer("hello, how are you").await.unwrap_err();

    assert_eq!(err.status(), AnswerStatus::RateLimited);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn unresponsive_provider_hits_the_overall_deadline() {
    let gateway = ChatGateway::new(
        FixedEmbedder::new(vec![1.0]),
        StuckGenerator,
        CountingStore::new(vec![]),
        GatewayConfig::default(),
    );
    let err = gateway.answer("hello, how are you").await.unwrap_err();

    assert!(matches!(err, GatewayError::Timeout(_)));
    assert_eq!(err.status(), AnswerStatus::Unavailable);
}

#[tokio::test]
async fn custom_keyword_list_reroutes_queries() {
    let embedder = FixedEmbedder::new(vec![1.0]);
    let generator = RecordingGenerator::new("ok");
    let cfg = GatewayConfig {
        keywords: Some(vec!["warp".into(), "core".into()]),
        ..GatewayConfig::default()
    };
    let gateway = ChatGateway::new(
        embedder.clone(),
        generator,
        CountingStore::new(vec![]),
        cfg,
    );

    // "medicine" is not in the custom list, so it routes general.
    gateway.answer("what medicine helps").await.unwrap();
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);

    // "warp core" is domain now; with an empty corpus it hits the disclaimer.
    let answer = gateway.answer("warp core breach").await.unwrap();
    assert_eq!(answer, NO_MATCHES_DISCLAIMER);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
}
