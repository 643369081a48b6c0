//! Lightweight Gemini client for text generation and embeddings.
//!
//! This module implements a thin client for the Gemini REST API:
//! - `POST {endpoint}/v1beta/models/{model}:generateContent` — non-streaming generation
//! - `POST {endpoint}/v1beta/models/{model}:embedContent`    — embeddings retrieval
//!
//! The API key travels in the `x-goog-api-key` header so it never appears in
//! URLs or logs. Failures are folded into the crate-wide [`LlmError`]
//! taxonomy at this boundary; nothing above this module inspects HTTP
//! statuses.
//!
//! # Examples
//!
//! ```no_run
//! use llm_service::config::llm_model_config::LlmModelConfig;
//! use llm_service::services::gemini_service::GeminiService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = LlmModelConfig {
//!     model: "gemini-2.0-flash".into(),
//!     endpoint: "https://generativelanguage.googleapis.com".into(),
//!     api_key: "AIza...".into(),
//!     max_output_tokens: Some(1024),
//!     temperature: Some(0.7),
//!     top_p: Some(0.95),
//!     timeout_secs: Some(60),
//! };
//!
//! let svc = GeminiService::new(cfg)?;
//! let text = svc.generate_text("What is ibuprofen?").await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::{ConfigError, LlmError, Result, status_to_error};

/// Thin client for one Gemini model role.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses an HTTP client with a
/// configurable timeout. Provides two high-level calls:
/// - [`GeminiService::generate_text`] — synchronous text generation
/// - [`GeminiService::embed_text`]    — embeddings retrieval
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embed: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is not HTTP(S)
    /// - [`ConfigError::EmptyModel`] if `cfg.model` is empty
    /// - [`ConfigError::MissingVar`] if `cfg.api_key` is empty
    /// - [`LlmError::Network`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidFormat {
                var: "endpoint",
                reason: "must start with http:// or https://",
            }
            .into());
        }
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        if cfg.api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar("GEMINI_API_KEY").into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/v1beta/models/{}:generateContent", base, cfg.model);
        let url_embed = format!("{}/v1beta/models/{}:embedContent", base, cfg.model);

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embed,
        })
    }

    /// Performs a **non-streaming** generation request.
    ///
    /// Mapped options:
    /// - `temperature`       ← `self.cfg.temperature`
    /// - `topP`              ← `self.cfg.top_p`
    /// - `maxOutputTokens`   ← `self.cfg.max_output_tokens`
    ///
    /// # Errors
    /// - typed status variants ([`LlmError::Unauthorized`],
    ///   [`LlmError::RateLimited`], [`LlmError::Overloaded`], ...) for non-2xx
    /// - [`LlmError::Decode`] if the body cannot be parsed
    /// - [`LlmError::InvalidResponse`] if no candidate text is present
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt);

        debug!(target: "llm_service::gemini", "POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .header("x-goog-api-key", &self.cfg.api_key)
            .json(&body)
            .send()
            .await?;

        let resp = Self::check_status(resp).await?;

        let out: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("serde error: {e}")))?;

        let text: String = out
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "no candidate text in generateContent response".into(),
            ));
        }

        Ok(text)
    }

    /// Retrieves an embedding vector for `text`.
    ///
    /// The returned vector is validated before being handed out: it must be
    /// non-empty and every component must be finite. A malformed payload is
    /// an [`LlmError::InvalidResponse`], never a silent zero-vector.
    ///
    /// # Errors
    /// - typed status variants for non-2xx responses
    /// - [`LlmError::Decode`] if the body cannot be parsed
    /// - [`LlmError::InvalidResponse`] if the vector is missing/empty/non-finite
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let body = EmbedContentRequest::new(text);

        debug!(target: "llm_service::gemini", "POST {}", self.url_embed);
        let resp = self
            .client
            .post(&self.url_embed)
            .header("x-goog-api-key", &self.cfg.api_key)
            .json(&body)
            .send()
            .await?;

        let resp = Self::check_status(resp).await?;

        let out: EmbedContentResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("serde error: {e}")))?;

        let values = out
            .embedding
            .map(|e| e.values)
            .ok_or_else(|| LlmError::InvalidResponse("embedding payload missing".into()))?;

        if values.is_empty() {
            return Err(LlmError::InvalidResponse("embedding vector is empty".into()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(LlmError::InvalidResponse(
                "embedding vector contains non-finite values".into(),
            ));
        }

        Ok(values)
    }

    /// Map a non-success HTTP status into a typed error, keeping a short
    /// body snippet for the variants that carry a message.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let snippet = text.chars().take(240).collect::<String>();
        Err(status_to_error(status, Some(&snippet)))
    }
}

/* ==========================
HTTP payloads
========================== */

/// Request body for `:generateContent` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str) -> Self {
        let generation_config = GenerationConfig {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_output_tokens: cfg.max_output_tokens,
        };

        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: Some(generation_config),
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Subset of Gemini `generationConfig`.
#[derive(Debug, Default, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Response body for `:generateContent`.
///
/// Minimal shape: the generated text lives in `candidates[0].content.parts`.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Request body for `:embedContent`.
#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    content: Content<'a>,
}

impl<'a> EmbedContentRequest<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            content: Content {
                parts: vec![Part { text }],
            },
        }
    }
}

/// Response body for `:embedContent`.
#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}
