//! Default Gemini configs loaded strictly from environment variables.
//!
//! Convenience constructors for [`LlmModelConfig`], one per role:
//!
//! - **Chat**      → grounded/general answer generation
//! - **Embedding** → query embedding for retrieval
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`     = API key (mandatory)
//! - `GEMINI_ENDPOINT`    = API base URL (optional, defaults to the public one)
//! - `GEMINI_CHAT_MODEL`  = generation model (optional, default `gemini-2.0-flash`)
//! - `GEMINI_EMBED_MODEL` = embedding model (optional, default `embedding-001`)
//! - `LLM_MAX_TOKENS`     = optional max output tokens (u32)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{LlmError, env_opt_u32, must_env, validate_http_endpoint},
};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_EMBED_MODEL: &str = "embedding-001";

/// Resolves the Gemini endpoint from `GEMINI_ENDPOINT`, falling back to the
/// public API host.
///
/// # Errors
/// [`crate::error_handler::ConfigError::InvalidFormat`] if the override is
/// not an HTTP(S) URL.
fn gemini_endpoint() -> Result<String, LlmError> {
    let endpoint = std::env::var("GEMINI_ENDPOINT")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    validate_http_endpoint("GEMINI_ENDPOINT", &endpoint)?;
    Ok(endpoint)
}

/// Constructs a config for the **chat** model.
///
/// # Env
/// - `GEMINI_API_KEY` (required)
/// - `GEMINI_CHAT_MODEL`, `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.7)`, `top_p = Some(0.95)`
/// - `max_output_tokens = Some(1024)` unless overridden
/// - `timeout_secs = Some(60)`
pub fn config_gemini_chat() -> Result<LlmModelConfig, LlmError> {
    let endpoint = gemini_endpoint()?;
    let api_key = must_env("GEMINI_API_KEY")?;
    let model = std::env::var("GEMINI_CHAT_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());
    let max_output_tokens = env_opt_u32("LLM_MAX_TOKENS")?.or(Some(1024));

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key,
        max_output_tokens,
        temperature: Some(0.7),
        top_p: Some(0.95),
        timeout_secs: Some(60),
    })
}

/// Constructs a config for the **embedding** model.
///
/// # Env
/// - `GEMINI_API_KEY` (required)
/// - `GEMINI_EMBED_MODEL` (optional)
///
/// # Defaults
/// - no sampling knobs (embeddings are deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_gemini_embedding() -> Result<LlmModelConfig, LlmError> {
    let endpoint = gemini_endpoint()?;
    let api_key = must_env("GEMINI_API_KEY")?;
    let model = std::env::var("GEMINI_EMBED_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EMBED_MODEL.to_string());

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key,
        max_output_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(30),
    })
}
