//! Unified error handling for `llm-service`.
//!
//! One top-level [`LlmError`] covers both provider adapters (generation and
//! embeddings). Upstream HTTP failures are folded into typed variants at the
//! transport boundary so that callers never match on status codes or message
//! substrings; [`LlmError::is_transient`] is the single source of truth for
//! the retry policy upstream.
//!
//! All messages include the suffix `[LLM Service]` to simplify attribution
//! in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, LlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `llm-service` crate.
///
/// Provider failures are classified as transient (worth retrying) or
/// permanent (propagate immediately). Use [`LlmError::is_transient`] rather
/// than matching variants at call sites.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credentials rejected by the provider (HTTP 401/403).
    #[error("[LLM Service] unauthorized: provider rejected the API key")]
    Unauthorized,

    /// The provider rejected the request payload (HTTP 400).
    #[error("[LLM Service] invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limited by the provider (HTTP 429). Not retried locally.
    #[error("[LLM Service] rate limited")]
    RateLimited {
        /// Provider-suggested wait, if it sent one.
        retry_after_secs: Option<u64>,
    },

    /// Provider is temporarily overloaded or unavailable (HTTP 5xx).
    #[error("[LLM Service] provider overloaded: status {0}")]
    Overloaded(u16),

    /// Request exceeded the configured client timeout.
    #[error("[LLM Service] request timed out")]
    Timeout,

    /// Network/transport failure without a status (DNS/connect/reset).
    #[error("[LLM Service] network error: {0}")]
    Network(String),

    /// Other HTTP status (3xx/4xx) not covered above.
    #[error("[LLM Service] unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// Response body could not be decoded as expected.
    #[error("[LLM Service] failed to decode response: {0}")]
    Decode(String),

    /// Response decoded but violated the provider contract (e.g. an
    /// embedding payload without a numeric vector).
    #[error("[LLM Service] invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// True when a bounded retry with backoff is a reasonable reaction.
    ///
    /// Only server overload, timeouts, and raw network failures qualify.
    /// Rate limits and auth errors are deliberately permanent: retrying them
    /// locally only makes the caller's situation worse.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::Overloaded(_) | LlmError::Timeout | LlmError::Network(_)
        )
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return LlmError::Timeout;
        }
        if let Some(status) = e.status() {
            return status_to_error(status, None);
        }
        LlmError::Network(e.to_string())
    }
}

/// Fold a non-success HTTP status into a typed [`LlmError`].
///
/// `detail` is a short snippet of the response body, used only for the
/// variants that carry a message.
pub(crate) fn status_to_error(status: StatusCode, detail: Option<&str>) -> LlmError {
    let code = status.as_u16();
    match code {
        400 => LlmError::InvalidRequest(detail.unwrap_or("bad request").to_string()),
        401 | 403 => LlmError::Unauthorized,
        429 => LlmError::RateLimited {
            retry_after_secs: None,
        },
        500..=599 => LlmError::Overloaded(code),
        _ => LlmError::HttpStatus(code),
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like token limits or timeouts).
    #[error("[LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GEMINI_ENDPOINT`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range (e.g., `expected 0.0..=1.0`).
        detail: &'static str,
    },

    /// Model name was empty or invalid.
    #[error("[LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`LlmError::Config`] with [`ConfigError::MissingVar`] if the
/// variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`LlmError::Config`] with [`ConfigError::InvalidNumber`] if the
/// variable is set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u32>().map(Some).map_err(|_| {
            LlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        _ => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`LlmError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// # Errors
/// Returns [`LlmError::Config`] with [`ConfigError::OutOfRange`] if `value`
/// is outside `[min, max]` or not finite.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}
