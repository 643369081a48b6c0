//! Runtime configuration loaded from environment variables.

/// Config bag for the gateway. All fields have defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// How many ranked documents feed the context assembler.
    pub top_k: usize,

    /// Generation retry budget (attempts, not retries).
    pub max_attempts: u32,
    /// First backoff delay; doubles per transient failure.
    pub initial_backoff_ms: u64,
    /// Deadline for the whole generation step, retries included.
    pub generation_timeout_secs: u64,

    /// Optional classifier keyword override (comma-separated in env).
    pub keywords: Option<Vec<String>>,
}

impl GatewayConfig {
    /// Build from environment variables with sensible defaults.
    ///
    /// - `RAG_TOP_K` (default 3)
    /// - `LLM_RETRY_ATTEMPTS` (default 3)
    /// - `LLM_RETRY_BACKOFF_MS` (default 1000)
    /// - `GENERATION_TIMEOUT_SECS` (default 60)
    /// - `CHAT_DOMAIN_KEYWORDS` (comma-separated; default built-in list)
    pub fn from_env() -> Self {
        let keywords = std::env::var("CHAT_DOMAIN_KEYWORDS").ok().map(|raw| {
            raw.split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect::<Vec<_>>()
        });

        Self {
            top_k: parse("RAG_TOP_K", 3usize),
            max_attempts: parse("LLM_RETRY_ATTEMPTS", 3u32),
            initial_backoff_ms: parse("LLM_RETRY_BACKOFF_MS", 1000u64),
            generation_timeout_secs: parse("GENERATION_TIMEOUT_SECS", 60u64),
            keywords,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_attempts: 3,
            initial_backoff_ms: 1000,
            generation_timeout_secs: 60,
            keywords: None,
        }
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}
