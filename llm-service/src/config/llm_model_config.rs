/// Configuration for a single model invocation against the Gemini API.
///
/// One instance describes one role (chat generation or embeddings); the
/// service keeps a dedicated HTTP client per config.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string (e.g., `"gemini-2.0-flash"`, `"embedding-001"`).
    pub model: String,

    /// API base endpoint (e.g., `https://generativelanguage.googleapis.com`).
    pub endpoint: String,

    /// API key sent with every request.
    pub api_key: String,

    /// Maximum number of tokens to generate. Ignored for embeddings.
    pub max_output_tokens: Option<u32>,

    /// Sampling temperature (0.0 = deterministic).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
