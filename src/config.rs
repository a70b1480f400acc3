//! Provider configuration, built once at startup and passed into the
//! components that need it. No module-level singleton.

pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
pub const DEFAULT_MODEL: &str = "qwen-plus";

/// Retrieval prompts want deterministic output; synthesis is allowed to vary.
pub const RETRIEVAL_TEMPERATURE: f32 = 0.0;
pub const SYNTHESIS_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl ProviderConfig {
    /// Reads credentials and endpoint from the environment.
    /// `DASHSCOPE_API_KEY` wins over `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("DASHSCOPE_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let base_url = std::env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            api_key,
            base_url,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}
