use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::ProviderConfig;
use crate::core::errors::{AppError, AppResult};
use crate::providers::{ChatApi, ChatMessage};

/// Client for an OpenAI-compatible chat-completions endpoint
/// (DashScope compatible mode by default).
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatClient {
    pub fn new(config: &ProviderConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| AppError::Network(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl ChatApi for ChatClient {
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> AppResult<String> {
        // Missing credentials short-circuit every call; the caller degrades
        // the turn instead of crashing the session.
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AppError::NotInitialized);
        };

        let endpoint = format!("{}/chat/completions", self.base_url);
        let payload = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
        });

        let response = self
            .http
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AppError::ProviderTimeout
                } else {
                    AppError::Network(err.to_string())
                }
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(AppError::ProviderAuth),
            StatusCode::TOO_MANY_REQUESTS => return Err(AppError::ProviderRateLimited),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ProviderInvalidResponse(format!(
                    "status {status} body {body}"
                )));
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| AppError::ProviderInvalidResponse(err.to_string()))?;
        let text = body
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices: &Vec<Value>| choices.first())
            .and_then(|choice: &Value| choice.get("message"))
            .and_then(|message: &Value| message.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::ProviderInvalidResponse("missing completion text".to_string())
            })?;

        Ok(text.to_string())
    }
}
