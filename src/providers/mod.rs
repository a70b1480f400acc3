use serde::Serialize;

use crate::core::errors::AppResult;

pub mod openai;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// The reasoning/completion collaborator: message list plus temperature in,
/// free text out. The returned text is untrusted; callers apply tolerant
/// extraction before using it.
pub trait ChatApi {
    fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> impl std::future::Future<Output = AppResult<String>>;
}
