use std::sync::Mutex;

use pagelens::core::errors::{AppError, AppResult};
use pagelens::providers::{ChatApi, ChatMessage};
use pagelens::reasoner::prompts::REFUSAL;
use pagelens::reasoner::synthesizer::synthesize;

struct OneShotChat {
    reply: Mutex<Option<AppResult<String>>>,
    last_prompt: Mutex<String>,
}

impl OneShotChat {
    fn new(reply: AppResult<String>) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
            last_prompt: Mutex::new(String::new()),
        }
    }
}

impl ChatApi for OneShotChat {
    async fn complete(&self, messages: &[ChatMessage], _temperature: f32) -> AppResult<String> {
        *self.last_prompt.lock().unwrap() = messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default();
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(AppError::NotInitialized))
    }
}

#[tokio::test]
async fn refusal_sentence_passes_through_verbatim() {
    let chat = OneShotChat::new(Ok(format!("  {REFUSAL}\n")));
    let answer = synthesize(&chat, "What year?", "--- Page 1 ---\nUnrelated text.").await;
    assert_eq!(answer, REFUSAL);
}

#[tokio::test]
async fn prompt_embeds_context_question_and_refusal_instruction() {
    let chat = OneShotChat::new(Ok("The year was 1999.".to_string()));
    let _ = synthesize(&chat, "What year?", "--- Page 4 ---\nFounded in 1999.").await;

    let prompt = chat.last_prompt.lock().unwrap().clone();
    assert!(prompt.contains("What year?"));
    assert!(prompt.contains("--- Page 4 ---"));
    assert!(prompt.contains(REFUSAL));
}

#[tokio::test]
async fn provider_failure_becomes_error_string_not_panic() {
    let chat = OneShotChat::new(Err(AppError::ProviderRateLimited));
    let answer = synthesize(&chat, "question", "context").await;
    assert!(answer.starts_with("Error generating answer:"));
}

#[tokio::test]
async fn uninitialized_client_yields_error_string() {
    let chat = OneShotChat::new(Err(AppError::NotInitialized));
    let answer = synthesize(&chat, "question", "context").await;
    assert!(answer.contains("not initialized"));
}
