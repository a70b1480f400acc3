//! Answer synthesis: one grounded-answer call. Provider failures become an
//! error-describing string so the interactive loop survives them.

use crate::config::SYNTHESIS_TEMPERATURE;
use crate::providers::ChatApi;
use crate::reasoner::prompts;

pub async fn synthesize<C: ChatApi>(chat: &C, question: &str, context: &str) -> String {
    let messages = prompts::answer_messages(question, context);
    match chat.complete(&messages, SYNTHESIS_TEMPERATURE).await {
        Ok(answer) => answer.trim().to_string(),
        Err(err) => {
            tracing::warn!(code = err.code(), "answer synthesis failed: {err}");
            format!("Error generating answer: {err}")
        }
    }
}
