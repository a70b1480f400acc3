//! Node and page selectors: one outbound reasoning call each, tolerant
//! parsing, and an empty result on any failure. An empty result is
//! recoverable; the orchestrator decides what happens next. No retries here.

use serde_json::Value;

use crate::config::RETRIEVAL_TEMPERATURE;
use crate::providers::ChatApi;
use crate::reasoner::{extract, prompts};

/// Asks which outline nodes are relevant to the question. Returns node ids
/// in the model's order, or empty on service or parse failure.
pub async fn select_nodes<C: ChatApi>(chat: &C, question: &str, tree_json: &str) -> Vec<String> {
    let messages = prompts::node_selection_messages(question, tree_json);
    let reply = match chat.complete(&messages, RETRIEVAL_TEMPERATURE).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(code = err.code(), "node selection call failed: {err}");
            return vec![];
        }
    };

    let Some(value) = extract::extract_object(&reply) else {
        tracing::warn!("node selection reply carried no parsable JSON object");
        return vec![];
    };
    let Some(list) = value.get("node_list").and_then(Value::as_array) else {
        tracing::warn!("node selection reply had no node_list array");
        return vec![];
    };

    list.iter()
        .filter_map(|item| match item {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
        .collect()
}

/// Fallback path: asks for relevant physical page numbers given the flat
/// TOC text. Non-numeric entries are discarded; duplicates are kept.
pub async fn select_pages<C: ChatApi>(chat: &C, question: &str, toc_text: &str) -> Vec<i64> {
    let messages = prompts::page_selection_messages(question, toc_text);
    let reply = match chat.complete(&messages, RETRIEVAL_TEMPERATURE).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(code = err.code(), "page selection call failed: {err}");
            return vec![];
        }
    };

    let Some(value) = extract::extract_array(&reply) else {
        tracing::warn!("page selection reply carried no parsable JSON array");
        return vec![];
    };
    let Some(items) = value.as_array() else {
        return vec![];
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Number(num) => num.as_i64(),
            Value::String(raw) => raw.trim().parse::<i64>().ok(),
            _ => None,
        })
        .filter(|&page| page > 0)
        .collect()
}
