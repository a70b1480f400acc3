use crate::providers::ChatMessage;

/// Fixed refusal sentence. Part of the external contract: downstream
/// consumers match it verbatim to detect "no answer".
pub const REFUSAL: &str = "I cannot find the answer in the provided context.";

const SYSTEM: &str = "You are a helpful assistant.";

pub fn node_selection_messages(question: &str, tree_json: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "You are given a question and a tree structure of a document.\n\
         Each node contains a node id, a node title and an optional summary.\n\
         Your task is to find all nodes that are likely to contain the answer.\n\n\
         Question: {question}\n\n\
         Document tree structure:\n{tree_json}\n\n\
         Reply in the following JSON format:\n\
         {{\"thinking\": <reasoning about which nodes are relevant>, \"node_list\": [node_id1, node_id2, ...]}}\n\
         Directly return the final JSON structure. Do not output anything else."
    );
    vec![ChatMessage::system(SYSTEM), ChatMessage::user(prompt)]
}

pub fn page_selection_messages(question: &str, toc_text: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "You are an intelligent assistant.\n\
         I have a document with the following Table of Contents (TOC), which may include summaries for each section:\n\n\
         {toc_text}\n\n\
         The user has asked: \"{question}\"\n\n\
         Based on the TOC and summaries, which pages are most likely to contain the answer?\n\
         Reason about which section covers the topic.\n\
         Then return ONLY a JSON list of physical page numbers.\n\
         Format: [page_num1, page_num2, ...]\n\
         Example: [5, 6, 7]\n\n\
         If you are unsure, select the most relevant sections' pages."
    );
    vec![ChatMessage::system(SYSTEM), ChatMessage::user(prompt)]
}

pub fn answer_messages(question: &str, context: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "Answer the user's question based on the following context.\n\
         If the answer is not in the context, say \"{REFUSAL}\"\n\n\
         Context:\n{context}\n\n\
         Question: {question}"
    );
    vec![ChatMessage::system(SYSTEM), ChatMessage::user(prompt)]
}
