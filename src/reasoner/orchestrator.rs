//! Hybrid retrieval orchestrator.
//!
//! Sequences node-level tree reasoning, the whole-TOC page fallback and the
//! terminal no-pages outcome. Tree reasoning runs first: smaller prompt,
//! summary-aware, more precise. The TOC fallback is the coarser safety net,
//! invoked only when tree reasoning yields nothing usable. Worst case is
//! exactly two reasoning calls per question.

use std::collections::{HashMap, HashSet};

use crate::core::errors::AppResult;
use crate::core::types::{RetrievalMode, StructureNode};
use crate::providers::ChatApi;
use crate::reasoner::selector;
use crate::structure::{self, view};

/// Outcome of one retrieval pass. `pages` empty means retrieval is
/// exhausted; there is no further fallback.
#[derive(Debug, Clone)]
pub struct Retrieval<'a> {
    pub mode: RetrievalMode,
    pub node_ids: Vec<String>,
    pub sections: Vec<&'a StructureNode>,
    pub pages: Vec<i64>,
}

/// Holds the read-only views a session needs: the id index, the reduced
/// tree serialized for the node prompt and the flat TOC for the fallback.
/// Built once per document load, never mutated afterwards.
pub struct Retriever<'a> {
    index: HashMap<&'a str, &'a StructureNode>,
    tree_json: String,
    toc_text: String,
}

impl<'a> Retriever<'a> {
    pub fn new(nodes: &'a [StructureNode]) -> AppResult<Self> {
        let reduced = view::project(nodes);
        let tree_json = serde_json::to_string_pretty(&reduced)?;
        Ok(Self {
            index: structure::build_index(nodes),
            tree_json,
            toc_text: view::format_toc(nodes),
        })
    }

    /// One retrieval pass: node selection, then the TOC fallback when node
    /// selection returned nothing resolvable.
    pub async fn retrieve<C: ChatApi>(&self, chat: &C, question: &str) -> Retrieval<'a> {
        let node_ids = selector::select_nodes(chat, question, &self.tree_json).await;

        // Hallucinated ids are expected; drop them without failing the turn.
        let sections: Vec<&StructureNode> = node_ids
            .iter()
            .filter_map(|id| self.index.get(id.as_str()).copied())
            .collect();
        if sections.len() < node_ids.len() {
            tracing::debug!(
                requested = node_ids.len(),
                resolved = sections.len(),
                "some selected node ids did not resolve"
            );
        }

        if !sections.is_empty() {
            let pages = union_pages(&sections);
            if !pages.is_empty() {
                return Retrieval {
                    mode: RetrievalMode::Tree,
                    node_ids,
                    sections,
                    pages,
                };
            }
        }

        let pages = selector::select_pages(chat, question, &self.toc_text).await;
        Retrieval {
            mode: RetrievalMode::TocFallback,
            node_ids,
            sections: vec![],
            pages,
        }
    }
}

/// Union of the sections' page ranges: node order first, ascending within
/// each range, first occurrence wins. Keeps proximate context blocks
/// together instead of sorting the pages numerically.
fn union_pages(sections: &[&StructureNode]) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut pages = Vec::new();
    for node in sections {
        let (Some(start), Some(end)) = (node.start_page, node.end_page) else {
            continue;
        };
        for page in start..=end {
            if seen.insert(page) {
                pages.push(page);
            }
        }
    }
    pages
}
