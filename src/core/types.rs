use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One node of the document outline, as persisted by the external
/// structuring service. Page indices are 1-based and inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureNode {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "start_index", default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<i64>,
    #[serde(rename = "end_index", default, skip_serializing_if = "Option::is_none")]
    pub end_page: Option<i64>,
    #[serde(rename = "nodes", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StructureNode>,
}

/// On-disk structure file: the sole contract with the structuring service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureFile {
    #[serde(default)]
    pub doc_name: String,
    #[serde(default)]
    pub structure: Vec<StructureNode>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMode {
    Tree,
    TocFallback,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    Ok,
    NoPages,
}

/// Flat view of a resolved outline node, kept in the turn log instead of the
/// full recursive node so log lines stay bounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRef {
    pub node_id: Option<String>,
    pub title: String,
    pub start_page: Option<i64>,
    pub end_page: Option<i64>,
}

impl SectionRef {
    pub fn from_node(node: &StructureNode) -> Self {
        Self {
            node_id: node.node_id.clone(),
            title: node.title.clone(),
            start_page: node.start_page,
            end_page: node.end_page,
        }
    }
}

/// A single question/answer exchange, fully materialized before logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalTurn {
    pub timestamp: DateTime<Utc>,
    pub question: String,
    pub mode: RetrievalMode,
    pub node_ids: Vec<String>,
    #[serde(rename = "resolved_nodes")]
    pub sections: Vec<SectionRef>,
    pub pages: Vec<i64>,
    pub context: String,
    pub answer: String,
    pub status: TurnStatus,
}
