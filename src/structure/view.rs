//! Read-only projections of the outline tree for prompting: a reduced JSON
//! tree for node selection and a flat indented TOC for the page fallback.

use serde::Serialize;

use crate::core::types::StructureNode;

/// Reduced node handed to the node-selection prompt. Page ranges are
/// deliberately absent; they are resolved later through the index.
#[derive(Debug, Clone, Serialize)]
pub struct ReducedNode {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "nodes", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReducedNode>,
}

/// Pure projection: title, id, summary and non-empty children only.
pub fn project(nodes: &[StructureNode]) -> Vec<ReducedNode> {
    nodes
        .iter()
        .map(|node| ReducedNode {
            title: node.title.clone(),
            node_id: node.node_id.clone(),
            summary: node.summary.clone(),
            children: project(&node.children),
        })
        .collect()
}

/// Flat text rendering of the tree with page ranges and summaries,
/// indentation encoding depth.
pub fn format_toc(nodes: &[StructureNode]) -> String {
    let mut out = String::new();
    render_toc(nodes, 0, &mut out);
    out
}

fn render_toc(nodes: &[StructureNode], depth: usize, out: &mut String) {
    for node in nodes {
        let prefix = "  ".repeat(depth);
        let start = node
            .start_page
            .map_or_else(|| "?".to_string(), |page| page.to_string());
        let end = node
            .end_page
            .map_or_else(|| "?".to_string(), |page| page.to_string());
        out.push_str(&format!("{prefix}- {} (Pages: {start}-{end})", node.title));
        if let Some(summary) = node.summary.as_deref() {
            let summary = summary.trim();
            if !summary.is_empty() {
                out.push_str(&format!("\n{prefix}  Summary: {summary}"));
            }
        }
        out.push('\n');
        render_toc(&node.children, depth + 1, out);
    }
}
