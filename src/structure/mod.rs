//! Structure index: loads the persisted outline tree, backfills node ids
//! when the structuring service did not assign any, and builds the id → node
//! lookup used to resolve selector output.

use std::collections::HashMap;
use std::path::Path;

use crate::core::errors::{AppError, AppResult};
use crate::core::types::{StructureFile, StructureNode};

pub mod view;

pub fn load_structure(path: &Path) -> AppResult<StructureFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| AppError::Io(format!("cannot read structure file {path:?}: {err}")))?;
    let file: StructureFile = serde_json::from_str(&raw).map_err(|err| {
        AppError::InvalidInput(format!("malformed structure file {path:?}: {err}"))
    })?;
    Ok(file)
}

/// Assigns a fresh id to every node, depth first, unless the tree already
/// carries at least one id. A tree with any id present is treated as already
/// indexed and left untouched, including partially tagged trees.
pub fn ensure_ids(nodes: &mut [StructureNode]) {
    if has_any_id(nodes) {
        return;
    }
    let mut next = 0usize;
    assign_ids(nodes, &mut next);
}

fn has_any_id(nodes: &[StructureNode]) -> bool {
    nodes
        .iter()
        .any(|node| node.node_id.is_some() || has_any_id(&node.children))
}

fn assign_ids(nodes: &mut [StructureNode], next: &mut usize) {
    for node in nodes {
        node.node_id = Some(format!("{next:04}"));
        *next += 1;
        assign_ids(&mut node.children, next);
    }
}

/// Flat id → node map over every id-carrying node. Ids are expected unique;
/// on collision the later node wins.
pub fn build_index(nodes: &[StructureNode]) -> HashMap<&str, &StructureNode> {
    let mut index = HashMap::new();
    collect(nodes, &mut index);
    index
}

fn collect<'a>(nodes: &'a [StructureNode], index: &mut HashMap<&'a str, &'a StructureNode>) {
    for node in nodes {
        if let Some(id) = node.node_id.as_deref() {
            index.insert(id, node);
        }
        collect(&node.children, index);
    }
}
