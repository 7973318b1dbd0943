//! Bill-of-materials generation.

use serde::Serialize;
use std::fmt::Write as _;

use crate::tree::{Assembly, NodeKey};
use crate::value::ParamMap;

/// One BOM row: a snapshot of a node at collection time.
#[derive(Debug, Clone, Serialize)]
pub struct BomRecord {
    /// Display name (not unique).
    pub name: String,
    /// Tree-wide unique identifier.
    pub identifier: String,
    /// The node's own parameter data.
    pub data: ParamMap,
    /// Whether the node is a composite assembly rather than a purchased or
    /// fabricated part.
    pub assembly: bool,
}

impl Assembly {
    /// Collect the bill of materials for the whole tree.
    ///
    /// Allocates unique identifiers first, then walks the tree in pre-order.
    pub fn make_bom(&mut self) -> Vec<BomRecord> {
        let root = self.root();
        self.make_bom_from(root)
    }

    /// Collect the bill of materials for the subtree rooted at `node`.
    ///
    /// Identifier allocation still covers the whole tree so subtree rows
    /// share the same identifier namespace as full-tree rows.
    pub fn make_bom_from(&mut self, node: NodeKey) -> Vec<BomRecord> {
        self.assign_unique_ids();
        self.walk_from(node)
            .map(|key| BomRecord {
                name: self.name(key).to_string(),
                identifier: self.identifier(key).to_string(),
                data: self.data(key).clone(),
                assembly: self.is_assembly(key),
            })
            .collect()
    }
}

/// Render a BOM as text: parts first, assemblies after.
pub fn format_bom(bom: &[BomRecord]) -> String {
    let mut out = String::new();
    for record in bom.iter().filter(|r| !r.assembly) {
        writeln_record(&mut out, record);
    }
    out.push('\n');
    for record in bom.iter().filter(|r| r.assembly) {
        writeln_record(&mut out, record);
    }
    out
}

fn writeln_record(out: &mut String, record: &BomRecord) {
    let _ = write!(out, "{} {}", record.identifier, record.name);
    let params: Vec<String> = record
        .data
        .iter()
        .map(|(k, v)| format!("{k}={}", serde_json::to_string(v).unwrap_or_default()))
        .collect();
    if params.is_empty() {
        out.push('\n');
    } else {
        let _ = writeln!(out, " [{}]", params.join(", "));
    }
}
