//! Assembly definition files.
//!
//! A definition is a TOML document describing one node: its catalog `kind`,
//! optional `name`, a `data` table, and nested `children`. Example:
//!
//! ```toml
//! kind = "Group"
//! name = "z-axis"
//!
//! [data]
//! colour = [0.77, 0.77, 0.8]
//!
//! [[children]]
//! kind = "SFU1204ScrewAssembly"
//! [children.data]
//! length = 400.0
//!
//! [[children]]
//! kind = "Beam40x40"
//! [children.data]
//! length = 400.0
//! ```

use anyhow::{bail, Context, Result};
use mcad::{catalog, Assembly, NodeKey, ParamMap};
use serde::Deserialize;
use std::path::Path;

/// One node in an assembly definition.
#[derive(Debug, Deserialize)]
pub struct NodeDef {
    /// Catalog kind string (see [`mcad::catalog::create`]).
    pub kind: String,
    /// Optional display name; defaults to the part's own label.
    pub name: Option<String>,
    /// Parameter data for the node.
    #[serde(default)]
    pub data: ParamMap,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<NodeDef>,
}

/// Load a definition file and build the (unfinalised) assembly tree.
pub fn load(path: &Path) -> Result<Assembly> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let def: NodeDef =
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    build(&def)
}

/// Build an assembly tree from a parsed definition.
pub fn build(def: &NodeDef) -> Result<Assembly> {
    let part = instantiate(&def.kind)?;
    let mut asm = Assembly::new_boxed(part, def.name.clone(), def.data.clone());
    let root = asm.root();
    for child in &def.children {
        attach(&mut asm, root, child)?;
    }
    Ok(asm)
}

fn instantiate(kind: &str) -> Result<Box<dyn mcad::Part>> {
    match catalog::create(kind) {
        Some(part) => Ok(part),
        None => bail!("unknown part kind `{kind}`"),
    }
}

fn attach(asm: &mut Assembly, parent: NodeKey, def: &NodeDef) -> Result<()> {
    let part = instantiate(&def.kind)?;
    let key = asm.add_child_boxed(parent, part, def.name.clone(), def.data.clone())?;
    for child in &def.children {
        attach(asm, key, child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
kind = "Group"
name = "z-axis"

[data]
colour = [0.77, 0.77, 0.8]

[[children]]
kind = "SFU1204ScrewAssembly"
[children.data]
length = 400

[[children]]
kind = "Beam40x40"
[children.data]
length = 400.0
"#;

    #[test]
    fn sample_definition_builds_and_finalises() {
        let def: NodeDef = toml::from_str(SAMPLE).unwrap();
        let mut asm = build(&def).unwrap();
        asm.finalise().unwrap();

        let root = asm.root();
        assert_eq!(asm.name(root), "z-axis");
        assert_eq!(asm.children(root).len(), 2);
        // Integer TOML values deserialize as numbers.
        let screw = asm.children(root)[0];
        assert_eq!(asm.f64(screw, "length").unwrap(), 400.0);
        // The composite spawned its children during finalisation.
        assert_eq!(asm.children(screw).len(), 3);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let def: NodeDef = toml::from_str("kind = \"FluxCapacitor\"").unwrap();
        assert!(build(&def).is_err());
    }
}
