//! The part capability interface and the contexts it is called with.

use mcad_ir::Rgba;

use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::tree::{Assembly, NodeKey};
use crate::value::{ParamMap, Value};

/// Behavior of one node in the assembly tree.
///
/// A part is either a primitive (a catalog shape) or a composite that spawns
/// and positions children. Both expose the same two capabilities:
///
/// * [`calculate`](Part::calculate) settles derived parameters. Returning
///   `Ok(false)` means "not resolvable yet, try again on a later pass";
///   errors are fatal (unsupported styles, missing required parameters).
/// * [`generate`](Part::generate) is a pure function of the node's resolved
///   data producing a [`Shape`]. Parts that own no geometry (plain grouping
///   assemblies) keep the default body, which reports the contract violation.
pub trait Part: 'static {
    /// Catalog identifier, e.g. `"SBR12"`. Used by configuration files and
    /// as the default display label.
    fn kind(&self) -> &'static str;

    /// Kind-specific default parameters, merged under caller data.
    fn defaults(&self) -> ParamMap {
        ParamMap::new()
    }

    /// Display label for a node with the given (merged) data.
    fn label(&self, _data: &ParamMap) -> String {
        self.kind().to_string()
    }

    /// Settle this node's derived parameters.
    fn calculate(&mut self, cx: &mut CalcCx<'_>) -> Result<bool>;

    /// Produce the node's geometry from its resolved data.
    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        Err(Error::NoGeometry {
            node: cx.name().to_string(),
        })
    }
}

/// A plain grouping assembly with no derived data and no geometry of its own.
pub struct Group;

impl Part for Group {
    fn kind(&self) -> &'static str {
        "Group"
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }
}

/// Context handed to [`Part::calculate`].
///
/// Gives the part resolved read access to the tree's parameter data, write
/// access to its own node, and the ability to attach children (which are
/// eagerly calculated, since the parent is mid-calculation).
pub struct CalcCx<'a> {
    pub(crate) tree: &'a mut Assembly,
    pub(crate) key: NodeKey,
}

impl CalcCx<'_> {
    /// Display name of this node.
    pub fn name(&self) -> &str {
        self.tree.name(self.key)
    }

    /// Resolve a parameter (own data, then descendants, then ancestors).
    pub fn get(&self, key: &str) -> Option<Value> {
        self.tree.get_data(self.key, key)
    }

    /// Resolve a required numeric parameter.
    pub fn f64(&self, key: &str) -> Result<f64> {
        self.tree.f64(self.key, key)
    }

    /// Resolve a numeric parameter with a fallback.
    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        self.tree.f64_or(self.key, key, default)
    }

    /// Resolve a required string parameter.
    pub fn str(&self, key: &str) -> Result<String> {
        self.tree.str(self.key, key)
    }

    /// Resolve a required count parameter.
    pub fn usize(&self, key: &str) -> Result<usize> {
        self.tree.usize(self.key, key)
    }

    /// Resolve a required list parameter.
    pub fn list(&self, key: &str) -> Result<Vec<Value>> {
        self.tree.list(self.key, key)
    }

    /// Resolve a list parameter, empty if absent.
    pub fn list_or_empty(&self, key: &str) -> Result<Vec<Value>> {
        self.tree.list_or_empty(self.key, key)
    }

    /// Set a derived parameter on this node's own data.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.tree.data_mut(self.key).insert(key, value);
    }

    /// Attach a child under this node; it is calculated before this returns.
    pub fn add_child(&mut self, part: impl Part, data: ParamMap) -> Result<NodeKey> {
        self.tree.add_child(self.key, part, data)
    }

    /// Attach a named child under this node.
    pub fn add_named_child(
        &mut self,
        name: impl Into<String>,
        part: impl Part,
        data: ParamMap,
    ) -> Result<NodeKey> {
        self.tree.add_named_child(self.key, name, part, data)
    }

    /// Children of this node, in insertion order.
    pub fn children(&self) -> &[NodeKey] {
        self.tree.children(self.key)
    }

    /// Fatal error helper for an unsupported style/size value.
    pub fn unsupported(&self, what: &'static str, value: impl Into<String>) -> Error {
        Error::Unsupported {
            node: self.name().to_string(),
            what,
            value: value.into(),
        }
    }
}

/// Context handed to [`Part::generate`]: read-only resolved data access plus
/// generation of child geometry.
pub struct GenCx<'a> {
    pub(crate) tree: &'a Assembly,
    pub(crate) key: NodeKey,
}

impl GenCx<'_> {
    /// Display name of this node.
    pub fn name(&self) -> &str {
        self.tree.name(self.key)
    }

    /// Resolve a parameter (own data, then descendants, then ancestors).
    pub fn get(&self, key: &str) -> Option<Value> {
        self.tree.get_data(self.key, key)
    }

    /// Resolve a required numeric parameter.
    pub fn f64(&self, key: &str) -> Result<f64> {
        self.tree.f64(self.key, key)
    }

    /// Resolve a numeric parameter with a fallback.
    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        self.tree.f64_or(self.key, key, default)
    }

    /// Resolve a required string parameter.
    pub fn str(&self, key: &str) -> Result<String> {
        self.tree.str(self.key, key)
    }

    /// Resolve a required count parameter.
    pub fn usize(&self, key: &str) -> Result<usize> {
        self.tree.usize(self.key, key)
    }

    /// Resolve a required list parameter.
    pub fn list(&self, key: &str) -> Result<Vec<Value>> {
        self.tree.list(self.key, key)
    }

    /// Resolve a list parameter, empty if absent.
    pub fn list_or_empty(&self, key: &str) -> Result<Vec<Value>> {
        self.tree.list_or_empty(self.key, key)
    }

    /// Resolve a color parameter with a fallback.
    pub fn rgba_or(&self, key: &str, default: Rgba) -> Result<Rgba> {
        self.tree.rgba_or(self.key, key, default)
    }

    /// Children of this node, in insertion order.
    pub fn children(&self) -> &[NodeKey] {
        self.tree.children(self.key)
    }

    /// Generate another node's geometry (composites position their children).
    pub fn generate(&self, key: NodeKey) -> Result<Shape> {
        self.tree.generate(key)
    }

    /// Fatal error helper for an unsupported style/size value.
    pub fn unsupported(&self, what: &'static str, value: impl Into<String>) -> Error {
        Error::Unsupported {
            node: self.name().to_string(),
            what,
            value: value.into(),
        }
    }
}

impl Assembly {
    /// Generate the geometry of the node at `key`.
    pub fn generate(&self, key: NodeKey) -> Result<Shape> {
        let part = self.nodes[key]
            .part
            .as_ref()
            .expect("part is only absent during its own calculate call");
        part.generate(&GenCx { tree: self, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Assembly;

    #[test]
    fn group_has_no_geometry() {
        let asm = Assembly::new_named("frame", Group, ParamMap::new());
        match asm.generate(asm.root()) {
            Err(Error::NoGeometry { node }) => assert_eq!(node, "frame"),
            other => panic!("expected NoGeometry, got {:?}", other.map(|_| ())),
        }
    }
}
