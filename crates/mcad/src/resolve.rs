//! Hierarchical parameter resolution.
//!
//! The effective value of a key for a node is searched in three stages:
//! the node's own data (always wins), then the subtree below it (nearest
//! descendant wins), then the ancestor chain (nearest ancestor wins). A
//! sub-assembly can therefore centrally configure its children, a specific
//! part can know its own size, and the root can carry global style data,
//! all through the same lookup.

use mcad_ir::Rgba;

use crate::error::{Error, Result};
use crate::tree::{Assembly, NodeKey};
use crate::value::Value;

impl Assembly {
    /// Resolve the effective value of `key` for `node`.
    ///
    /// Own data is a depth-0 match and beats everything; otherwise the
    /// shallowest descendant match wins (ties by traversal order, which
    /// callers must not rely on); otherwise the nearest ancestor with the
    /// key; otherwise `None`.
    pub fn get_data(&self, node: NodeKey, key: &str) -> Option<Value> {
        let mut matches = Vec::new();
        self.collect_down(node, key, 0, &mut matches);
        let mut best: Option<(Value, usize)> = None;
        for (value, depth) in matches {
            let better = match &best {
                Some((_, best_depth)) => depth < *best_depth,
                None => true,
            };
            if better {
                best = Some((value, depth));
            }
        }
        if let Some((value, _)) = best {
            return Some(value);
        }
        self.get_data_up(node, key)
    }

    /// Resolve `key` for `node`, falling back to `default`.
    pub fn get_data_or(&self, node: NodeKey, key: &str, default: impl Into<Value>) -> Value {
        self.get_data(node, key).unwrap_or_else(|| default.into())
    }

    /// Resolve a required parameter, failing fast if it is missing.
    pub fn require(&self, node: NodeKey, key: &str) -> Result<Value> {
        self.get_data(node, key).ok_or_else(|| Error::MissingParam {
            node: self.name(node).to_string(),
            key: key.to_string(),
        })
    }

    /// Subtree search: record `(value, depth)` for every match, without
    /// descending below a node that defines the key itself.
    fn collect_down(
        &self,
        node: NodeKey,
        key: &str,
        depth: usize,
        out: &mut Vec<(Value, usize)>,
    ) {
        if let Some(value) = self.data(node).get(key) {
            out.push((value.clone(), depth));
            return;
        }
        for &child in self.children(node) {
            self.collect_down(child, key, depth + 1, out);
        }
    }

    /// Upward search: this node's own data, then each ancestor's in turn.
    fn get_data_up(&self, node: NodeKey, key: &str) -> Option<Value> {
        if let Some(value) = self.data(node).get(key) {
            return Some(value.clone());
        }
        self.parent(node)
            .and_then(|parent| self.get_data_up(parent, key))
    }

    // =========================================================================
    // Typed accessors — shape mismatches fail fast like missing parameters
    // =========================================================================

    fn type_err(&self, node: NodeKey, key: &str, expected: &'static str) -> Error {
        Error::ParamType {
            node: self.name(node).to_string(),
            key: key.to_string(),
            expected,
        }
    }

    /// Resolve a required numeric parameter.
    pub fn f64(&self, node: NodeKey, key: &str) -> Result<f64> {
        self.require(node, key)?
            .as_f64()
            .ok_or_else(|| self.type_err(node, key, "number"))
    }

    /// Resolve a numeric parameter with a fallback.
    pub fn f64_or(&self, node: NodeKey, key: &str, default: f64) -> Result<f64> {
        match self.get_data(node, key) {
            Some(value) => value
                .as_f64()
                .ok_or_else(|| self.type_err(node, key, "number")),
            None => Ok(default),
        }
    }

    /// Resolve a required string parameter.
    pub fn str(&self, node: NodeKey, key: &str) -> Result<String> {
        self.require(node, key)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.type_err(node, key, "string"))
    }

    /// Resolve a required non-negative count parameter.
    pub fn usize(&self, node: NodeKey, key: &str) -> Result<usize> {
        let n = self.f64(node, key)?;
        if n < 0.0 {
            return Err(self.type_err(node, key, "non-negative count"));
        }
        Ok(n.round() as usize)
    }

    /// Resolve a required list parameter.
    pub fn list(&self, node: NodeKey, key: &str) -> Result<Vec<Value>> {
        self.require(node, key)?
            .as_list()
            .map(<[Value]>::to_vec)
            .ok_or_else(|| self.type_err(node, key, "list"))
    }

    /// Resolve a list parameter, empty if absent.
    pub fn list_or_empty(&self, node: NodeKey, key: &str) -> Result<Vec<Value>> {
        match self.get_data(node, key) {
            Some(value) => value
                .as_list()
                .map(<[Value]>::to_vec)
                .ok_or_else(|| self.type_err(node, key, "list")),
            None => Ok(Vec::new()),
        }
    }

    /// Resolve a color parameter with a fallback.
    pub fn rgba_or(&self, node: NodeKey, key: &str, default: Rgba) -> Result<Rgba> {
        match self.get_data(node, key) {
            Some(value) => value
                .as_rgba()
                .ok_or_else(|| self.type_err(node, key, "color")),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::Group;
    use crate::value::ParamMap;

    /// root(material=steel) -> mid -> {a(width=10), b(width=20)}
    fn fixture() -> (Assembly, NodeKey) {
        let mut asm = Assembly::new_named(
            "root",
            Group,
            ParamMap::new().with("material", "steel"),
        );
        let root = asm.root();
        let mid = asm
            .add_named_child(root, "mid", Group, ParamMap::new())
            .unwrap();
        asm.add_named_child(mid, "a", Group, ParamMap::new().with("width", 10.0))
            .unwrap();
        asm.add_named_child(mid, "b", Group, ParamMap::new().with("width", 20.0))
            .unwrap();
        (asm, mid)
    }

    #[test]
    fn own_data_wins() {
        let (mut asm, mid) = fixture();
        asm.data_mut(mid).insert("width", 99.0);
        // Descendants have width too, but depth 0 beats them.
        assert_eq!(asm.f64(mid, "width").unwrap(), 99.0);
    }

    #[test]
    fn nearest_descendant_wins_with_stable_tie_break() {
        let (asm, mid) = fixture();
        // Both children define width at depth 1; first in child order wins.
        assert_eq!(asm.f64(mid, "width").unwrap(), 10.0);
        // Re-resolving is stable.
        assert_eq!(asm.f64(mid, "width").unwrap(), 10.0);
    }

    #[test]
    fn shallower_descendant_beats_deeper() {
        let mut asm = Assembly::new_named("root", Group, ParamMap::new());
        let root = asm.root();
        let deep = asm
            .add_named_child(root, "deep", Group, ParamMap::new())
            .unwrap();
        asm.add_named_child(deep, "leaf", Group, ParamMap::new().with("len", 1.0))
            .unwrap();
        asm.add_named_child(root, "shallow", Group, ParamMap::new().with("len", 2.0))
            .unwrap();
        assert_eq!(asm.f64(root, "len").unwrap(), 2.0);
    }

    #[test]
    fn no_descent_below_a_defining_node() {
        let mut asm = Assembly::new_named("root", Group, ParamMap::new());
        let root = asm.root();
        let holder = asm
            .add_named_child(root, "holder", Group, ParamMap::new().with("len", 5.0))
            .unwrap();
        // A deeper value under a defining node is shadowed by it.
        asm.add_named_child(holder, "inner", Group, ParamMap::new().with("len", 7.0))
            .unwrap();
        assert_eq!(asm.f64(root, "len").unwrap(), 5.0);
        // But the inner node itself still sees its own value.
        let inner = asm.children(holder)[0];
        assert_eq!(asm.f64(inner, "len").unwrap(), 7.0);
    }

    #[test]
    fn ancestor_fallback_and_default() {
        let (asm, mid) = fixture();
        let a = asm.children(mid)[0];
        // "material" lives on the root only.
        assert_eq!(asm.str(a, "material").unwrap(), "steel");
        // Unknown key falls back to the supplied default.
        assert_eq!(asm.f64_or(a, "wall", 2.0).unwrap(), 2.0);
        assert_eq!(
            asm.get_data_or(a, "finish", "raw").as_str(),
            Some("raw")
        );
    }

    #[test]
    fn missing_required_parameter_fails_fast() {
        let (asm, mid) = fixture();
        match asm.f64(mid, "nonexistent") {
            Err(Error::MissingParam { node, key }) => {
                assert_eq!(node, "mid");
                assert_eq!(key, "nonexistent");
            }
            other => panic!("expected MissingParam, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn type_mismatch_fails_fast() {
        let (asm, mid) = fixture();
        let a = asm.children(mid)[0];
        match asm.str(a, "width") {
            Err(Error::ParamType { key, expected, .. }) => {
                assert_eq!(key, "width");
                assert_eq!(expected, "string");
            }
            other => panic!("expected ParamType, got {:?}", other.map(|_| ())),
        }
    }
}
