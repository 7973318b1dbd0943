//! The assembly tree: ownership, composition, and traversal.
//!
//! Nodes live in a slotmap arena owned by [`Assembly`]; the parent link is a
//! plain [`NodeKey`] handle, never an owning edge, so the parent/child
//! relation cannot form an ownership cycle.

use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;

use crate::error::Result;
use crate::part::Part;
use crate::value::ParamMap;

new_key_type! {
    /// Handle to a node in an [`Assembly`] arena.
    pub struct NodeKey;
}

/// Calculation lifecycle of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcState {
    /// `calculate` has not reported done yet.
    Pending,
    /// This node's own `calculate` is on the stack right now.
    InProgress,
    /// Derived data is final; `calculate` will not be invoked again.
    Done,
}

pub(crate) struct AsmNode {
    pub(crate) name: String,
    pub(crate) identifier: String,
    pub(crate) data: ParamMap,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) state: CalcState,
    /// Taken out of the arena for the duration of the node's own
    /// `calculate` call; `None` exactly then.
    pub(crate) part: Option<Box<dyn Part>>,
}

/// A tree of parts and sub-assemblies.
///
/// Build the tree with [`Assembly::new`] and [`Assembly::add_child`], then
/// [`finalise`](Assembly::finalise) it and query it for a BOM, per-node
/// parameter files, or generated geometry.
pub struct Assembly {
    pub(crate) nodes: SlotMap<NodeKey, AsmNode>,
    root: NodeKey,
    /// Identifier registry for the whole tree; rebuilt on every
    /// [`assign_unique_ids`](Assembly::assign_unique_ids) pass.
    pub(crate) id_registry: HashMap<String, NodeKey>,
}

impl Assembly {
    /// Create a tree whose root is `part`, labelled by the part itself.
    pub fn new(part: impl Part, data: ParamMap) -> Self {
        Self::new_boxed(Box::new(part), None, data)
    }

    /// Create a tree whose root is `part` with an explicit display name.
    pub fn new_named(name: impl Into<String>, part: impl Part, data: ParamMap) -> Self {
        Self::new_boxed(Box::new(part), Some(name.into()), data)
    }

    /// Create a tree from an already-boxed part (used by kind registries).
    pub fn new_boxed(part: Box<dyn Part>, name: Option<String>, data: ParamMap) -> Self {
        let mut asm = Self {
            nodes: SlotMap::with_key(),
            root: NodeKey::default(),
            id_registry: HashMap::new(),
        };
        asm.root = asm.insert_node(part, name, data);
        asm
    }

    /// The root node of the tree.
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (it never is; a root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert_node(
        &mut self,
        part: Box<dyn Part>,
        name: Option<String>,
        mut data: ParamMap,
    ) -> NodeKey {
        data.merge_defaults(part.defaults());
        let name = name.unwrap_or_else(|| part.label(&data));
        self.nodes.insert(AsmNode {
            identifier: name.clone(),
            name,
            data,
            parent: None,
            children: Vec::new(),
            state: CalcState::Pending,
            part: Some(part),
        })
    }

    /// Attach a new child under `parent`, labelled by the part itself.
    ///
    /// If the parent is mid-calculation the child is eagerly calculated, so
    /// composites can rely on a child's derived data as soon as they have
    /// added it.
    pub fn add_child(&mut self, parent: NodeKey, part: impl Part, data: ParamMap) -> Result<NodeKey> {
        self.add_child_boxed(parent, Box::new(part), None, data)
    }

    /// Attach a new child under `parent` with an explicit display name.
    pub fn add_named_child(
        &mut self,
        parent: NodeKey,
        name: impl Into<String>,
        part: impl Part,
        data: ParamMap,
    ) -> Result<NodeKey> {
        self.add_child_boxed(parent, Box::new(part), Some(name.into()), data)
    }

    /// Attach an already-boxed part (used by kind registries).
    pub fn add_child_boxed(
        &mut self,
        parent: NodeKey,
        part: Box<dyn Part>,
        name: Option<String>,
        data: ParamMap,
    ) -> Result<NodeKey> {
        let key = self.insert_node(part, name, data);
        self.nodes[key].parent = Some(parent);
        self.nodes[parent].children.push(key);
        if self.nodes[parent].state == CalcState::InProgress {
            self.check_calculate(key)?;
        }
        Ok(key)
    }

    /// Display name of a node (not required to be unique).
    pub fn name(&self, key: NodeKey) -> &str {
        &self.nodes[key].name
    }

    /// Current identifier of a node.
    ///
    /// Equal to the name until [`assign_unique_ids`](Assembly::assign_unique_ids)
    /// (or a BOM/persistence pass) has run.
    pub fn identifier(&self, key: NodeKey) -> &str {
        &self.nodes[key].identifier
    }

    /// A node's own parameter map (no hierarchical resolution).
    pub fn data(&self, key: NodeKey) -> &ParamMap {
        &self.nodes[key].data
    }

    /// Mutable access to a node's own parameter map.
    pub fn data_mut(&mut self, key: NodeKey) -> &mut ParamMap {
        &mut self.nodes[key].data
    }

    /// Parent of a node, if it has one.
    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes[key].parent
    }

    /// Children of a node, in insertion order.
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        &self.nodes[key].children
    }

    /// Whether the node is a composite (has children) rather than a leaf part.
    pub fn is_assembly(&self, key: NodeKey) -> bool {
        !self.nodes[key].children.is_empty()
    }

    /// Calculation state of a node.
    pub fn state(&self, key: NodeKey) -> CalcState {
        self.nodes[key].state
    }

    /// Pre-order traversal of the whole tree.
    pub fn walk(&self) -> Walk<'_> {
        self.walk_from(self.root)
    }

    /// Pre-order traversal of the subtree rooted at `from`.
    pub fn walk_from(&self, from: NodeKey) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![from],
        }
    }
}

/// Pre-order iterator over node keys; see [`Assembly::walk`].
pub struct Walk<'a> {
    tree: &'a Assembly,
    stack: Vec<NodeKey>,
}

impl Iterator for Walk<'_> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let key = self.stack.pop()?;
        self.stack
            .extend(self.tree.nodes[key].children.iter().rev().copied());
        Some(key)
    }
}
