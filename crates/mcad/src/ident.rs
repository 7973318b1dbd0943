//! Tree-wide unique identifier allocation.
//!
//! Display names are free to collide (a gantry holds many nodes named
//! `M5Bolt`); BOM rows and persistence files need one stable key per node.
//! The registry maps claimed identifiers to their owning node and lives on
//! the tree, rebuilt on every allocation pass so allocation stays idempotent:
//! a node that already owns its identifier keeps it.

use crate::tree::{Assembly, NodeKey};

impl Assembly {
    /// Give every node in the tree a unique identifier.
    ///
    /// Deterministic in traversal order and current identifiers; re-running
    /// never changes an identifier that is already allocated.
    pub fn assign_unique_ids(&mut self) {
        self.id_registry.clear();
        let keys: Vec<NodeKey> = self.walk().collect();
        for key in keys {
            self.make_id(key);
        }
    }

    /// Claim an identifier for one node, probing `name_0, name_1, ...` on
    /// collision with a different node.
    fn make_id(&mut self, key: NodeKey) {
        let base = self.nodes[key].identifier.clone();
        match self.id_registry.get(&base).copied() {
            Some(owner) if owner == key => {}
            None => {
                self.id_registry.insert(base.clone(), key);
                log::debug!("allocated id {} to {}", base, self.nodes[key].name);
                self.nodes[key].identifier = base;
            }
            Some(_) => {
                let mut i = 0usize;
                loop {
                    let candidate = format!("{base}_{i}");
                    match self.id_registry.get(&candidate).copied() {
                        Some(owner) if owner != key => i += 1,
                        _ => {
                            self.id_registry.insert(candidate.clone(), key);
                            log::debug!(
                                "allocated id {} to {}",
                                candidate,
                                self.nodes[key].name
                            );
                            self.nodes[key].identifier = candidate;
                            break;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::Group;
    use crate::value::ParamMap;
    use std::collections::HashSet;

    #[test]
    fn duplicate_names_get_suffixes() {
        let mut asm = Assembly::new_named("frame", Group, ParamMap::new());
        let root = asm.root();
        let a = asm
            .add_named_child(root, "Bolt", Group, ParamMap::new())
            .unwrap();
        let b = asm
            .add_named_child(root, "Bolt", Group, ParamMap::new())
            .unwrap();

        asm.assign_unique_ids();
        assert_eq!(asm.identifier(a), "Bolt");
        assert_eq!(asm.identifier(b), "Bolt_0");
    }

    #[test]
    fn allocation_is_injective() {
        let mut asm = Assembly::new_named("frame", Group, ParamMap::new());
        let root = asm.root();
        for _ in 0..5 {
            let mid = asm
                .add_named_child(root, "rail", Group, ParamMap::new())
                .unwrap();
            asm.add_named_child(mid, "rail", Group, ParamMap::new())
                .unwrap();
        }

        asm.assign_unique_ids();
        let ids: HashSet<String> = asm
            .walk()
            .map(|k| asm.identifier(k).to_string())
            .collect();
        assert_eq!(ids.len(), asm.len());
    }

    #[test]
    fn reallocation_is_stable() {
        let mut asm = Assembly::new_named("frame", Group, ParamMap::new());
        let root = asm.root();
        asm.add_named_child(root, "Bolt", Group, ParamMap::new())
            .unwrap();
        asm.add_named_child(root, "Bolt", Group, ParamMap::new())
            .unwrap();

        asm.assign_unique_ids();
        let before: Vec<String> = asm.walk().map(|k| asm.identifier(k).to_string()).collect();
        asm.assign_unique_ids();
        let after: Vec<String> = asm.walk().map(|k| asm.identifier(k).to_string()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn nodes_added_after_a_pass_are_allocated_on_the_next() {
        let mut asm = Assembly::new_named("frame", Group, ParamMap::new());
        let root = asm.root();
        asm.add_named_child(root, "Bolt", Group, ParamMap::new())
            .unwrap();
        asm.assign_unique_ids();

        let late = asm
            .add_named_child(root, "Bolt", Group, ParamMap::new())
            .unwrap();
        asm.assign_unique_ids();
        assert_eq!(asm.identifier(late), "Bolt_0");
    }
}
