//! The bounded fixed-point calculation engine.
//!
//! A part's derived parameters may depend on data another node has not
//! computed yet (a lead-screw assembly placing its end bearing from the total
//! screw length, a bracket sizing itself from a sibling rail). No single
//! top-down or bottom-up pass settles that in general, so the engine runs
//! full post-order passes over the tree until a pass completes with every
//! node done, bounded by a retry budget so an unresolvable configuration
//! terminates instead of spinning.

use crate::error::{Error, Result};
use crate::tree::{Assembly, CalcState, NodeKey};

/// Default retry budget for [`Assembly::finalise`].
pub const DEFAULT_MAX_TRIES: u32 = 5;

impl Assembly {
    /// Finalise all derived data with the default retry budget.
    pub fn finalise(&mut self) -> Result<()> {
        self.finalise_with(DEFAULT_MAX_TRIES)
    }

    /// Finalise all derived data, running at most `max_tries + 1` passes.
    ///
    /// The last permitted pass collects diagnostics; if the tree still has
    /// not converged the failing node names are logged and returned in
    /// [`Error::Unresolved`]. Nodes whose `calculate` returned an error abort
    /// immediately — only "not yet" results are retried.
    pub fn finalise_with(&mut self, max_tries: u32) -> Result<()> {
        let root = self.root();
        for _ in 0..max_tries {
            if self.recalculate(root, None)? {
                return Ok(());
            }
        }
        let mut failed = Vec::new();
        if self.recalculate(root, Some(&mut failed))? {
            return Ok(());
        }
        Err(Error::Unresolved { failed })
    }

    /// One post-order pass: children before self, skipping nodes already
    /// done. Returns whether the whole subtree reported done.
    fn recalculate(
        &mut self,
        key: NodeKey,
        mut failures: Option<&mut Vec<String>>,
    ) -> Result<bool> {
        let mut done = true;
        let known_children = self.nodes[key].children.clone();
        for &child in &known_children {
            if !self.recalculate(child, failures.as_deref_mut())? {
                done = false;
            }
        }

        if !self.check_calculate(key)? {
            done = false;
            if let Some(failed) = failures.as_deref_mut() {
                let name = self.name(key).to_string();
                log::warn!("calculate failed for {name}");
                failed.push(name);
            }
        }

        // Children attached during this node's own calculate were calculated
        // eagerly; verify their subtrees actually settled so a pass cannot
        // report done over a pending node.
        let all_children = self.nodes[key].children.clone();
        for &child in &all_children[known_children.len()..] {
            if !self.subtree_calculated(child) {
                done = false;
                if let Some(failed) = failures.as_deref_mut() {
                    self.collect_uncalculated(child, failed);
                }
            }
        }

        Ok(done)
    }

    /// Guarded entry point for one node's `calculate`.
    ///
    /// Skips nodes already done (idempotent finalisation). While the call is
    /// on the stack the node is `InProgress`, which is what makes
    /// [`Assembly::add_child`] calculate freshly attached children eagerly.
    pub(crate) fn check_calculate(&mut self, key: NodeKey) -> Result<bool> {
        if self.nodes[key].state == CalcState::Done {
            return Ok(true);
        }
        let mut part = self.nodes[key]
            .part
            .take()
            .expect("calculate re-entered for the same node");
        self.nodes[key].state = CalcState::InProgress;
        let result = part.calculate(&mut crate::part::CalcCx { tree: self, key });
        let node = &mut self.nodes[key];
        node.part = Some(part);
        node.state = match result {
            Ok(true) => CalcState::Done,
            _ => CalcState::Pending,
        };
        result
    }

    fn subtree_calculated(&self, key: NodeKey) -> bool {
        self.nodes[key].state == CalcState::Done
            && self.nodes[key]
                .children
                .iter()
                .all(|&c| self.subtree_calculated(c))
    }

    fn collect_uncalculated(&self, key: NodeKey, out: &mut Vec<String>) {
        if self.nodes[key].state != CalcState::Done {
            let name = self.name(key).to_string();
            log::warn!("calculate failed for {name}");
            out.push(name);
        }
        for &child in &self.nodes[key].children {
            self.collect_uncalculated(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{CalcCx, Group, Part};
    use crate::value::ParamMap;

    /// Publishes a derived parameter on the first pass it runs in.
    struct Source;

    impl Part for Source {
        fn kind(&self) -> &'static str {
            "Source"
        }

        fn calculate(&mut self, cx: &mut CalcCx<'_>) -> Result<bool> {
            cx.set("computed_len", 120.0);
            Ok(true)
        }
    }

    /// Copies a resolved parameter into its own data once it appears.
    struct Relay {
        wants: &'static str,
        publishes: &'static str,
    }

    impl Part for Relay {
        fn kind(&self) -> &'static str {
            "Relay"
        }

        fn calculate(&mut self, cx: &mut CalcCx<'_>) -> Result<bool> {
            match cx.get(self.wants) {
                Some(value) => {
                    cx.set(self.publishes, value);
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    #[test]
    fn child_of_deriving_parent_converges_within_two_passes() {
        // The child runs before its parent (post-order), so the parent's
        // derived value only becomes visible to it on the second pass.
        let mut asm = Assembly::new_named("rig", Source, ParamMap::new());
        let root = asm.root();
        let dependent = asm
            .add_named_child(
                root,
                "dependent",
                Relay {
                    wants: "computed_len",
                    publishes: "mirrored_len",
                },
                ParamMap::new(),
            )
            .unwrap();

        asm.finalise_with(1).unwrap();
        assert_eq!(asm.f64(dependent, "mirrored_len").unwrap(), 120.0);
    }

    #[test]
    fn parent_depending_on_child_converges_in_one_pass() {
        // Children are calculated first, so a composite that derives from a
        // child's computed field settles on the very first pass.
        let mut asm = Assembly::new_named(
            "rig",
            Relay {
                wants: "computed_len",
                publishes: "total_len",
            },
            ParamMap::new(),
        );
        let root = asm.root();
        asm.add_named_child(root, "screw", Source, ParamMap::new())
            .unwrap();

        asm.finalise_with(0).unwrap();
        assert_eq!(asm.f64(root, "total_len").unwrap(), 120.0);
    }

    #[test]
    fn circular_dependency_exhausts_retries() {
        // Parent waits for the child's output and vice versa; neither ever
        // publishes, so the retry budget runs out.
        let mut asm = Assembly::new_named(
            "outer",
            Relay {
                wants: "from_child",
                publishes: "from_parent",
            },
            ParamMap::new(),
        );
        let root = asm.root();
        asm.add_named_child(
            root,
            "inner",
            Relay {
                wants: "from_parent",
                publishes: "from_child",
            },
            ParamMap::new(),
        )
        .unwrap();

        match asm.finalise() {
            Err(Error::Unresolved { failed }) => {
                assert_eq!(failed, vec!["inner".to_string(), "outer".to_string()]);
            }
            other => panic!("expected Unresolved, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn finalise_is_idempotent() {
        let mut asm = Assembly::new_named("rig", Source, ParamMap::new());
        let root = asm.root();
        let dependent = asm
            .add_named_child(
                root,
                "dependent",
                Relay {
                    wants: "computed_len",
                    publishes: "mirrored_len",
                },
                ParamMap::new(),
            )
            .unwrap();

        asm.finalise().unwrap();
        let snapshot = asm.data(dependent).clone();
        asm.finalise().unwrap();
        assert_eq!(asm.data(dependent), &snapshot);
        assert_eq!(asm.state(dependent), CalcState::Done);
    }

    /// Fatal part errors abort finalisation instead of being retried.
    struct Broken;

    impl Part for Broken {
        fn kind(&self) -> &'static str {
            "Broken"
        }

        fn calculate(&mut self, cx: &mut CalcCx<'_>) -> Result<bool> {
            Err(cx.unsupported("bearing type", "zz"))
        }
    }

    #[test]
    fn fatal_error_is_not_retried() {
        let mut asm = Assembly::new_named("rig", Group, ParamMap::new());
        let root = asm.root();
        asm.add_named_child(root, "bad", Broken, ParamMap::new())
            .unwrap();
        match asm.finalise() {
            Err(Error::Unsupported { node, value, .. }) => {
                assert_eq!(node, "bad");
                assert_eq!(value, "zz");
            }
            other => panic!("expected Unsupported, got {:?}", other.map(|_| ())),
        }
    }

    /// Spawns a child mid-calculation; the child resolves data through the
    /// parent that is still on the stack.
    struct Spawner;

    impl Part for Spawner {
        fn kind(&self) -> &'static str {
            "Spawner"
        }

        fn calculate(&mut self, cx: &mut CalcCx<'_>) -> Result<bool> {
            let span = cx.f64("span")?;
            cx.set("derived_span", span / 2.0);
            cx.add_named_child(
                "copy",
                Relay {
                    wants: "derived_span",
                    publishes: "copied_span",
                },
                ParamMap::new(),
            )?;
            Ok(true)
        }
    }

    #[test]
    fn child_added_mid_calculation_is_eagerly_calculated() {
        let mut asm = Assembly::new(Spawner, ParamMap::new().with("span", 80.0));
        asm.finalise().unwrap();

        assert_eq!(asm.len(), 2);
        let child = asm.children(asm.root())[0];
        assert_eq!(asm.state(child), CalcState::Done);
        assert_eq!(asm.f64(child, "copied_span").unwrap(), 40.0);
    }

    #[test]
    fn second_finalise_does_not_duplicate_spawned_children() {
        let mut asm = Assembly::new(Spawner, ParamMap::new().with("span", 80.0));
        asm.finalise().unwrap();
        asm.finalise().unwrap();
        assert_eq!(asm.children(asm.root()).len(), 1);
    }
}
