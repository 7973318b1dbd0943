//! Per-node persistence: parameter files and geometry documents.
//!
//! Every node writes files named by its unique identifier into a
//! caller-supplied directory; the identifier namespace is the only linkage
//! between files.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::tree::{Assembly, NodeKey};

impl Assembly {
    /// Write each node's parameter data to `<identifier>.json` in `dir`.
    pub fn save_data(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        self.assign_unique_ids();
        let keys: Vec<NodeKey> = self.walk().collect();
        for key in keys {
            let path = dir.join(format!("{}.json", self.identifier(key)));
            let json = serde_json::to_string_pretty(self.data(key))?;
            fs::write(path, json)?;
        }
        Ok(())
    }

    /// Write each geometry-bearing node's generated geometry to
    /// `<identifier>.mcad` (an IR JSON document) in `dir`.
    ///
    /// Nodes that do not generate geometry (plain grouping assemblies) are
    /// skipped; any other generation failure aborts the save.
    pub fn save_components(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        self.assign_unique_ids();
        let keys: Vec<NodeKey> = self.walk().collect();
        for key in keys {
            let shape = match self.generate(key) {
                Ok(shape) => shape,
                Err(Error::NoGeometry { .. }) => continue,
                Err(e) => return Err(e),
            };
            let path = dir.join(format!("{}.mcad", self.identifier(key)));
            fs::write(path, shape.to_document().to_json()?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Sfu1204ScrewAssembly;
    use crate::part::Group;
    use crate::value::{ParamMap, Value};

    #[test]
    fn save_data_writes_one_file_per_node() {
        let mut asm = Assembly::new_named("axis", Group, ParamMap::new());
        let root = asm.root();
        asm.add_child(
            root,
            Sfu1204ScrewAssembly::new(),
            ParamMap::new().with("length", 350.0),
        )
        .unwrap();
        asm.finalise().unwrap();

        let dir = tempfile::tempdir().unwrap();
        asm.save_data(dir.path()).unwrap();

        let count = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, asm.len());

        // Files parse back as parameter maps and carry the derived data.
        let screw_asm = fs::read_to_string(
            dir.path().join("SFU1204ScrewAssembly.json"),
        )
        .unwrap();
        let data: ParamMap = serde_json::from_str(&screw_asm).unwrap();
        assert_eq!(data.get("screw_len"), Some(&Value::Num(350.0)));
    }

    #[test]
    fn save_components_skips_geometryless_nodes() {
        let mut asm = Assembly::new_named("axis", Group, ParamMap::new());
        let root = asm.root();
        asm.add_child(
            root,
            Sfu1204ScrewAssembly::new(),
            ParamMap::new().with("length", 350.0),
        )
        .unwrap();
        asm.finalise().unwrap();

        let dir = tempfile::tempdir().unwrap();
        asm.save_components(dir.path()).unwrap();

        // Everything except the bare Group root produced a document.
        let count = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, asm.len() - 1);
        assert!(!dir.path().join("axis.mcad").exists());

        let doc_json =
            fs::read_to_string(dir.path().join("SFU1204Screw.mcad")).unwrap();
        let doc = mcad_ir::Document::from_json(&doc_json).unwrap();
        assert_eq!(doc.roots.len(), 1);
        assert!(!doc.nodes.is_empty());
    }
}
