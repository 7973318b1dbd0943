#![warn(missing_docs)]

//! mcad — parametric mechanical part library.
//!
//! Parts (beams, bearings, lead screws, linear rails, nuts, bolts) are nodes
//! in an assembly tree. Each node owns a parameter map; parameters are
//! resolved hierarchically (own data, then nearest descendant, then nearest
//! ancestor), derived parameters are finalised by a bounded fixed-point
//! calculation pass, and the finished tree can be queried for a bill of
//! materials, per-node parameter files, or per-node geometry documents.
//!
//! # Example
//!
//! ```rust
//! use mcad::{catalog, Assembly, Group, ParamMap};
//!
//! let mut asm = Assembly::new_named("z-axis", Group, ParamMap::new());
//! let root = asm.root();
//! asm.add_child(
//!     root,
//!     catalog::Sfu1204ScrewAssembly::new(),
//!     ParamMap::new().with("length", 400.0),
//! )
//! .unwrap();
//! asm.finalise().unwrap();
//! for record in asm.make_bom() {
//!     println!("{} {}", record.identifier, record.name);
//! }
//! ```

pub mod bom;
pub mod calc;
pub mod catalog;
pub mod error;
pub mod ident;
pub mod part;
pub mod persist;
pub mod resolve;
pub mod shape;
pub mod tree;
pub mod value;

pub use bom::{format_bom, BomRecord};
pub use calc::DEFAULT_MAX_TRIES;
pub use error::{Error, Result};
pub use part::{CalcCx, GenCx, Group, Part};
pub use shape::Shape;
pub use tree::{Assembly, CalcState, NodeKey};
pub use value::{ParamMap, Value};

pub use mcad_ir as ir;
