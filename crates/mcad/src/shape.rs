//! The [`Shape`] builder — records part geometry as an IR construction DAG.
//!
//! Every constructor and operation appends to a private node map and returns
//! a new shape whose root is the new node, so a finished shape carries its
//! full parametric construction history. Extract it with
//! [`Shape::to_document`].

use mcad_ir::{CsgOp, Document, Node, NodeId, Rgba, Vec2, Vec3};
use nalgebra::Vector3;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global atomic counter for unique IR node IDs.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a globally unique [`NodeId`].
fn alloc_node_id() -> NodeId {
    NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A named solid-geometry description.
///
/// Create primitives with [`Shape::cube`], [`Shape::cylinder`],
/// [`Shape::extrude`], etc., then combine them with CSG operations
/// ([`Shape::union`], [`Shape::difference`], [`Shape::intersection`]) or the
/// operator shorthands (`+`, `-`, `&`), and position them with transforms.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Human-readable name (carried into the IR nodes).
    pub name: String,
    root: NodeId,
    nodes: HashMap<NodeId, Node>,
}

impl Shape {
    // =========================================================================
    // Internal constructors
    // =========================================================================

    fn with_ir(name: String, root: NodeId, nodes: HashMap<NodeId, Node>) -> Self {
        Self { name, root, nodes }
    }

    /// Create a leaf IR node (primitive or empty) and return `(id, nodes)`.
    fn make_leaf(name: &str, op: CsgOp) -> (NodeId, HashMap<NodeId, Node>) {
        let id = alloc_node_id();
        let mut nodes = HashMap::new();
        nodes.insert(
            id,
            Node {
                id,
                name: Some(name.to_string()),
                op,
            },
        );
        (id, nodes)
    }

    /// Build a binary CSG node, merging both children's IR maps.
    fn make_binary(
        name: &str,
        left: &Shape,
        right: &Shape,
        op_fn: impl FnOnce(NodeId, NodeId) -> CsgOp,
    ) -> (NodeId, HashMap<NodeId, Node>) {
        let id = alloc_node_id();
        let mut nodes = left.nodes.clone();
        nodes.extend(right.nodes.iter().map(|(&k, v)| (k, v.clone())));
        nodes.insert(
            id,
            Node {
                id,
                name: Some(name.to_string()),
                op: op_fn(left.root, right.root),
            },
        );
        (id, nodes)
    }

    /// Build a unary transform node, cloning the child's IR map.
    fn make_unary(
        name: &str,
        child: &Shape,
        op_fn: impl FnOnce(NodeId) -> CsgOp,
    ) -> (NodeId, HashMap<NodeId, Node>) {
        let id = alloc_node_id();
        let mut nodes = child.nodes.clone();
        nodes.insert(
            id,
            Node {
                id,
                name: Some(name.to_string()),
                op: op_fn(child.root),
            },
        );
        (id, nodes)
    }

    // =========================================================================
    // Public constructors
    // =========================================================================

    /// Create an empty shape.
    pub fn empty(name: impl Into<String>) -> Self {
        let name = name.into();
        let (id, nodes) = Self::make_leaf(&name, CsgOp::Empty);
        Self::with_ir(name, id, nodes)
    }

    /// Create a box with one corner at the origin.
    pub fn cube(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        let name = name.into();
        let (id, nodes) = Self::make_leaf(
            &name,
            CsgOp::Cube {
                size: Vec3::new(x, y, z),
            },
        );
        Self::with_ir(name, id, nodes)
    }

    /// Create a cylinder along the Z axis, base on the XY plane.
    pub fn cylinder(name: impl Into<String>, radius: f64, height: f64, segments: u32) -> Self {
        let name = name.into();
        let (id, nodes) = Self::make_leaf(
            &name,
            CsgOp::Cylinder {
                radius,
                height,
                segments,
            },
        );
        Self::with_ir(name, id, nodes)
    }

    /// Create a cone/tapered cylinder.
    pub fn cone(
        name: impl Into<String>,
        radius_bottom: f64,
        radius_top: f64,
        height: f64,
        segments: u32,
    ) -> Self {
        let name = name.into();
        let (id, nodes) = Self::make_leaf(
            &name,
            CsgOp::Cone {
                radius_bottom,
                radius_top,
                height,
                segments,
            },
        );
        Self::with_ir(name, id, nodes)
    }

    /// Create a sphere centered at origin.
    pub fn sphere(name: impl Into<String>, radius: f64, segments: u32) -> Self {
        let name = name.into();
        let (id, nodes) = Self::make_leaf(&name, CsgOp::Sphere { radius, segments });
        Self::with_ir(name, id, nodes)
    }

    /// Extrude a closed 2D outline along +Z.
    pub fn extrude(name: impl Into<String>, profile: Vec<Vec2>, height: f64) -> Self {
        let name = name.into();
        let (id, nodes) = Self::make_leaf(&name, CsgOp::Extrude { profile, height });
        Self::with_ir(name, id, nodes)
    }

    // =========================================================================
    // CSG operations
    // =========================================================================

    /// Boolean union (self + other).
    pub fn union(&self, other: &Shape) -> Self {
        let result_name = format!("{}-union", self.name);
        let (id, nodes) = Self::make_binary(&result_name, self, other, |l, r| CsgOp::Union {
            left: l,
            right: r,
        });
        Self::with_ir(result_name, id, nodes)
    }

    /// Boolean difference (self - other).
    pub fn difference(&self, other: &Shape) -> Self {
        let result_name = format!("{}-diff", self.name);
        let (id, nodes) = Self::make_binary(&result_name, self, other, |l, r| CsgOp::Difference {
            left: l,
            right: r,
        });
        Self::with_ir(result_name, id, nodes)
    }

    /// Boolean intersection.
    pub fn intersection(&self, other: &Shape) -> Self {
        let result_name = format!("{}-intersect", self.name);
        let (id, nodes) = Self::make_binary(&result_name, self, other, |l, r| {
            CsgOp::Intersection { left: l, right: r }
        });
        Self::with_ir(result_name, id, nodes)
    }

    /// Subtract every shape in `cutters` in turn.
    pub fn difference_all<'a>(self, cutters: impl IntoIterator<Item = &'a Shape>) -> Self {
        cutters
            .into_iter()
            .fold(self, |acc, cutter| acc.difference(cutter))
    }

    /// Union every shape in `parts` in turn.
    pub fn union_all<'a>(self, parts: impl IntoIterator<Item = &'a Shape>) -> Self {
        parts.into_iter().fold(self, |acc, part| acc.union(part))
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Translate the shape.
    pub fn translate(&self, x: f64, y: f64, z: f64) -> Self {
        let (id, nodes) = Self::make_unary(&self.name, self, |child| CsgOp::Translate {
            child,
            offset: Vec3::new(x, y, z),
        });
        Self::with_ir(self.name.clone(), id, nodes)
    }

    /// Translate by vector.
    pub fn translate_vec(&self, v: Vector3<f64>) -> Self {
        self.translate(v.x, v.y, v.z)
    }

    /// Rotate the shape (Euler angles in degrees, applied X then Y then Z).
    pub fn rotate(&self, x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        let (id, nodes) = Self::make_unary(&self.name, self, |child| CsgOp::Rotate {
            child,
            angles: Vec3::new(x_deg, y_deg, z_deg),
        });
        Self::with_ir(self.name.clone(), id, nodes)
    }

    /// Scale the shape.
    pub fn scale(&self, x: f64, y: f64, z: f64) -> Self {
        let (id, nodes) = Self::make_unary(&self.name, self, |child| CsgOp::Scale {
            child,
            factor: Vec3::new(x, y, z),
        });
        Self::with_ir(self.name.clone(), id, nodes)
    }

    /// Uniform scale.
    pub fn scale_uniform(&self, s: f64) -> Self {
        self.scale(s, s, s)
    }

    /// Mirror across the YZ plane (negate X).
    pub fn mirror_x(&self) -> Self {
        self.scale(-1.0, 1.0, 1.0)
    }

    /// Mirror across the XZ plane (negate Y).
    pub fn mirror_y(&self) -> Self {
        self.scale(1.0, -1.0, 1.0)
    }

    /// Mirror across the XY plane (negate Z).
    pub fn mirror_z(&self) -> Self {
        self.scale(1.0, 1.0, -1.0)
    }

    /// Tint the shape.
    pub fn color(&self, color: Rgba) -> Self {
        let (id, nodes) =
            Self::make_unary(&self.name, self, |child| CsgOp::Color { child, color });
        Self::with_ir(self.name.clone(), id, nodes)
    }

    // =========================================================================
    // Patterns
    // =========================================================================

    /// Union of `count` copies spaced by `(dx, dy, dz)`.
    ///
    /// The first copy is at the original position; each subsequent copy is
    /// offset by an additional `(dx, dy, dz)`.
    pub fn linear_pattern(&self, dx: f64, dy: f64, dz: f64, count: usize) -> Self {
        let mut result = self.clone();
        for i in 1..count {
            let n = i as f64;
            result = result.union(&self.translate(dx * n, dy * n, dz * n));
        }
        result
    }

    /// Union of `count` copies rotated evenly around the Z axis.
    ///
    /// Each copy is translated outward along X by `radius`, then rotated by
    /// `360° / count` increments.
    pub fn circular_pattern(&self, radius: f64, count: usize) -> Self {
        let mut result = Shape::empty(format!("{}-pattern", self.name));
        for i in 0..count {
            let angle = 360.0 * (i as f64) / (count as f64);
            let copy = self.translate(radius, 0.0, 0.0).rotate(0.0, 0.0, angle);
            result = result.union(&copy);
        }
        result
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of IR nodes recorded for this shape.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Extract the IR document for this shape.
    ///
    /// The document contains all nodes in the construction DAG with this
    /// shape's root as the single document root.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.nodes = self.nodes.clone();
        doc.roots.push(self.root);
        doc
    }

    /// The root operation of this shape's construction DAG.
    pub fn root_op(&self) -> &CsgOp {
        &self.nodes[&self.root].op
    }
}

// =============================================================================
// Operator overloads for ergonomic CSG
// =============================================================================

/// Union: `&a + &b`
impl std::ops::Add for &Shape {
    type Output = Shape;
    fn add(self, rhs: &Shape) -> Shape {
        self.union(rhs)
    }
}

/// Union: `a + b`
impl std::ops::Add for Shape {
    type Output = Shape;
    fn add(self, rhs: Shape) -> Shape {
        self.union(&rhs)
    }
}

/// Difference: `&a - &b`
impl std::ops::Sub for &Shape {
    type Output = Shape;
    fn sub(self, rhs: &Shape) -> Shape {
        self.difference(rhs)
    }
}

/// Difference: `a - b`
impl std::ops::Sub for Shape {
    type Output = Shape;
    fn sub(self, rhs: Shape) -> Shape {
        self.difference(&rhs)
    }
}

/// Intersection: `&a & &b`
impl std::ops::BitAnd for &Shape {
    type Output = Shape;
    fn bitand(self, rhs: &Shape) -> Shape {
        self.intersection(rhs)
    }
}

/// Intersection: `a & b`
impl std::ops::BitAnd for Shape {
    type Output = Shape;
    fn bitand(self, rhs: Shape) -> Shape {
        self.intersection(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_document() {
        let cube = Shape::cube("box", 10.0, 20.0, 30.0);
        let doc = cube.to_document();
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.roots.len(), 1);
        let root = &doc.nodes[&doc.roots[0]];
        assert_eq!(root.name, Some("box".to_string()));
        match &root.op {
            CsgOp::Cube { size } => {
                assert_eq!(size.x, 10.0);
                assert_eq!(size.y, 20.0);
                assert_eq!(size.z, 30.0);
            }
            other => panic!("expected Cube, got {other:?}"),
        }
    }

    #[test]
    fn csg_dag() {
        let cube = Shape::cube("box", 10.0, 10.0, 10.0);
        let cyl = Shape::cylinder("hole", 3.0, 15.0, 32);
        let result = cube.difference(&cyl);
        let doc = result.to_document();
        // 3 nodes: Cube, Cylinder, Difference
        assert_eq!(doc.nodes.len(), 3);
        let root = &doc.nodes[&doc.roots[0]];
        match &root.op {
            CsgOp::Difference { left, right } => {
                assert!(matches!(doc.nodes[left].op, CsgOp::Cube { .. }));
                assert!(matches!(doc.nodes[right].op, CsgOp::Cylinder { .. }));
            }
            other => panic!("expected Difference, got {other:?}"),
        }
    }

    #[test]
    fn transform_chain() {
        let profile = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(12.0, 0.0),
            Vec2::new(12.0, 8.0),
        ];
        let wedge = Shape::extrude("wedge", profile, 40.0)
            .translate(1.0, 2.0, 3.0)
            .rotate(0.0, 0.0, 45.0);
        let doc = wedge.to_document();
        assert_eq!(doc.nodes.len(), 3);
        let root = &doc.nodes[&doc.roots[0]];
        match &root.op {
            CsgOp::Rotate { child, angles } => {
                assert_eq!(angles.z, 45.0);
                match &doc.nodes[child].op {
                    CsgOp::Translate {
                        child: inner,
                        offset,
                    } => {
                        assert_eq!(offset.x, 1.0);
                        assert!(matches!(doc.nodes[inner].op, CsgOp::Extrude { .. }));
                    }
                    other => panic!("expected Translate, got {other:?}"),
                }
            }
            other => panic!("expected Rotate, got {other:?}"),
        }
    }

    #[test]
    fn operator_overloads() {
        let a = Shape::cube("a", 10.0, 10.0, 10.0);
        let b = Shape::cube("b", 10.0, 10.0, 10.0).translate(5.0, 0.0, 0.0);

        assert!(matches!((&a + &b).root_op(), CsgOp::Union { .. }));
        assert!(matches!((&a - &b).root_op(), CsgOp::Difference { .. }));
        assert!(matches!((&a & &b).root_op(), CsgOp::Intersection { .. }));

        let owned = a + b;
        assert!(matches!(owned.root_op(), CsgOp::Union { .. }));
    }

    #[test]
    fn color_wraps_subtree() {
        let shaft = Shape::cylinder("shaft", 5.0, 300.0, 0).color(mcad_ir::colors::STEEL);
        match shaft.root_op() {
            CsgOp::Color { color, .. } => assert_eq!(*color, mcad_ir::colors::STEEL),
            other => panic!("expected Color, got {other:?}"),
        }
    }

    #[test]
    fn mirror_is_negative_scale() {
        let cube = Shape::cube("c", 1.0, 1.0, 1.0).mirror_z();
        match cube.root_op() {
            CsgOp::Scale { factor, .. } => {
                assert_eq!((factor.x, factor.y, factor.z), (1.0, 1.0, -1.0));
            }
            other => panic!("expected Scale, got {other:?}"),
        }
    }

    #[test]
    fn circular_pattern_counts() {
        let drill = Shape::cylinder("drill", 2.0, 14.0, 0);
        let ring = drill.circular_pattern(21.0, 4);
        // Empty seed + 4 × (translate + rotate) + 4 unions + 1 primitive
        // shared across copies... every copy clones the primitive node, so
        // just sanity-check the document is well formed and rooted.
        let doc = ring.to_document();
        assert_eq!(doc.roots.len(), 1);
        assert!(doc.nodes.len() >= 9);
    }

    #[test]
    fn document_roundtrip() {
        let plate = Shape::cube("plate", 40.0, 20.0, 6.0)
            - Shape::cylinder("drill", 2.5, 8.0, 0).translate(10.0, 10.0, -1.0);
        let doc = plate.to_document();
        let json = doc.to_json().expect("serialize");
        let restored = Document::from_json(&json).expect("deserialize");
        assert_eq!(doc, restored);
    }
}
