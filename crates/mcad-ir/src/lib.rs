//! Intermediate representation for mcad part geometry.
//!
//! This crate defines the declarative CSG IR that every part generator in the
//! mcad catalog emits. It is purely descriptive — no mesh data, just a graph
//! of primitives, boolean combinations, and transforms. Anything that wants
//! to render a part consumes one of these documents.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node in the IR graph.
pub type NodeId = u64;

/// 3D vector with f64 components (conventionally millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// 2D point used by extrusion profiles (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vec2 {
    /// Create a new Vec2.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// RGBA color, components in 0.0..1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Opacity (1.0 = opaque).
    pub a: f64,
}

impl Rgba {
    /// Opaque color from RGB components.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from RGBA components.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Stock colors for common part materials.
pub mod colors {
    use super::Rgba;

    /// Anodized aluminium extrusion.
    pub const ALUMINIUM: Rgba = Rgba {
        r: 0.77,
        g: 0.77,
        b: 0.8,
        a: 1.0,
    };
    /// Bright steel.
    pub const STEEL: Rgba = Rgba {
        r: 0.7,
        g: 0.7,
        b: 0.7,
        a: 1.0,
    };
    /// Black oxide / cast housings.
    pub const BLACK: Rgba = Rgba {
        r: 0.1,
        g: 0.1,
        b: 0.1,
        a: 1.0,
    };
    /// Fallback for parts with no material assigned.
    pub const YELLOW: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 0.0,
        a: 1.0,
    };
    /// See-through marker for envelopes and clearances.
    pub const TRANSPARENT_YELLOW: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 0.0,
        a: 0.3,
    };
}

/// CSG operation — the core building block of the IR graph.
///
/// Each variant is either a leaf primitive or a combining/transform operation
/// that references child nodes by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CsgOp {
    /// Axis-aligned box with one corner at the origin.
    Cube {
        /// Size along each axis.
        size: Vec3,
    },
    /// Cylinder along the Z axis, base on the XY plane.
    Cylinder {
        /// Radius of the cylinder.
        radius: f64,
        /// Height of the cylinder.
        height: f64,
        /// Number of circular segments (0 = auto).
        segments: u32,
    },
    /// Sphere centered at origin.
    Sphere {
        /// Radius of the sphere.
        radius: f64,
        /// Number of circular segments (0 = auto).
        segments: u32,
    },
    /// Cone along the Z axis, base on the XY plane.
    Cone {
        /// Bottom radius.
        radius_bottom: f64,
        /// Top radius (0 for a point).
        radius_top: f64,
        /// Height of the cone.
        height: f64,
        /// Number of circular segments (0 = auto).
        segments: u32,
    },
    /// Linear extrusion of a closed 2D polygon along +Z.
    Extrude {
        /// Outline points in the XY plane, in order; the last point closes
        /// back to the first implicitly.
        profile: Vec<Vec2>,
        /// Extrusion height.
        height: f64,
    },
    /// Empty geometry (identity for union).
    Empty,
    /// Boolean union of two geometries.
    Union {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// Boolean difference (left minus right).
    Difference {
        /// Left operand (base).
        left: NodeId,
        /// Right operand (subtracted).
        right: NodeId,
    },
    /// Boolean intersection of two geometries.
    Intersection {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// Translation by an offset vector.
    Translate {
        /// Child node to translate.
        child: NodeId,
        /// Translation offset.
        offset: Vec3,
    },
    /// Rotation by Euler angles in degrees (applied as X, then Y, then Z).
    Rotate {
        /// Child node to rotate.
        child: NodeId,
        /// Rotation angles in degrees.
        angles: Vec3,
    },
    /// Non-uniform scale.
    Scale {
        /// Child node to scale.
        child: NodeId,
        /// Scale factors per axis.
        factor: Vec3,
    },
    /// Color/material tint applied to a subtree.
    Color {
        /// Child node to tint.
        child: NodeId,
        /// The tint.
        color: Rgba,
    },
}

/// A node in the IR graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Optional human-readable name.
    pub name: Option<String>,
    /// The operation this node represents.
    pub op: CsgOp,
}

/// An mcad geometry document — the `.mcad` file format.
///
/// Contains the full IR graph of one part (or one assembly level) with one or
/// more root nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format version string (e.g. "0.3").
    pub version: String,
    /// All nodes in the graph, keyed by [`NodeId`].
    pub nodes: HashMap<NodeId, Node>,
    /// Root nodes of the document.
    pub roots: Vec<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: "0.3".to_string(),
            nodes: HashMap::new(),
            roots: Vec::new(),
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
