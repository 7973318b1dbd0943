//! Aluminium t-slot extrusion beams (2020 / 4020 / 4040 profiles).

use mcad_ir::{colors, Vec2};

use crate::error::Result;
use crate::part::{CalcCx, GenCx, Part};
use crate::shape::Shape;

use super::profile::{mirror_points_y, pts, rotate_points, rounded_rect, shift_points};

/// T-slot cutout outline shared by the 2020 and 4020 profiles, slot opening
/// on the +Y side.
fn tslot() -> Vec<Vec2> {
    pts(&[
        (0.0, 3.8),
        (0.0, 2.7),
        (2.4, 0.0),
        (8.6, 0.0),
        (11.0, 2.7),
        (11.0, 3.8),
        (8.6, 3.8),
        (8.6, 6.1),
        (2.4, 6.1),
        (2.4, 3.8),
    ])
}

/// Extrude a cutout outline the full beam length with end clearance.
fn cutter(outline: Vec<Vec2>, length: f64) -> Shape {
    Shape::extrude("slot", outline, length + 2.0).translate(0.0, 0.0, -1.0)
}

/// 20×20 t-slot beam section, extruded to `length`.
pub fn beam20x20(length: f64) -> Shape {
    let slot = tslot();
    let cutouts = [
        shift_points(&mirror_points_y(&slot), 4.5, 6.1),
        shift_points(&slot, 4.5, 13.9),
        shift_points(&rotate_points(&slot, 90.0), 6.1, 4.5),
        shift_points(&rotate_points(&mirror_points_y(&slot), 90.0), 14.0, 4.5),
    ];

    let body = Shape::extrude("beam20x20", rounded_rect(20.0, 20.0, 1.5, 4), length);
    let cutters: Vec<Shape> = cutouts
        .into_iter()
        .map(|outline| cutter(outline, length))
        .collect();
    body.difference_all(&cutters).color(colors::ALUMINIUM)
}

/// Center hollow of the 40×20 profile.
fn hollow() -> Vec<Vec2> {
    pts(&[
        (-7.0, -2.0),
        (-8.0, -2.0),
        (-8.0, 2.0),
        (-7.0, 2.0),
        (-2.0, 7.0),
        (-2.0, 8.0),
        (2.0, 8.0),
        (2.0, 7.0),
        (7.0, 2.0),
        (8.0, 2.0),
        (8.0, -2.0),
        (7.0, -2.0),
        (2.0, -7.0),
        (2.0, -8.0),
        (-2.0, -8.0),
        (-2.0, -7.0),
    ])
}

/// 40×20 t-slot beam section (20 wide, 40 tall), extruded to `length`.
pub fn beam40x20(length: f64) -> Shape {
    let slot = tslot();
    let cutouts = [
        shift_points(&hollow(), 10.0, 20.0),
        shift_points(&mirror_points_y(&slot), 4.5, 6.1),
        shift_points(&slot, 4.5, 33.91),
        shift_points(&rotate_points(&slot, 90.0), 6.1, 4.5),
        shift_points(&rotate_points(&slot, 90.0), 6.1, 24.5),
        shift_points(&rotate_points(&mirror_points_y(&slot), 90.0), 14.0, 4.5),
        shift_points(&rotate_points(&mirror_points_y(&slot), 90.0), 14.0, 24.5),
    ];

    let body = Shape::extrude("beam40x20", rounded_rect(20.0, 40.0, 1.5, 4), length);
    let cutters: Vec<Shape> = cutouts
        .into_iter()
        .map(|outline| cutter(outline, length))
        .collect();
    body.difference_all(&cutters).color(colors::ALUMINIUM)
}

/// 40×40 t-slot beam section, extruded to `length`.
///
/// The section is one quadrant arm repeated by quarter turns, traced as a
/// single outline (the slot throats stay open to the outside).
pub fn beam40x40(length: f64) -> Shape {
    let arm = pts(&[
        (5.5, 4.1),
        (5.5, -4.1),
        (13.0, -10.25),
        (18.2, -10.25),
        (18.2, -6.4),
        (15.5, -6.4),
        (15.5, -4.1),
        (20.0, -4.1),
        (20.0, -20.0),
        (4.1, -20.0),
        (4.1, -15.5),
        (6.4, -15.5),
        (6.4, -18.2),
        (10.25, -18.2),
        (10.25, -13.0),
        (4.1, -5.5),
    ]);

    let mut outline = arm.clone();
    outline.extend(rotate_points(&arm, 90.0));
    outline.extend(rotate_points(&arm, 180.0));
    outline.extend(rotate_points(&arm, 270.0));

    Shape::extrude("beam40x40", outline, length).color(colors::ALUMINIUM)
}

macro_rules! beam_part {
    ($(#[$doc:meta])* $name:ident, $kind:literal, $build:ident) => {
        $(#[$doc])*
        pub struct $name;

        impl Part for $name {
            fn kind(&self) -> &'static str {
                $kind
            }

            fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
                Ok(true)
            }

            fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
                Ok($build(cx.f64("length")?))
            }
        }
    };
}

beam_part!(
    /// 20×20 aluminium t-slot beam (`length`).
    Beam2020,
    "Beam20x20",
    beam20x20
);
beam_part!(
    /// 40×20 aluminium t-slot beam (`length`).
    Beam4020,
    "Beam40x20",
    beam40x20
);
beam_part!(
    /// 40×40 aluminium t-slot beam (`length`).
    Beam4040,
    "Beam40x40",
    beam40x40
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Assembly;
    use crate::value::ParamMap;

    #[test]
    fn beam_sections_build() {
        for shape in [beam20x20(500.0), beam40x20(500.0), beam40x40(500.0)] {
            let doc = shape.to_document();
            assert_eq!(doc.roots.len(), 1);
            assert!(matches!(
                doc.nodes[&doc.roots[0]].op,
                mcad_ir::CsgOp::Color { .. }
            ));
        }
    }

    #[test]
    fn beam4040_outline_is_fourfold() {
        let shape = beam40x40(100.0);
        let doc = shape.to_document();
        let extrude = doc
            .nodes
            .values()
            .find_map(|n| match &n.op {
                mcad_ir::CsgOp::Extrude { profile, height } => Some((profile, height)),
                _ => None,
            })
            .expect("extrude node");
        assert_eq!(extrude.0.len(), 64);
        assert_eq!(*extrude.1, 100.0);
    }

    #[test]
    fn beam_part_resolves_length_from_parent() {
        let mut asm = Assembly::new_named(
            "frame",
            crate::part::Group,
            ParamMap::new().with("length", 420.0),
        );
        let root = asm.root();
        let beam = asm.add_child(root, Beam4040, ParamMap::new()).unwrap();
        asm.finalise().unwrap();
        assert_eq!(asm.name(beam), "Beam40x40");
        assert!(asm.generate(beam).is_ok());
    }
}
