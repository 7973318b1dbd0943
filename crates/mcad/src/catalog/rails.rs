//! Linear motion: supported rails, bearing blocks, round-rail bushings, and
//! miniature profile rail.

use mcad_ir::colors;

use crate::error::Result;
use crate::part::{CalcCx, GenCx, Part};
use crate::shape::Shape;
use crate::value::ParamMap;

use super::profile::{mirror_points_x, pts, shift_points};

/// SBR12 supported round rail section, extruded to `length`.
///
/// `h` is the rail centerline height above the mounting plane.
pub fn sbr12(length: f64, h: f64) -> Shape {
    let half = pts(&[
        (34.0 / 2.0, 0.0),
        (34.0 / 2.0, 4.5),
        (15.0 / 2.0, 4.5),
        (6.0 / 2.0, 15.0),
    ]);
    let outline: Vec<_> = half
        .iter()
        .copied()
        .chain(mirror_points_x(&half, 0.0))
        .collect();
    let support = Shape::extrude("support", shift_points(&outline, 0.0, -h), length);
    let rail = Shape::cylinder("rail", 12.0 / 2.0, length, 0);
    (support + rail).color(colors::STEEL)
}

/// SBR12UU open bearing block.
pub fn sbr12uu() -> Shape {
    let half = pts(&[
        (8.5 / 2.0, 7.0),
        (8.5 / 2.0 + 3.0, 0.0),
        (40.0 / 2.0, 0.0),
        (40.0 / 2.0, 27.6),
    ]);
    let outline: Vec<_> = half
        .iter()
        .copied()
        .chain(mirror_points_x(&half, 0.0))
        .collect();
    let body = Shape::extrude("sbr12uu", shift_points(&outline, 0.0, -27.6 + 17.0), 39.0);

    let bore = Shape::cylinder("bore", 12.0 / 2.0, 41.0, 0).translate(0.0, 0.0, -1.0);
    let mut cutters = vec![bore];
    for x in [14.0, -14.0] {
        for dz in [13.0, -13.0] {
            cutters.push(
                Shape::cylinder("bolt_hole", 5.0 / 2.0, 11.0, 0)
                    .rotate(-90.0, 0.0, 0.0)
                    .translate(x, 27.6 - 17.0 - 1.0, 39.0 / 2.0 + dz),
            );
        }
    }

    body.difference_all(&cutters)
        .translate(0.0, 0.0, -39.0 / 2.0)
        .color(colors::ALUMINIUM)
}

/// SC10UU closed bearing block.
pub fn sc10uu() -> Shape {
    let half = pts(&[
        (40.0, 0.0),
        (40.0, 6.0),
        (39.0, 7.0),
        (39.0, 21.0),
        (32.0, 21.0),
        (27.0, 26.0),
    ]);
    let outline: Vec<_> = half
        .iter()
        .copied()
        .chain(mirror_points_x(&half, 20.0))
        .collect();
    let body = Shape::extrude("sc10uu", shift_points(&outline, -20.0, -13.0), 35.0);

    let bore = Shape::cylinder("bore", 5.0, 37.0, 0).translate(0.0, 0.0, -1.0);
    let mut cutters = vec![bore];
    for x in [-14.0, 14.0] {
        for dz in [-10.5, 10.5] {
            cutters.push(
                Shape::cylinder("bolt_hole", 5.0 / 2.0, 40.0, 0)
                    .rotate(-90.0, 0.0, 0.0)
                    .translate(x, -15.0, 35.0 / 2.0 + dz),
            );
        }
    }

    body.difference_all(&cutters).color(colors::ALUMINIUM)
}

/// Round-rail bushing: a steel sleeve of `od` × `length` with a `bore` hole.
fn bushing(name: &str, od: f64, bore: f64, length: f64) -> Shape {
    (Shape::cylinder(name, od / 2.0, length, 0)
        - Shape::cylinder("bore", bore / 2.0, length + 2.0, 0).translate(0.0, 0.0, -1.0))
    .color(colors::STEEL)
}

/// LM12UU linear bushing.
pub fn lm12uu() -> Shape {
    bushing("lm12uu", 21.0, 12.0, 30.0)
}

/// LM12LUU long linear bushing.
pub fn lm12luu() -> Shape {
    bushing("lm12luu", 21.0, 12.0, 57.0)
}

/// LM10UU linear bushing.
pub fn lm10uu() -> Shape {
    bushing("lm10uu", 19.0, 10.0, 29.0)
}

/// MGN12 miniature profile rail, extruded to `length` and laid along X.
pub fn mgn12_rail(length: f64) -> Shape {
    let h = 13.0 - 5.0;
    let c = 0.25;
    let outline = pts(&[
        (-6.0, 0.0),
        (-6.0, 3.0),
        (-6.0, 4.5),
        (-5.0, 5.5),
        (-4.8, 5.5),
        (-4.8, 6.0),
        (-5.0, 6.0),
        (-6.0, 7.0),
        (-6.0, h - c),
        (-6.0 + c, h),
        (6.0 - c, h),
        (6.0, h - c),
        (6.0, 7.0),
        (5.0, 6.0),
        (4.8, 6.0),
        (4.8, 5.5),
        (5.0, 5.5),
        (6.0, 4.5),
        (6.0, 3.0),
        (6.0, 0.0),
    ]);
    Shape::extrude("mgn12", outline, length)
        .rotate(90.0, 0.0, 90.0)
        .color(colors::STEEL)
}

/// MGN12H carriage, centered on the rail origin.
pub fn mgn12h_slider() -> Shape {
    let w = 27.0;
    let l = 45.4;
    let red_l = 1.0;
    let green_l = 4.0;
    let steel_l = l - 2.0 * (red_l + green_l);

    // Body with end-cap and wiper bands picked out by color.
    let body = Shape::cube("body", steel_l, w, 10.0)
        .translate(-steel_l / 2.0, -w / 2.0, 3.0)
        .color(colors::STEEL);
    let cap_a = Shape::cube("end_cap", green_l, w, 10.0)
        .translate(steel_l / 2.0, -w / 2.0, 3.0)
        .color(mcad_ir::Rgba::rgb(0.0, 0.7, 0.0));
    let wiper_a = Shape::cube("wiper", red_l, w, 10.0)
        .translate(steel_l / 2.0 + green_l, -w / 2.0, 3.0)
        .color(mcad_ir::Rgba::rgb(0.8, 0.0, 0.0));
    let cap_b = Shape::cube("end_cap", green_l, w, 10.0)
        .translate(-steel_l / 2.0 - green_l, -w / 2.0, 3.0)
        .color(mcad_ir::Rgba::rgb(0.0, 0.7, 0.0));
    let wiper_b = Shape::cube("wiper", red_l, w, 10.0)
        .translate(-steel_l / 2.0 - green_l - red_l, -w / 2.0, 3.0)
        .color(mcad_ir::Rgba::rgb(0.8, 0.0, 0.0));
    let carriage = body + cap_a + wiper_a + cap_b + wiper_b;

    // Clear the rail channel and the mounting holes.
    let rail_cut = mgn12_rail(l + 2.0).translate(-1.0 - l / 2.0, 0.0, 0.0);
    let mut cutters = vec![rail_cut];
    for x in [-10.0, 10.0] {
        for y in [-10.0, 10.0] {
            cutters.push(Shape::cylinder("bolt_hole", 2.6 / 2.0, 20.0, 0).translate(x, y, 10.0));
        }
    }

    carriage.difference_all(&cutters)
}

/// SK12 shaft support block.
pub fn sk12() -> Shape {
    let body = Shape::cube("upright", 20.0, 37.5, 14.0).translate(-20.0 / 2.0, -23.0, 0.0)
        + Shape::cube("foot", 42.0, 6.0, 14.0).translate(-42.0 / 2.0, -23.0, 0.0);

    let bore = Shape::cylinder("bore", 12.0 / 2.0, 16.0, 0).translate(0.0, 0.0, -1.0);
    let bolt_a = Shape::cylinder("bolt_hole", 5.5 / 2.0, 8.0, 0)
        .rotate(90.0, 0.0, 0.0)
        .translate(-32.0 / 2.0, -23.0 + 7.0, 14.0 / 2.0);
    let bolt_b = Shape::cylinder("bolt_hole", 5.0 / 2.0, 8.0, 0)
        .rotate(90.0, 0.0, 0.0)
        .translate(32.0 / 2.0, -23.0 + 7.0, 14.0 / 2.0);

    body.difference_all(&[bore, bolt_a, bolt_b])
        .color(colors::ALUMINIUM)
}

macro_rules! fixed_part {
    ($(#[$doc:meta])* $name:ident, $kind:literal, $build:expr) => {
        $(#[$doc])*
        pub struct $name;

        impl Part for $name {
            fn kind(&self) -> &'static str {
                $kind
            }

            fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
                Ok(true)
            }

            fn generate(&self, _cx: &GenCx<'_>) -> Result<Shape> {
                Ok($build)
            }
        }
    };
}

pub(crate) use fixed_part;

/// SBR12 supported rail (`length`, optional `height_above_mounting_plane`).
pub struct Sbr12;

impl Part for Sbr12 {
    fn kind(&self) -> &'static str {
        "SBR12"
    }

    fn defaults(&self) -> ParamMap {
        ParamMap::new().with("height_above_mounting_plane", 20.46)
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        Ok(sbr12(
            cx.f64("length")?,
            cx.f64("height_above_mounting_plane")?,
        ))
    }
}

fixed_part!(
    /// SBR12UU open bearing block.
    Sbr12uu,
    "SBR12UU",
    sbr12uu()
);
fixed_part!(
    /// SC10UU closed bearing block.
    Sc10uu,
    "SC10UU",
    sc10uu()
);
fixed_part!(
    /// LM12UU linear bushing.
    Lm12uu,
    "LM12UU",
    lm12uu()
);
fixed_part!(
    /// LM12LUU long linear bushing.
    Lm12luu,
    "LM12LUU",
    lm12luu()
);
fixed_part!(
    /// LM10UU linear bushing.
    Lm10uu,
    "LM10UU",
    lm10uu()
);
fixed_part!(
    /// MGN12H carriage.
    Mgn12hSlider,
    "MGN12HSlider",
    mgn12h_slider()
);
fixed_part!(
    /// SK12 shaft support block.
    Sk12,
    "SK12",
    sk12()
);

/// MGN12 miniature profile rail (`length`).
pub struct Mgn12Rail;

impl Part for Mgn12Rail {
    fn kind(&self) -> &'static str {
        "MGN12Rail"
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        Ok(mgn12_rail(cx.f64("length")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Assembly;

    #[test]
    fn sbr12_uses_default_mounting_height() {
        let mut asm = Assembly::new(Sbr12, ParamMap::new().with("length", 600.0));
        asm.finalise().unwrap();
        assert_eq!(
            asm.f64(asm.root(), "height_above_mounting_plane").unwrap(),
            20.46
        );
        assert!(asm.generate(asm.root()).is_ok());
    }

    #[test]
    fn fixed_blocks_generate_without_parameters() {
        let mut asm = Assembly::new(Sc10uu, ParamMap::new());
        asm.finalise().unwrap();
        let shape = asm.generate(asm.root()).unwrap();
        // Body, bore, and four bolt holes all present in the DAG.
        assert!(shape.num_nodes() > 10);
    }

    #[test]
    fn bushings_are_hollow_sleeves() {
        for shape in [lm12uu(), lm12luu(), lm10uu()] {
            let doc = shape.to_document();
            let has_difference = doc
                .nodes
                .values()
                .any(|n| matches!(n.op, mcad_ir::CsgOp::Difference { .. }));
            assert!(has_difference);
        }
    }
}
