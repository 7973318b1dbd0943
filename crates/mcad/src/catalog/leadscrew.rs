//! SFU1204 ball screw drive: screw blank, ball nut, end bearing blocks, and
//! the composite screw assembly that positions them.

use mcad_ir::colors;

use crate::error::Result;
use crate::part::{CalcCx, GenCx, Part};
use crate::shape::Shape;
use crate::tree::NodeKey;
use crate::value::ParamMap;

use super::rails::fixed_part;

/// SFU1204 screw blank: 8 mm input journal, 10 mm bearing journals, 12 mm
/// rolled thread section.
///
/// The thread is drawn as its blank cylinder; the helix adds nothing to
/// clearance or BOM data.
pub fn sfu1204_screw(length: f64) -> Shape {
    let thread_len = length - 15.0 - 39.0 - 10.0;
    let screw = Shape::cylinder("input_journal", 8.0 / 2.0, length, 0)
        + Shape::cylinder("journal", 10.0 / 2.0, length - 15.0 - 10.0, 0).translate(
            0.0,
            0.0,
            15.0,
        )
        + Shape::cylinder("thread", 12.0 / 2.0, thread_len, 0).translate(0.0, 0.0, 15.0 + 39.0);
    screw.color(colors::STEEL)
}

/// SFU1204 ball nut with flanged drill circle and milled flats.
pub fn sfu1204_nut() -> Shape {
    let body = Shape::cylinder("flange", 42.0 / 2.0, 8.0, 0)
        + Shape::cylinder("body", 22.0 / 2.0, 10.1, 0).translate(0.0, 0.0, -10.0)
        + Shape::cylinder("barrel", 21.8 / 2.0, 35.0 - 10.0 - 8.0 + 0.1, 0).translate(
            0.0,
            0.0,
            8.0 - 35.0,
        );

    let drill = Shape::cylinder("flange_drill", 4.5 / 2.0, 10.0, 0).translate(0.0, 16.0, -0.6);
    let flat_width = 30.0;
    let mut cutters = vec![
        Shape::cube("flat", 30.0, 30.0, 30.0).translate(flat_width / 2.0, -15.0, -1.0),
        Shape::cube("flat", 30.0, 30.0, 30.0).translate(-flat_width / 2.0 - 30.0, -15.0, -1.0),
        Shape::cylinder("bore", 12.0 / 2.0, 60.0, 0).translate(0.0, 0.0, -50.0),
    ];
    for angle in [0.0, 45.0, -45.0, 180.0, 180.0 - 45.0, 180.0 + 45.0] {
        cutters.push(drill.rotate(0.0, 0.0, angle));
    }

    body.difference_all(&cutters).color(colors::STEEL)
}

/// BK10 fixed-end bearing block.
pub fn bk10() -> Shape {
    let body = Shape::cube("wings", 32.5, 60.0, 25.0).translate(-22.0, -30.0, 0.0)
        + Shape::cube("boss", 34.0, 34.0, 30.0).translate(-34.0 / 2.0, -34.0 / 2.0, 0.0);

    let bore = Shape::cylinder("bore", 10.0 / 2.0, 32.0, 0).translate(0.0, 0.0, -1.0);
    let mut cutters = vec![bore];
    for y in [-46.0 / 2.0, 46.0 / 2.0] {
        for z in [-13.0 / 2.0 + 25.0 / 2.0, 13.0 / 2.0 + 25.0 / 2.0] {
            cutters.push(
                Shape::cylinder("bolt_hole", 5.5 / 2.0, 40.0, 0)
                    .translate(0.0, 0.0, -1.0)
                    .rotate(0.0, 90.0, 0.0)
                    .translate(-22.0, y, z),
            );
        }
    }

    body.difference_all(&cutters).color(colors::BLACK)
}

/// BF10 floating-end bearing block.
pub fn bf10() -> Shape {
    let body = Shape::cube("wings", 32.5, 60.0, 20.0).translate(-22.0, -30.0, 0.0)
        + Shape::cube("boss", 34.0, 34.0, 20.0).translate(-34.0 / 2.0, -34.0 / 2.0, 0.0);

    let bore = Shape::cylinder("bore", 8.0 / 2.0, 22.0, 0).translate(0.0, 0.0, -1.0);
    let mut cutters = vec![bore];
    for y in [46.0 / 2.0, -46.0 / 2.0] {
        cutters.push(
            Shape::cylinder("bolt_hole", 5.5 / 2.0, 40.0, 0)
                .translate(0.0, 0.0, -1.0)
                .rotate(0.0, 90.0, 0.0)
                .translate(-22.0, y, 20.0 / 2.0),
        );
    }

    body.difference_all(&cutters).color(colors::BLACK)
}

/// FK10 flange-mount fixed bearing.
pub fn fk10() -> Shape {
    let body = Shape::cube("flange", 42.0, 42.0, 10.0).translate(-42.0 / 2.0, -42.0 / 2.0, 17.0)
        + Shape::cylinder("pilot", 34.0 / 2.0, 17.0 + 1.0, 0);

    let bore = Shape::cylinder("bore", 10.0 / 2.0, 29.0, 0).translate(0.0, 0.0, -1.0);
    let drills = Shape::cylinder("flange_drill", 4.0 / 2.0, 14.0, 0)
        .translate(0.0, 0.0, 16.0)
        .circular_pattern(42.0 / 2.0, 4)
        .rotate(0.0, 0.0, 45.0);

    (body - bore - drills).color(colors::BLACK)
}

/// FF10 flange-mount floating bearing.
pub fn ff10() -> Shape {
    let body = Shape::cube("flange", 35.0, 35.0, 7.0).translate(-35.0 / 2.0, -35.0 / 2.0, 5.0)
        + Shape::cylinder("pilot", 28.0 / 2.0, 5.0 + 1.0, 0);

    let bore = Shape::cylinder("bore", 8.0 / 2.0, 14.0, 0).translate(0.0, 0.0, -1.0);
    let drills = Shape::cylinder("flange_drill", 4.0 / 2.0, 14.0, 0)
        .translate(0.0, 0.0, -1.0)
        .circular_pattern(35.0 / 2.0, 4)
        .rotate(0.0, 0.0, 45.0);

    (body - bore - drills).color(colors::BLACK)
}

/// SFU1204 screw blank (`length`).
pub struct Sfu1204Screw;

impl Part for Sfu1204Screw {
    fn kind(&self) -> &'static str {
        "SFU1204Screw"
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        Ok(sfu1204_screw(cx.f64("length")?))
    }
}

fixed_part!(
    /// SFU1204 ball nut.
    Sfu1204Nut,
    "SFU1204Nut",
    sfu1204_nut()
);
fixed_part!(
    /// BK10 fixed-end bearing block.
    Bk10,
    "BK10",
    bk10()
);
fixed_part!(
    /// BF10 floating-end bearing block.
    Bf10,
    "BF10",
    bf10()
);
fixed_part!(
    /// FK10 flange-mount fixed bearing.
    Fk10,
    "FK10",
    fk10()
);
fixed_part!(
    /// FF10 flange-mount floating bearing.
    Ff10,
    "FF10",
    ff10()
);

/// Complete screw drive: screw blank plus fixed and floating end bearings.
///
/// Parameters: `length` (overall screw length), `fixed_nut_type`
/// (`"bk"` or `"fk"`), `floating_nut_type` (`"bf"` or `"ff"`). Calculation
/// derives the bearing seat positions from the screw length and publishes
/// them (plus the flange mounting faces for the flange-mount styles) for
/// surrounding structure to build against.
pub struct Sfu1204ScrewAssembly {
    screw: Option<NodeKey>,
    fixed: Option<NodeKey>,
    floating: Option<NodeKey>,
}

impl Sfu1204ScrewAssembly {
    /// Create the composite; children are spawned during calculation.
    pub fn new() -> Self {
        Self {
            screw: None,
            fixed: None,
            floating: None,
        }
    }

    fn child(&self, slot: Option<NodeKey>, cx: &GenCx<'_>) -> Result<NodeKey> {
        slot.ok_or_else(|| crate::error::Error::NotCalculated {
            node: cx.name().to_string(),
        })
    }
}

impl Default for Sfu1204ScrewAssembly {
    fn default() -> Self {
        Self::new()
    }
}

impl Part for Sfu1204ScrewAssembly {
    fn kind(&self) -> &'static str {
        "SFU1204ScrewAssembly"
    }

    fn defaults(&self) -> ParamMap {
        ParamMap::new()
            .with("fixed_nut_type", "bk")
            .with("floating_nut_type", "bf")
            .with("length", 300.0)
    }

    fn calculate(&mut self, cx: &mut CalcCx<'_>) -> Result<bool> {
        let length = cx.f64("length")?;
        let fixed_pos = 39.0 + 15.0;
        let float_pos = length - 10.0;
        cx.set("screw_len", length);
        cx.set("screw_fixed_pos", fixed_pos);
        cx.set("screw_float_pos", float_pos);

        self.screw = Some(cx.add_child(
            Sfu1204Screw,
            ParamMap::new().with("length", length),
        )?);

        let fixed_type = cx.str("fixed_nut_type")?;
        self.fixed = Some(match fixed_type.as_str() {
            "bk" => cx.add_child(Bk10, ParamMap::new())?,
            "fk" => {
                cx.set("screw_input_bearing_mounting_face", fixed_pos - 10.0);
                cx.add_child(Fk10, ParamMap::new())?
            }
            other => return Err(cx.unsupported("fixed nut type", other)),
        });

        let floating_type = cx.str("floating_nut_type")?;
        self.floating = Some(match floating_type.as_str() {
            "bf" => cx.add_child(Bf10, ParamMap::new())?,
            "ff" => {
                cx.set("screw_end_bearing_mounting_face", float_pos + 7.0);
                cx.add_child(Ff10, ParamMap::new())?
            }
            other => return Err(cx.unsupported("floating nut type", other)),
        });

        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        let fixed_pos = cx.f64("screw_fixed_pos")?;
        let float_pos = cx.f64("screw_float_pos")?;

        let screw = cx.generate(self.child(self.screw, cx)?)?;

        let fixed = cx.generate(self.child(self.fixed, cx)?)?;
        let fixed = match cx.str("fixed_nut_type")?.as_str() {
            "bk" => fixed.translate(0.0, 0.0, fixed_pos - 30.0),
            "fk" => fixed.translate(0.0, 0.0, fixed_pos - 27.0),
            other => return Err(cx.unsupported("fixed nut type", other)),
        };

        let floating = cx.generate(self.child(self.floating, cx)?)?;
        let floating = match cx.str("floating_nut_type")?.as_str() {
            "bf" => floating.translate(0.0, 0.0, float_pos),
            "ff" => floating.mirror_z().translate(0.0, 0.0, float_pos + 12.0),
            other => return Err(cx.unsupported("floating nut type", other)),
        };

        Ok(screw + fixed + floating)
    }
}
