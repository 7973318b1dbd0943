//! Caller-dimensioned generic parts: prisms, drilled plates, angle sections,
//! shafts, and plain ring bearings.

use mcad_ir::colors;

use crate::error::{Error, Result};
use crate::part::{CalcCx, GenCx, Part};
use crate::shape::Shape;
use crate::value::Value;

use super::profile;

/// A solid rectangular block (`width` × `depth` × `height`).
pub struct RectangularPrism;

impl Part for RectangularPrism {
    fn kind(&self) -> &'static str {
        "RectangularPrism"
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        let colour = cx.rgba_or("colour", colors::YELLOW)?;
        let width = cx.f64("width")?;
        let height = cx.f64("height")?;
        let depth = cx.f64("depth")?;
        Ok(Shape::cube(cx.name(), width, depth, height).color(colour))
    }
}

/// A rectangular plate with a table of drills (`[x, y, dia]` rows).
///
/// Negative drill coordinates are measured back from the far edge; they are
/// normalized to absolute positions during calculation so the drill table in
/// the finished tree is unambiguous.
pub struct DrilledPlate;

fn drill_rows(cx_name: &str, rows: &[Value]) -> Result<Vec<[f64; 3]>> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let fields: Option<Vec<f64>> = row
            .as_list()
            .map(|l| l.iter().filter_map(Value::as_f64).collect());
        match fields {
            Some(f) if f.len() == 3 => out.push([f[0], f[1], f[2]]),
            _ => {
                return Err(Error::ParamType {
                    node: cx_name.to_string(),
                    key: "drills".to_string(),
                    expected: "list of [x, y, dia] rows",
                })
            }
        }
    }
    Ok(out)
}

impl Part for DrilledPlate {
    fn kind(&self) -> &'static str {
        "DrilledPlate"
    }

    fn calculate(&mut self, cx: &mut CalcCx<'_>) -> Result<bool> {
        let width = cx.f64("width")?;
        let depth = cx.f64("depth")?;
        let drills = drill_rows(cx.name(), &cx.list_or_empty("drills")?)?;
        let normalized: Vec<Vec<f64>> = drills
            .into_iter()
            .map(|[mut x, mut y, dia]| {
                if x < 0.0 {
                    x += width;
                }
                if y < 0.0 {
                    y += depth;
                }
                vec![x, y, dia]
            })
            .collect();
        cx.set("drills", normalized);
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        let colour = cx.rgba_or("colour", colors::YELLOW)?;
        let width = cx.f64("width")?;
        let height = cx.f64("height")?;
        let depth = cx.f64("depth")?;
        let drills = drill_rows(cx.name(), &cx.list_or_empty("drills")?)?;

        let cutters: Vec<Shape> = drills
            .iter()
            .map(|&[x, y, dia]| {
                Shape::cylinder("drill", dia / 2.0, height + 2.0, 0).translate(x, y, -1.0)
            })
            .collect();
        let plate = Shape::cube(cx.name(), width, depth, height).difference_all(&cutters);
        Ok(plate.color(colour))
    }
}

/// An L-shaped angle section (`width` × `height` legs, `thickness` wall),
/// extruded to `length`.
pub struct Rhs;

impl Part for Rhs {
    fn kind(&self) -> &'static str {
        "RHS"
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        let colour = cx.rgba_or("colour", colors::YELLOW)?;
        let width = cx.f64("width")?;
        let height = cx.f64("height")?;
        let length = cx.f64("length")?;
        let t = cx.f64("thickness")?;

        let outline = profile::pts(&[
            (0.0, 0.0),
            (width, 0.0),
            (width, t),
            (t, t),
            (t, height),
            (0.0, height),
        ]);
        Ok(Shape::extrude(cx.name(), outline, length).color(colour))
    }
}

/// A plain round shaft (`dia` × `length`).
pub struct Shaft;

impl Part for Shaft {
    fn kind(&self) -> &'static str {
        "Shaft"
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        let colour = cx.rgba_or("colour", colors::YELLOW)?;
        let dia = cx.f64("dia")?;
        let length = cx.f64("length")?;
        Ok(Shape::cylinder(cx.name(), dia / 2.0, length, 0).color(colour))
    }
}

/// A deep-groove ball bearing drawn as inner/outer steel races with a black
/// seal ring between them (`bearing_id`, `bearing_od`, `thickness`).
pub struct RingBearing;

impl Part for RingBearing {
    fn kind(&self) -> &'static str {
        "RingBearing"
    }

    fn label(&self, _data: &crate::value::ParamMap) -> String {
        "Bearing".to_string()
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        let ind = cx.f64("bearing_id")?;
        let od = cx.f64("bearing_od")?;
        let t = cx.f64("thickness")?;
        let dr = od / 2.0 / 8.0;

        let outer_race = Shape::cylinder("outer_race", od / 2.0, t, 0)
            - Shape::cylinder("bore", od / 2.0 - dr, t + 2.0, 0).translate(0.0, 0.0, -1.0);
        let inner_race = Shape::cylinder("inner_race", ind / 2.0 + dr, t, 0)
            - Shape::cylinder("bore", ind / 2.0, t + 2.0, 0).translate(0.0, 0.0, -1.0);
        let races = (outer_race + inner_race).color(colors::STEEL);

        let seal = (Shape::cylinder("seal", od / 2.0 - dr / 2.0, t * 0.9, 0)
            - Shape::cylinder("bore", ind / 2.0 + dr / 2.0, t + 2.0, 0).translate(0.0, 0.0, -1.0))
        .color(colors::BLACK);

        Ok(races + seal)
    }
}
