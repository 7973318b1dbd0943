//! Stepper motors and drive pulleys.

use mcad_ir::colors;
use std::f64::consts::PI;

use crate::error::Result;
use crate::part::{CalcCx, GenCx, Part};
use crate::shape::Shape;
use crate::value::ParamMap;

/// NEMA stepper body hanging below z = 0 with the output shaft stub above.
///
/// Only the NEMA 23 frame (57 mm square) is dimensioned.
pub fn nema23(body_len: f64, shaft_dia: f64) -> Shape {
    let w = 57.0;
    let body = Shape::cube("body", w, w, body_len)
        .translate(-w / 2.0, -w / 2.0, -body_len)
        .color(colors::BLACK);
    let shaft = Shape::cylinder("shaft", shaft_dia / 2.0, 21.0, 0).color(colors::STEEL);
    body + shaft
}

/// A NEMA-frame stepper motor (`size`, `length`, `shaft_dia`).
pub struct NemaMotor;

impl Part for NemaMotor {
    fn kind(&self) -> &'static str {
        "NemaMotor"
    }

    fn defaults(&self) -> ParamMap {
        ParamMap::new()
            .with("size", 23.0)
            .with("length", 76.0)
            .with("shaft_dia", 8.0)
    }

    fn label(&self, data: &ParamMap) -> String {
        match data.get("size").and_then(|v| v.as_f64()) {
            Some(size) => format!("NEMA{}", size as i64),
            None => self.kind().to_string(),
        }
    }

    fn calculate(&mut self, cx: &mut CalcCx<'_>) -> Result<bool> {
        let size = cx.f64("size")?;
        if size as i64 != 23 {
            return Err(cx.unsupported("frame size", format!("{size}")));
        }
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        Ok(nema23(cx.f64("length")?, cx.f64("shaft_dia")?))
    }
}

/// GT2 timing pulley: flanged tooth section on a hub, bored for the shaft.
///
/// The pitch diameter follows from the tooth count at 2 mm pitch.
pub fn gt2_pulley(teeth: usize, shaft_dia: f64, belt_width: f64) -> Shape {
    let d = teeth as f64 * 2.0 / PI;
    let flange_d = 16.0 / 12.7 * d;
    let hub_h = 8.0;

    let body = Shape::cylinder("hub", flange_d / 2.0, hub_h, 0)
        + Shape::cylinder("teeth", d / 2.0, belt_width + 2.0, 0).translate(0.0, 0.0, hub_h - 0.5)
        + Shape::cylinder("flange", flange_d / 2.0, 1.0, 0).translate(
            0.0,
            0.0,
            hub_h + belt_width + 1.0,
        );
    let bore = Shape::cylinder("bore", shaft_dia / 2.0, hub_h + belt_width + 2.0, 0)
        .translate(0.0, 0.0, -1.0);

    (body - bore).color(colors::ALUMINIUM)
}

/// A GT2 timing pulley (`teeth`, `shaft_dia`, `belt_width`).
pub struct Gt2Pulley;

impl Part for Gt2Pulley {
    fn kind(&self) -> &'static str {
        "GT2Pulley"
    }

    fn defaults(&self) -> ParamMap {
        ParamMap::new()
            .with("teeth", 20.0)
            .with("shaft_dia", 8.0)
            .with("belt_width", 6.0)
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        Ok(gt2_pulley(
            cx.usize("teeth")?,
            cx.f64("shaft_dia")?,
            cx.f64("belt_width")?,
        ))
    }
}
