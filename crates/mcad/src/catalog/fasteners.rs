//! Metric fasteners: socket-head bolts and hex nuts.

use mcad_ir::{colors, Rgba};

use crate::error::Result;
use crate::part::{CalcCx, GenCx, Part};
use crate::shape::Shape;
use crate::value::ParamMap;

/// Format a thread size for labels: `5.0` → `M5`, `2.5` → `M2.5`.
fn thread_label(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("M{}", size as i64)
    } else {
        format!("M{size}")
    }
}

/// Socket-head metric bolt blank (`d` thread diameter, `l` overall length).
///
/// The head is a cylinder of diameter `2d` and height `d` with a hex socket;
/// the shank hangs below the origin so the underside of the head sits at
/// z = 0.
pub fn metric_bolt(d: f64, l: f64) -> Shape {
    let r = d / 2.0;
    let head = Shape::cylinder("head", 2.0 * r, d, 0)
        - Shape::cylinder("socket", r, r + 1.0, 6).translate(0.0, 0.0, r);
    let remaining_len = l - d;
    let shank = Shape::cylinder("shank", r, remaining_len, 0).translate(0.0, 0.0, -remaining_len);
    (head + shank).color(Rgba::rgb(0.1, 0.1, 0.1))
}

/// A metric socket-head bolt (`thread_size`, `length`, optional `style`).
pub struct MetricBolt;

impl Part for MetricBolt {
    fn kind(&self) -> &'static str {
        "MetricBolt"
    }

    fn defaults(&self) -> ParamMap {
        ParamMap::new().with("style", "socket_head")
    }

    fn label(&self, data: &ParamMap) -> String {
        match data.get("thread_size").and_then(|v| v.as_f64()) {
            Some(size) => format!("{}Bolt", thread_label(size)),
            None => self.kind().to_string(),
        }
    }

    fn calculate(&mut self, _cx: &mut CalcCx<'_>) -> Result<bool> {
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        let style = cx.str("style")?;
        if style != "socket_head" {
            return Err(cx.unsupported("head style", style));
        }
        Ok(metric_bolt(cx.f64("thread_size")?, cx.f64("length")?))
    }
}

/// Nut outer diameter (across corners) by thread size code (size × 10).
fn nut_outer_dia(code: i64) -> Option<f64> {
    Some(match code {
        16 => 3.41,
        20 => 4.32,
        25 => 5.45,
        30 => 6.01,
        40 => 7.66,
        50 => 8.79,
        60 => 11.05,
        80 => 14.38,
        100 => 17.77,
        120 => 20.03,
        140 => 23.35,
        160 => 26.75,
        200 => 32.95,
        _ => return None,
    })
}

/// Nut height by thread size code (size × 10).
fn nut_height(code: i64) -> Option<f64> {
    Some(match code {
        16 => 1.3,
        20 => 1.6,
        25 => 2.0,
        30 => 2.4,
        40 => 3.2,
        50 => 4.7,
        60 => 5.2,
        80 => 6.8,
        100 => 8.4,
        120 => 10.8,
        140 => 12.8,
        160 => 14.8,
        200 => 18.0,
        _ => return None,
    })
}

/// A metric hex nut (`thread_size`).
///
/// Calculation resolves the hex envelope from the standard dimension tables
/// (M1.6 through M20) and publishes `inner_r`, `outer_r`, and `height` as
/// derived data.
pub struct MetricNut;

impl Part for MetricNut {
    fn kind(&self) -> &'static str {
        "MetricNut"
    }

    fn label(&self, data: &ParamMap) -> String {
        match data.get("thread_size").and_then(|v| v.as_f64()) {
            Some(size) => format!("{}Nut", thread_label(size)),
            None => self.kind().to_string(),
        }
    }

    fn calculate(&mut self, cx: &mut CalcCx<'_>) -> Result<bool> {
        let size = cx.f64("thread_size")?;
        let code = (size * 10.0 + 0.5) as i64;
        let (outer_dia, height) = match (nut_outer_dia(code), nut_height(code)) {
            (Some(d), Some(h)) => (d, h),
            _ => return Err(cx.unsupported("thread size", thread_label(size))),
        };
        cx.set("inner_r", size / 2.0);
        cx.set("outer_r", outer_dia / 2.0);
        cx.set("height", height);
        Ok(true)
    }

    fn generate(&self, cx: &GenCx<'_>) -> Result<Shape> {
        let inner_r = cx.f64("inner_r")?;
        let outer_r = cx.f64("outer_r")?;
        let height = cx.f64("height")?;
        let nut = Shape::cylinder("hex", outer_r, height, 6)
            - Shape::cylinder("bore", inner_r, height + 2.0, 0).translate(0.0, 0.0, -1.0);
        Ok(nut.color(colors::STEEL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::tree::Assembly;

    #[test]
    fn nut_dimensions_from_table() {
        let mut asm = Assembly::new(MetricNut, ParamMap::new().with("thread_size", 5.0));
        asm.finalise().unwrap();

        let root = asm.root();
        assert_eq!(asm.name(root), "M5Nut");
        assert_eq!(asm.f64(root, "inner_r").unwrap(), 2.5);
        assert!((asm.f64(root, "outer_r").unwrap() - 8.79 / 2.0).abs() < 1e-12);
        assert_eq!(asm.f64(root, "height").unwrap(), 4.7);
        assert!(asm.generate(root).is_ok());
    }

    #[test]
    fn fractional_sizes_label_and_resolve() {
        let mut asm = Assembly::new(MetricNut, ParamMap::new().with("thread_size", 2.5));
        asm.finalise().unwrap();
        assert_eq!(asm.name(asm.root()), "M2.5Nut");
        assert_eq!(asm.f64(asm.root(), "height").unwrap(), 2.0);
    }

    #[test]
    fn unknown_nut_size_is_fatal() {
        let mut asm = Assembly::new(MetricNut, ParamMap::new().with("thread_size", 7.0));
        match asm.finalise() {
            Err(Error::Unsupported { what, value, .. }) => {
                assert_eq!(what, "thread size");
                assert_eq!(value, "M7");
            }
            other => panic!("expected Unsupported, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn bolt_label_and_socket() {
        let mut asm = Assembly::new(
            MetricBolt,
            ParamMap::new().with("thread_size", 5.0).with("length", 30.0),
        );
        asm.finalise().unwrap();
        assert_eq!(asm.name(asm.root()), "M5Bolt");

        let doc = asm.generate(asm.root()).unwrap().to_document();
        let hex_socket = doc.nodes.values().any(|n| {
            matches!(n.op, mcad_ir::CsgOp::Cylinder { segments: 6, .. })
        });
        assert!(hex_socket);
    }

    #[test]
    fn unknown_head_style_is_fatal() {
        let mut asm = Assembly::new(
            MetricBolt,
            ParamMap::new()
                .with("thread_size", 5.0)
                .with("length", 30.0)
                .with("style", "hex_head"),
        );
        asm.finalise().unwrap();
        match asm.generate(asm.root()) {
            Err(Error::Unsupported { what, .. }) => assert_eq!(what, "head style"),
            other => panic!("expected Unsupported, got {:?}", other.map(|_| ())),
        }
    }
}
