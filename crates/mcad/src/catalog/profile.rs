//! 2D outline helpers for extruded profiles.
//!
//! Beam sections, rail profiles, and bearing blocks are all described as
//! closed point lists in the XY plane and extruded. These helpers build and
//! transform those lists.

use mcad_ir::Vec2;
use nalgebra::{Rotation2, Vector2};

/// Convert raw coordinate pairs into profile points.
pub fn pts(raw: &[(f64, f64)]) -> Vec<Vec2> {
    raw.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
}

/// Shift every point by `(dx, dy)`.
pub fn shift_points(points: &[Vec2], dx: f64, dy: f64) -> Vec<Vec2> {
    points.iter().map(|p| Vec2::new(p.x + dx, p.y + dy)).collect()
}

/// Rotate every point around the origin by `degrees` (counterclockwise).
pub fn rotate_points(points: &[Vec2], degrees: f64) -> Vec<Vec2> {
    let rot = Rotation2::new(degrees.to_radians());
    points
        .iter()
        .map(|p| {
            let v = rot * Vector2::new(p.x, p.y);
            Vec2::new(v.x, v.y)
        })
        .collect()
}

/// Reflect every point across the vertical line `x = x_val`.
///
/// The result is reversed so that appending it to the source list continues
/// the outline instead of jumping back to the start.
pub fn mirror_points_x(points: &[Vec2], x_val: f64) -> Vec<Vec2> {
    let mut mirrored: Vec<Vec2> = points
        .iter()
        .map(|p| Vec2::new(2.0 * x_val - p.x, p.y))
        .collect();
    mirrored.reverse();
    mirrored
}

/// Reflect every point across the X axis (negate Y), reversed like
/// [`mirror_points_x`].
pub fn mirror_points_y(points: &[Vec2]) -> Vec<Vec2> {
    let mut mirrored: Vec<Vec2> = points.iter().map(|p| Vec2::new(p.x, -p.y)).collect();
    mirrored.reverse();
    mirrored
}

/// Points along a circular arc, both endpoints included.
fn arc_points(center: (f64, f64), radius: f64, start_deg: f64, end_deg: f64, segments: u32) -> Vec<Vec2> {
    let mut out = Vec::with_capacity(segments as usize + 1);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let angle = (start_deg + (end_deg - start_deg) * t).to_radians();
        let v = Rotation2::new(angle) * Vector2::new(radius, 0.0);
        out.push(Vec2::new(center.0 + v.x, center.1 + v.y));
    }
    out
}

/// Axis-aligned rectangle `w × h` with corners rounded to `radius`, one
/// corner region at the origin.
///
/// Extrusion profiles for rounded extrusion stock (t-slot beams). Uses
/// `segments` points per quarter-circle corner.
pub fn rounded_rect(w: f64, h: f64, radius: f64, segments: u32) -> Vec<Vec2> {
    let mut outline = Vec::new();
    outline.extend(arc_points((w - radius, radius), radius, -90.0, 0.0, segments));
    outline.extend(arc_points((w - radius, h - radius), radius, 0.0, 90.0, segments));
    outline.extend(arc_points((radius, h - radius), radius, 90.0, 180.0, segments));
    outline.extend(arc_points((radius, radius), radius, 180.0, 270.0, segments));
    outline
}
