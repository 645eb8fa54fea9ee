//! Geometric helpers for landmark measurements.
//!
//! The mapping pipeline reduces to three operations: clamped linear
//! interpolation between ranges, 2D distance, and an in-plane roll
//! correction. Ranges may run in either direction on both the input and the
//! output side; direction inversion is expressed in the servo table, not here.

use crate::landmarks::Landmark;

/// Clamp a value to `[0, 1]`
pub fn clamp01(v: f64) -> f64 {
    v.max(0.0).min(1.0)
}

/// Linearly remap `v` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// The interpolation parameter is clamped to `[0, 1]`, so the result always
/// lies between `out_min` and `out_max` regardless of input. Either range may
/// be reversed (min > max).
pub fn map_range(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let t = clamp01((v - in_min) / (in_max - in_min));
    out_min + t * (out_max - out_min)
}

/// 2D Euclidean distance between two landmarks, depth ignored
pub fn distance_2d(a: &Landmark, b: &Landmark) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// In-plane face rotation estimated from the eye-outer-corner pair.
///
/// Zero for a level face; positive when the left eye sits lower than the
/// right in image coordinates.
pub fn roll_angle(left_eye_outer: &Landmark, right_eye_outer: &Landmark) -> f64 {
    (left_eye_outer.y - right_eye_outer.y).atan2(left_eye_outer.x - right_eye_outer.x)
}

/// Rotate `point` around `origin` by `angle` radians in the image plane
pub fn rotate_about(point: &Landmark, origin: &Landmark, angle: f64) -> Landmark {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - origin.x;
    let dy = point.y - origin.y;
    Landmark {
        x: origin.x + dx * cos - dy * sin,
        y: origin.y + dx * sin + dy * cos,
        z: point.z,
    }
}
