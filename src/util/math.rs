//! Polar-coordinate helpers for minutiae positions.

use std::f64::consts::PI;

/// Angle of `(x, y)` around the core in radians, quadrant corrected.
///
/// Points in the first quadrant map to `(0, π/2)`, the fourth to `(3π/2, 2π)`,
/// the third to `(π, 3π/2)` and the second to `(-π, -π/2)`. The second
/// quadrant range is kept for compatibility with stored templates; every
/// branch satisfies `r * cos(angle) == x` and `r * sin(angle) == y`.
/// Points on either axis return 0; the extractor never records them.
pub(crate) fn polar_angle(x: f64, y: f64) -> f64 {
    let base = (y / x).atan();
    if x > 0.0 && y > 0.0 {
        base
    } else if x < 0.0 && y > 0.0 {
        base - PI
    } else if x < 0.0 && y < 0.0 {
        PI + base
    } else if x > 0.0 && y < 0.0 {
        2.0 * PI + base
    } else {
        0.0
    }
}

/// Converts a whole-degree rotation into radians.
pub(crate) fn rotation_rad(rot_deg: i32) -> f64 {
    f64::from(rot_deg) * PI / 180.0
}

/// Cartesian position of a polar point after rotating it by `rot_deg`.
pub(crate) fn rotate_polar(radius: f64, angle: f64, rot_deg: i32) -> (f64, f64) {
    let theta = angle + rotation_rad(rot_deg);
    (radius * theta.cos(), radius * theta.sin())
}
