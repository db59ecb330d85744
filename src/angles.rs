//! Scalar angle helpers, all in degrees unless the name says otherwise.
//!
//! Headings follow the compass convention: 0° is north and angles grow clockwise.

use std::f64::consts::PI;

const FULL_TURN: f64 = 360.;
const HALF_TURN: f64 = 180.;

/// Converts an angle in degrees into radians.
#[must_use]
pub fn degrees_to_radians(angle: f64) -> f64 {
    angle * PI / HALF_TURN
}

/// Converts an angle in radians into degrees.
#[must_use]
pub fn radians_to_degrees(angle: f64) -> f64 {
    angle * HALF_TURN / PI
}

/// Normalizes an angle into [0°, 360°).
///
/// Negative angles are folded up, so `-40` becomes `320`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly one full turn
    if normalized >= FULL_TURN {
        0.
    } else {
        normalized
    }
}

/// Normalizes a heading into [0°, 360°).
///
/// Same as [`normalize_angle`]; useful on the output of
/// [`Location::heading_to`](crate::Location::heading_to), which lies in (-180°, 180°].
#[must_use]
pub fn normalize_heading(heading: f64) -> f64 {
    normalize_angle(heading)
}

/// Normalizes a latitude into [-90°, 90°] by reflecting it about the poles.
///
/// Going past a pole walks back towards the equator: `91` becomes `89` and `180` becomes `0`.
#[must_use]
pub fn normalize_latitude(latitude: f64) -> f64 {
    radians_to_degrees(degrees_to_radians(latitude).sin().asin())
}

/// Normalizes a longitude into (-180°, 180°].
///
/// Note that exactly `-180` maps to `180`.
#[must_use]
pub fn normalize_longitude(longitude: f64) -> f64 {
    let normalized = normalize_angle(longitude);
    if normalized > HALF_TURN {
        normalized - FULL_TURN
    } else {
        normalized
    }
}

/// Returns the smallest unsigned difference between two angles, in [0°, 180°].
#[must_use]
pub fn diff_angles(angle1: f64, angle2: f64) -> f64 {
    let (low, high) = ordered(angle1, angle2);
    let diff = high - low;
    if diff > HALF_TURN {
        FULL_TURN - diff
    } else {
        diff
    }
}

/// Returns the circular mean of two angles, in [0°, 360°).
///
/// The result bisects the smaller of the two arcs between the angles, so the average of `350`
/// and `10` is `0` rather than `180`.
#[must_use]
pub fn average_angles(angle1: f64, angle2: f64) -> f64 {
    let (low, high) = ordered(angle1, angle2);
    if high - low <= HALF_TURN {
        (low + high) / 2.
    } else {
        // the short arc wraps through north
        normalize_angle((low + high - FULL_TURN) / 2.)
    }
}

fn ordered(angle1: f64, angle2: f64) -> (f64, f64) {
    let a1 = normalize_angle(angle1);
    let a2 = normalize_angle(angle2);
    if a1 > a2 {
        (a2, a1)
    } else {
        (a1, a2)
    }
}
