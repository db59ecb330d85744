//! Speed conversions between knots, meters per second, and kilometers per hour.
//!
//! The plain `f64` functions use the rounded factors common in navigation (1 knot = 0.514444 m/s
//! = 1.852 km/h). Prefer [`speed_in_knots`] and the [`uom`] quantities when the exact factor
//! matters.

use uom::si::f64::Velocity;
use uom::si::velocity::knot;

const METERS_PER_SECOND_PER_KNOT: f64 = 0.514_444;
const KM_PER_HOUR_PER_KNOT: f64 = 1.852;

#[must_use]
pub fn knots_to_meters_per_second(knots: f64) -> f64 {
    knots * METERS_PER_SECOND_PER_KNOT
}

#[must_use]
pub fn meters_per_second_to_knots(meters_per_second: f64) -> f64 {
    meters_per_second / METERS_PER_SECOND_PER_KNOT
}

#[must_use]
pub fn knots_to_km_per_hour(knots: f64) -> f64 {
    knots * KM_PER_HOUR_PER_KNOT
}

#[must_use]
pub fn km_per_hour_to_knots(km_per_hour: f64) -> f64 {
    km_per_hour / KM_PER_HOUR_PER_KNOT
}

/// Returns `speed` in knots.
#[must_use]
pub fn speed_in_knots(speed: Velocity) -> f64 {
    speed.get::<knot>()
}
