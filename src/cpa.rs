//! Closest point of approach (CPA) between two moving tracks.
//!
//! Both tracks are assumed to keep a constant heading and speed. The problem is solved in a flat
//! plane centred on the first track (x east, y north, in meters), which is only accurate while
//! the tracks are close together compared to the radius of the earth.
//!
//! See <http://geomalgorithms.com/a07-_distance.html>.

use crate::angles::degrees_to_radians;
use crate::location::Location;
use uom::si::angle::degree;
use uom::si::f64::{Angle, Velocity};
use uom::si::velocity::meter_per_second;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

type Point2 = nalgebra::Point2<f64>;
type Vector2 = nalgebra::Vector2<f64>;

/// Squared relative speed (m²/s²) under which two tracks count as moving in parallel.
const PARALLEL_EPSILON: f64 = 1e-8;

/// A location together with a constant heading (degrees, clockwise from north) and speed
/// (meters per second).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    pub location: Location,
    pub heading: f64,
    pub speed: f64,
}

impl Track {
    #[must_use]
    pub fn new(location: Location, heading: f64, speed: f64) -> Self {
        Self {
            location,
            heading,
            speed,
        }
    }

    /// Constructs a track from typed quantities.
    #[must_use]
    pub fn from_quantities(
        location: Location,
        heading: impl Into<Angle>,
        speed: impl Into<Velocity>,
    ) -> Self {
        Self {
            location,
            heading: heading.into().get::<degree>(),
            speed: speed.into().get::<meter_per_second>(),
        }
    }

    #[must_use]
    pub fn velocity(&self) -> Velocity {
        Velocity::new::<meter_per_second>(self.speed)
    }

    /// Velocity in the local plane, in meters per second east and north.
    fn velocity_vector(&self) -> Vector2 {
        let heading = degrees_to_radians(self.heading);
        Vector2::new(self.speed * heading.sin(), self.speed * heading.cos())
    }
}

/// When (in seconds) and at what distance (in meters) two tracks are closest.
///
/// A negative time means the tracks were closest in the past.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeDistance {
    pub time: f64,
    pub distance: f64,
}

/// A track projected into the local plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlanarTrack {
    pub(crate) position: Point2,
    pub(crate) velocity: Vector2,
}

impl PlanarTrack {
    fn at(&self, time: f64) -> Point2 {
        self.position + self.velocity * time
    }
}

/// Computes the closest point of approach of two tracks.
///
/// This is a cheap, linear approximation: `track2` is placed relative to `track1` using the
/// great-circle heading and distance between them, and both then move in straight lines on a
/// flat plane. The returned time may be negative. Tracks with (nearly) the same velocity stay at
/// a constant distance; for those the time is 0 and the distance is the current one.
#[must_use]
pub fn cpa(track1: &Track, track2: &Track) -> TimeDistance {
    let offset = track1.location.heading_distance_to(&track2.location);
    let bearing = degrees_to_radians(offset.heading);

    let tr1 = PlanarTrack {
        position: Point2::origin(),
        velocity: track1.velocity_vector(),
    };
    let tr2 = PlanarTrack {
        position: Point2::new(
            offset.distance * bearing.sin(),
            offset.distance * bearing.cos(),
        ),
        velocity: track2.velocity_vector(),
    };

    TimeDistance {
        time: cpa_time(&tr1, &tr2),
        distance: cpa_distance(&tr1, &tr2),
    }
}

impl Track {
    /// Computes the closest point of approach between `self` and `other`.
    ///
    /// See [`cpa`].
    #[must_use]
    pub fn closest_approach(&self, other: &Track) -> TimeDistance {
        cpa(self, other)
    }
}

/// Time at which the two tracks are closest.
///
/// The squared distance between the tracks is a quadratic in time; this is where it bottoms out.
pub(crate) fn cpa_time(tr1: &PlanarTrack, tr2: &PlanarTrack) -> f64 {
    let dv = tr1.velocity - tr2.velocity;
    let dv2 = dv.dot(&dv);
    if dv2 < PARALLEL_EPSILON {
        // the distance never changes, so any time will do
        tracing::debug!(dv2, "tracks move in parallel, using time 0 for closest approach");
        return 0.;
    }

    let w0 = tr1.position - tr2.position;
    -w0.dot(&dv) / dv2
}

/// Distance between the two tracks at the time they are closest.
pub(crate) fn cpa_distance(tr1: &PlanarTrack, tr2: &PlanarTrack) -> f64 {
    let time = cpa_time(tr1, tr2);
    nalgebra::distance(&tr1.at(time), &tr2.at(time))
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for TimeDistance {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.time.abs_diff_eq(&other.time, epsilon)
            && self.distance.abs_diff_eq(&other.distance, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for TimeDistance {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.time.relative_eq(&other.time, epsilon, max_relative)
            && self
                .distance
                .relative_eq(&other.distance, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LatLon;
    use crate::sphere::HeadingDistance;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rstest::rstest;

    fn planar(x: f64, y: f64, vx: f64, vy: f64) -> PlanarTrack {
        PlanarTrack {
            position: Point2::new(x, y),
            velocity: Vector2::new(vx, vy),
        }
    }

    fn lat_lon(lat: f64, lon: f64) -> Location {
        LatLon { lat, lon }.into()
    }

    #[rstest]
    // head on, meeting halfway
    #[case(planar(0., 0., 1., 1.), planar(1., 0., -1., 1.), 0.5, 0.)]
    // crossing paths at right angles
    #[case(planar(0., 0., 0., 1.), planar(1., 1., -1., 0.), 1., 0.)]
    // crossing, but the second track is too fast to meet
    #[case(planar(0., 0., 0., 1.), planar(1., 1., -2., 0.), 0.6, 0.4472135954999579)]
    // moving apart, so closest approach was in the past
    #[case(planar(0., 0., -1., 0.), planar(1., 0., 1., 0.), -0.5, 0.)]
    fn planar_cpa(
        #[case] tr1: PlanarTrack,
        #[case] tr2: PlanarTrack,
        #[case] time: f64,
        #[case] distance: f64,
    ) {
        assert_relative_eq!(cpa_time(&tr1, &tr2), time, epsilon = 1e-12);
        assert_relative_eq!(cpa_distance(&tr1, &tr2), distance, epsilon = 1e-12);
    }

    #[test]
    fn parallel_tracks_are_closest_now() {
        let tr1 = planar(0., 0., 3., 4.);
        let tr2 = planar(10., 0., 3., 4.);
        assert_eq!(cpa_time(&tr1, &tr2), 0.);
        assert_relative_eq!(cpa_distance(&tr1, &tr2), 10.);

        let still = planar(0., 0., 0., 0.);
        assert_eq!(cpa_time(&still, &planar(0., 5., 0., 0.)), 0.);
    }

    #[test]
    fn parallel_tracks_on_the_globe() {
        let ship1 = Track::new(lat_lon(51.70401, 4.61039), 90., 5.);
        let ship2 = Track::new(
            ship1.location.move_to(HeadingDistance::new(0., 500.)),
            90.,
            5.,
        );
        let actual = cpa(&ship1, &ship2);
        assert_eq!(actual.time, 0.);
        assert_abs_diff_eq!(actual.distance, 500., epsilon = 1e-3);
    }

    #[rstest]
    #[case(
        Track::new(lat_lon(51.70401, 4.61039), 200., 5.),
        Track::new(lat_lon(51.69613, 4.60109), 180., 0.8334),
        TimeDistance { time: 251.22255125913932, distance: 231.90976012822378 }
    )]
    #[case(
        Track::new(lat_lon(51.71854, 4.61935), 204.2, 2.7777778),
        Track::new(lat_lon(51.71587, 4.6247), 254.4, 5.833333),
        TimeDistance { time: 92.37206214154632, distance: 212.8459458277701 }
    )]
    fn ships(#[case] ship1: Track, #[case] ship2: Track, #[case] expected: TimeDistance) {
        assert_abs_diff_eq!(cpa(&ship1, &ship2), expected, epsilon = 0.000_1);
        assert_abs_diff_eq!(ship1.closest_approach(&ship2), expected, epsilon = 0.000_1);
    }

    #[test]
    fn order_of_tracks_barely_matters() {
        let ship1 = Track::new(lat_lon(51.70401, 4.61039), 200., 5.);
        let ship2 = Track::new(lat_lon(51.69613, 4.60109), 180., 0.8334);
        // the plane is centred on the first track, and the great-circle headings between the
        // two are not exactly opposite
        assert_abs_diff_eq!(cpa(&ship1, &ship2), cpa(&ship2, &ship1), epsilon = 0.5);
    }

    #[test]
    fn typed_quantities() {
        use uom::si::velocity::knot;

        let track = Track::from_quantities(
            lat_lon(51., 4.),
            Angle::new::<degree>(45.),
            Velocity::new::<knot>(10.),
        );
        assert_relative_eq!(track.heading, 45.);
        assert_relative_eq!(track.speed, 5.144_444, epsilon = 1e-6);
        assert_relative_eq!(track.velocity().get::<knot>(), 10., epsilon = 1e-9);
    }
}
