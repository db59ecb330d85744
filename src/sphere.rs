use crate::angles::{degrees_to_radians, radians_to_degrees};
use crate::location::Location;
use uom::si::f64::{Angle, Length};
use uom::si::{
    angle::{degree, radian},
    length::meter,
};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Radius of the spherical earth model, in meters.
///
/// This is the WGS84 equatorial radius (semi-major axis); the earth is otherwise treated as a
/// perfect sphere.
// https://nsgreg.nga.mil/doc/view?i=4085 table 3.1
#[doc(alias = "equatorial radius")]
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// A heading in degrees (0° is north, clockwise) paired with a distance in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeadingDistance {
    #[cfg_attr(feature = "serde", serde(alias = "angle"))]
    pub heading: f64,
    pub distance: f64,
}

impl HeadingDistance {
    #[must_use]
    pub fn new(heading: f64, distance: f64) -> Self {
        Self { heading, distance }
    }

    /// Constructs a heading and distance from typed quantities.
    #[must_use]
    pub fn from_quantities(heading: impl Into<Angle>, distance: impl Into<Length>) -> Self {
        Self {
            heading: heading.into().get::<degree>(),
            distance: distance.into().get::<meter>(),
        }
    }

    #[must_use]
    pub fn heading_angle(&self) -> Angle {
        Angle::new::<degree>(self.heading)
    }

    #[must_use]
    pub fn length(&self) -> Length {
        Length::new::<meter>(self.distance)
    }
}

impl Location {
    /// Computes the initial heading and the [great-circle distance] from `self` to `to`.
    ///
    /// The distance uses the [haversine formula] on a sphere with radius [`EARTH_RADIUS`]. The
    /// heading is the initial bearing of the great circle and lies in (-180°, 180°]; it is _not_
    /// normalized into [0°, 360°), use [`normalize_heading`](crate::angles::normalize_heading)
    /// for that. The heading between two identical locations is 0°.
    ///
    /// [great-circle distance]: https://en.wikipedia.org/wiki/Great-circle_distance
    /// [haversine formula]: https://en.wikipedia.org/wiki/Haversine_formula
    #[must_use]
    pub fn heading_distance_to(&self, to: &Location) -> HeadingDistance {
        let distance = central_angle_by_haversine(
            self.latitude_angle(),
            to.latitude_angle(),
            self.longitude_angle(),
            to.longitude_angle(),
        )
        .get::<radian>()
            * EARTH_RADIUS;

        HeadingDistance {
            heading: initial_bearing(self, to).get::<degree>(),
            distance,
        }
    }

    /// Returns the initial heading from `self` to `to` in (-180°, 180°].
    ///
    /// See [`Location::heading_distance_to`].
    #[must_use]
    pub fn heading_to(&self, to: &Location) -> f64 {
        self.heading_distance_to(to).heading
    }

    /// Returns the great-circle distance in meters from `self` to `to`.
    ///
    /// See [`Location::heading_distance_to`].
    #[must_use]
    pub fn distance_to(&self, to: &Location) -> f64 {
        self.heading_distance_to(to).distance
    }

    /// Returns the location reached by going `distance` meters into `heading` from `self`.
    ///
    /// This is a flat-earth (equirectangular) approximation that is only accurate for distances
    /// that are small compared to the radius of the earth. The longitude offset is divided by
    /// the cosine of the latitude, so the result is meaningless close to the poles.
    ///
    /// The result uses the same encoding as `self`.
    #[must_use]
    pub fn move_to(&self, HeadingDistance { heading, distance }: HeadingDistance) -> Location {
        let heading = degrees_to_radians(heading);
        let latitude = self.latitude();
        let delta_lat = distance * heading.cos() / EARTH_RADIUS;
        let delta_lon =
            distance * heading.sin() / (EARTH_RADIUS * degrees_to_radians(latitude).cos());

        self.with_coordinates(
            latitude + radians_to_degrees(delta_lat),
            self.longitude() + radians_to_degrees(delta_lon),
        )
    }
}

/// Computes the central angle between the given lat/lon points.
///
/// To turn this angle into [great-circle distance], multiply this value by the radius of the
/// sphere (ie, of the earth).
///
/// [great-circle distance]: https://en.wikipedia.org/wiki/Great-circle_distance
pub(crate) fn central_angle_by_haversine(
    lat_a: Angle,
    lat_b: Angle,
    lon_a: Angle,
    lon_b: Angle,
) -> Angle {
    let lat_a = lat_a.get::<radian>(); // φ1
    let lat_b = lat_b.get::<radian>(); // φ2
    let delta_lat = lat_b - lat_a;
    let delta_lon = lon_b.get::<radian>() - lon_a.get::<radian>();

    // sin² rather than 1 - cos, which cancels out for points a few meters apart
    let a = (delta_lat / 2.).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.).sin().powi(2);
    Angle::new::<radian>(2. * a.sqrt().atan2((1. - a).sqrt()))
}

/// Initial bearing of the great circle from `from` to `to`, in (-180°, 180°].
///
/// See <http://www.movable-type.co.uk/scripts/latlong.html#bearing>.
fn initial_bearing(from: &Location, to: &Location) -> Angle {
    let lat_a = from.latitude_angle().get::<radian>();
    let lat_b = to.latitude_angle().get::<radian>();
    let delta_lon = (to.longitude_angle() - from.longitude_angle()).get::<radian>();

    let y = delta_lon.sin() * lat_b.cos();
    let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * delta_lon.cos();
    Angle::new::<radian>(y.atan2(x))
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for HeadingDistance {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        0.000_000_001
    }

    /// Headings are compared modulo 360°, so -90° equals 270°.
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        crate::angles::diff_angles(self.heading, other.heading) <= epsilon
            && self.distance.abs_diff_eq(&other.distance, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for HeadingDistance {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        crate::angles::diff_angles(self.heading, other.heading) <= epsilon
            && self
                .distance
                .relative_eq(&other.distance, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::{diff_angles, normalize_heading};
    use crate::location::{LatLng, LatLon, LatitudeLongitude, LonLatTuple};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::{quickcheck, TestResult};
    use rstest::rstest;

    // fixtures are given to 4 decimals
    const EPSILON: f64 = 0.000_1;

    fn lat_lon(lat: f64, lon: f64) -> Location {
        LatLon { lat, lon }.into()
    }

    #[rstest]
    #[case(lat_lon(51.00089831528412, 0.), 99.99999999985421, 0.)]
    #[case(lat_lon(51., 0.001427437116126087), 99.99999999843808, 89.99944533657323)]
    #[case(lat_lon(50.99910168471588, 0.), 99.99999999985421, 180.)]
    #[case(lat_lon(51., -0.001427437116126087), 99.99999999843808, -89.99944533657323)]
    fn heading_and_distance(#[case] to: Location, #[case] distance: f64, #[case] heading: f64) {
        let from = lat_lon(51., 0.);
        let actual = from.heading_distance_to(&to);
        assert_abs_diff_eq!(actual.distance, distance, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.heading, heading, epsilon = EPSILON);
        assert_abs_diff_eq!(from.heading_to(&to), heading, epsilon = EPSILON);
        assert_abs_diff_eq!(from.distance_to(&to), distance, epsilon = EPSILON);
    }

    #[test]
    fn heading_is_not_normalized() {
        let west = lat_lon(51., 0.).heading_to(&lat_lon(51., -0.001427437116126087));
        assert!(west < 0.);
        assert_abs_diff_eq!(normalize_heading(west), 270.000_554_7, epsilon = EPSILON);
    }

    #[rstest]
    #[case(lat_lon(51., 0.), lat_lon(51.00089831528412, 0.))]
    #[case(
        LatLng { lat: 51., lng: 0. }.into(),
        LatLng { lat: 51.00089831528412, lng: 0. }.into()
    )]
    #[case(
        LatitudeLongitude { latitude: 51., longitude: 0. }.into(),
        LatitudeLongitude { latitude: 51.00089831528412, longitude: 0. }.into()
    )]
    #[case(LonLatTuple(0., 51.).into(), LonLatTuple(0., 51.00089831528412).into())]
    fn heading_and_distance_in_every_encoding(#[case] from: Location, #[case] to: Location) {
        assert_relative_eq!(
            from.heading_distance_to(&to),
            HeadingDistance::new(0., 99.99999999985421),
            epsilon = EPSILON
        );
    }

    #[test]
    fn identical_points_are_zero_apart() {
        let here = lat_lon(51., 4.);
        assert_eq!(here.heading_distance_to(&here), HeadingDistance::new(0., 0.));
    }

    #[rstest]
    #[case(100., 0., 51.00089831528412, 0.)]
    #[case(200., 0., 51.001796630568236, 0.)]
    #[case(100., 45., 51.000635204829045, 0.0010093504645301253)]
    #[case(100., 90., 51., 0.001427437116126087)]
    #[case(100., 180., 50.99910168471588, 0.)]
    #[case(100., 270., 51., -0.001427437116126087)]
    fn move_to(
        #[case] distance: f64,
        #[case] heading: f64,
        #[case] lat: f64,
        #[case] lon: f64,
    ) {
        let moved = lat_lon(51., 0.).move_to(HeadingDistance::new(heading, distance));
        assert_abs_diff_eq!(moved, lat_lon(lat, lon), epsilon = EPSILON);
    }

    #[rstest]
    #[case(lat_lon(51., 0.), lat_lon(51.000635204829045, 0.0010093504645301253))]
    #[case(
        LatLng { lat: 51., lng: 0. }.into(),
        LatLng { lat: 51.000635204829045, lng: 0.0010093504645301253 }.into()
    )]
    #[case(
        LatitudeLongitude { latitude: 51., longitude: 0. }.into(),
        LatitudeLongitude { latitude: 51.000635204829045, longitude: 0.0010093504645301253 }.into()
    )]
    #[case(
        LonLatTuple(0., 51.).into(),
        LonLatTuple(0.0010093504645301253, 51.000635204829045).into()
    )]
    fn move_to_keeps_the_encoding(#[case] from: Location, #[case] expected: Location) {
        let moved = from.move_to(HeadingDistance::new(45., 100.));
        assert_eq!(moved.kind(), from.kind());
        assert_abs_diff_eq!(moved, expected, epsilon = EPSILON);
    }

    #[test]
    fn typed_quantities() {
        use uom::si::length::kilometer;

        let hd = HeadingDistance::from_quantities(
            Angle::new::<degree>(90.),
            Length::new::<kilometer>(1.5),
        );
        assert_relative_eq!(hd.heading, 90.);
        assert_relative_eq!(hd.distance, 1500.);
        assert_relative_eq!(hd.length().get::<meter>(), 1500.);
        assert_relative_eq!(hd.heading_angle().get::<radian>(), std::f64::consts::FRAC_PI_2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn heading_distance_accepts_angle_alias() {
        let hd: HeadingDistance =
            serde_json::from_str(r#"{"angle": 45, "distance": 100}"#).expect("deserializes");
        assert_eq!(hd, HeadingDistance::new(45., 100.));
        insta::assert_snapshot!(
            serde_json::to_string(&hd).expect("serializes"),
            @r#"{"heading":45.0,"distance":100.0}"#
        );
    }

    fn within(value: f64, range: f64) -> Option<f64> {
        value
            .is_finite()
            .then(|| value.rem_euclid(2. * range) - range)
    }

    quickcheck! {
        fn distance_is_symmetric(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> TestResult {
            let (Some(lat1), Some(lon1), Some(lat2), Some(lon2)) =
                (within(lat1, 90.), within(lon1, 180.), within(lat2, 90.), within(lon2, 180.))
            else {
                return TestResult::discard();
            };
            let a = lat_lon(lat1, lon1);
            let b = lat_lon(lat2, lon2);
            TestResult::from_bool(approx::relative_eq!(
                a.distance_to(&b),
                b.distance_to(&a),
                epsilon = 1e-6
            ))
        }

        fn reverse_heading_is_opposite(lat: f64, lon: f64, heading: f64, distance: f64) -> TestResult {
            let (Some(lat), Some(lon), Some(heading), Some(distance)) =
                (within(lat, 80.), within(lon, 180.), within(heading, 180.), within(distance, 5_000.))
            else {
                return TestResult::discard();
            };
            // keep clear of the coincident case
            let distance = distance.abs() + 1.;
            let a = lat_lon(lat, lon);
            let b = a.move_to(HeadingDistance::new(heading, distance));
            // meridians converge, so on short hops the two headings are only nearly opposite
            TestResult::from_bool(diff_angles(a.heading_to(&b), b.heading_to(&a) + 180.) < 1.)
        }

        fn move_then_measure(lat: f64, lon: f64, heading: f64, distance: f64) -> TestResult {
            let (Some(lat), Some(lon), Some(heading), Some(distance)) =
                (within(lat, 60.), within(lon, 180.), within(heading, 180.), within(distance, 1_000.))
            else {
                return TestResult::discard();
            };
            let distance = distance.abs() + 1.;
            let a = lat_lon(lat, lon);
            let b = a.move_to(HeadingDistance::new(heading, distance));
            let measured = a.heading_distance_to(&b);
            TestResult::from_bool(
                (measured.distance - distance).abs() < distance * 1e-3
                    && diff_angles(measured.heading, heading) < 0.1,
            )
        }
    }
}
