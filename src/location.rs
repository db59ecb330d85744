use crate::angles;
use crate::error::{Error, Result};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uom::si::angle::degree;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A location as a `[longitude, latitude]` pair, in degrees.
///
/// Note the order: longitude comes first, as in GeoJSON.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LonLatTuple(pub f64, pub f64);

/// A location with `lat` and `lon` fields, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// A location with `lat` and `lng` fields, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A location with `latitude` and `longitude` fields, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatitudeLongitude {
    pub latitude: f64,
    pub longitude: f64,
}

/// Names one of the four location encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LocationKind {
    LonLatTuple,
    LatLon,
    LatLng,
    LatitudeLongitude,
}

impl LocationKind {
    /// All kinds, in the order in which untyped values are matched against them.
    pub const ALL: [LocationKind; 4] = [
        LocationKind::LonLatTuple,
        LocationKind::LatLon,
        LocationKind::LatLng,
        LocationKind::LatitudeLongitude,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LocationKind::LonLatTuple => "LonLatTuple",
            LocationKind::LatLon => "LatLon",
            LocationKind::LatLng => "LatLng",
            LocationKind::LatitudeLongitude => "LatitudeLongitude",
        }
    }
}

impl Display for LocationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LocationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LocationKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_owned()))
    }
}

/// A point on the surface of the earth in any of the four supported encodings.
///
/// All geometry works on the latitude and longitude (in degrees) regardless of the encoding.
/// Operations that produce a new location hand it back in the encoding of their input, so a
/// [`LatLng`] moved by [`Location::move_to`] is still a [`LatLng`].
///
/// When deserialized (with the `serde` feature), the encoding is detected from the shape of the
/// input: a list of at least two numbers is a [`LonLatTuple`], then `{lat, lon}`, `{lat, lng}`
/// and `{latitude, longitude}` are tried in that order. Additional fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Location {
    LonLatTuple(LonLatTuple),
    LatLon(LatLon),
    LatLng(LatLng),
    LatitudeLongitude(LatitudeLongitude),
}

impl Location {
    /// Constructs a location of the given kind.
    #[must_use]
    pub fn build(latitude: f64, longitude: f64, kind: LocationKind) -> Self {
        match kind {
            LocationKind::LonLatTuple => Location::LonLatTuple(LonLatTuple(longitude, latitude)),
            LocationKind::LatLon => Location::LatLon(LatLon {
                lat: latitude,
                lon: longitude,
            }),
            LocationKind::LatLng => Location::LatLng(LatLng {
                lat: latitude,
                lng: longitude,
            }),
            LocationKind::LatitudeLongitude => Location::LatitudeLongitude(LatitudeLongitude {
                latitude,
                longitude,
            }),
        }
    }

    /// Returns which encoding this location uses.
    #[must_use]
    pub fn kind(&self) -> LocationKind {
        match self {
            Location::LonLatTuple(_) => LocationKind::LonLatTuple,
            Location::LatLon(_) => LocationKind::LatLon,
            Location::LatLng(_) => LocationKind::LatLng,
            Location::LatitudeLongitude(_) => LocationKind::LatitudeLongitude,
        }
    }

    /// Returns the latitude in degrees, as stored (not normalized).
    #[must_use]
    pub fn latitude(&self) -> f64 {
        match *self {
            Location::LonLatTuple(LonLatTuple(_, lat)) => lat,
            Location::LatLon(LatLon { lat, .. }) => lat,
            Location::LatLng(LatLng { lat, .. }) => lat,
            Location::LatitudeLongitude(LatitudeLongitude { latitude, .. }) => latitude,
        }
    }

    /// Returns the longitude in degrees, as stored (not normalized).
    #[must_use]
    pub fn longitude(&self) -> f64 {
        match *self {
            Location::LonLatTuple(LonLatTuple(lon, _)) => lon,
            Location::LatLon(LatLon { lon, .. }) => lon,
            Location::LatLng(LatLng { lng, .. }) => lng,
            Location::LatitudeLongitude(LatitudeLongitude { longitude, .. }) => longitude,
        }
    }

    pub(crate) fn latitude_angle(&self) -> Angle {
        Angle::new::<degree>(self.latitude())
    }

    pub(crate) fn longitude_angle(&self) -> Angle {
        Angle::new::<degree>(self.longitude())
    }

    /// Returns a location at the given coordinates in the same encoding as `self`.
    #[must_use]
    pub fn with_coordinates(&self, latitude: f64, longitude: f64) -> Self {
        Self::build(latitude, longitude, self.kind())
    }

    /// Re-encodes this location as the given kind.
    #[must_use]
    pub fn convert(&self, kind: LocationKind) -> Self {
        Self::build(self.latitude(), self.longitude(), kind)
    }

    #[must_use]
    pub fn to_lat_lon(&self) -> LatLon {
        LatLon {
            lat: self.latitude(),
            lon: self.longitude(),
        }
    }

    #[must_use]
    pub fn to_lat_lng(&self) -> LatLng {
        LatLng {
            lat: self.latitude(),
            lng: self.longitude(),
        }
    }

    #[must_use]
    pub fn to_latitude_longitude(&self) -> LatitudeLongitude {
        LatitudeLongitude {
            latitude: self.latitude(),
            longitude: self.longitude(),
        }
    }

    #[must_use]
    pub fn to_lon_lat_tuple(&self) -> LonLatTuple {
        LonLatTuple(self.longitude(), self.latitude())
    }

    /// Tests whether both coordinates of `self` and `other` are within `epsilon` degrees of each
    /// other. The encodings of the two locations do not matter.
    #[must_use]
    pub fn is_equal(&self, other: &Location, epsilon: f64) -> bool {
        (self.latitude() - other.latitude()).abs() <= epsilon
            && (self.longitude() - other.longitude()).abs() <= epsilon
    }

    /// Brings latitude into [-90°, 90°] and longitude into (-180°, 180°], keeping the encoding.
    ///
    /// See [`angles::normalize_latitude`] and [`angles::normalize_longitude`] for how
    /// out-of-range values are folded back.
    #[must_use]
    pub fn normalize(&self) -> Self {
        self.with_coordinates(
            angles::normalize_latitude(self.latitude()),
            angles::normalize_longitude(self.longitude()),
        )
    }
}

impl From<LonLatTuple> for Location {
    fn from(value: LonLatTuple) -> Self {
        Location::LonLatTuple(value)
    }
}

impl From<LatLon> for Location {
    fn from(value: LatLon) -> Self {
        Location::LatLon(value)
    }
}

impl From<LatLng> for Location {
    fn from(value: LatLng) -> Self {
        Location::LatLng(value)
    }
}

impl From<LatitudeLongitude> for Location {
    fn from(value: LatitudeLongitude) -> Self {
        Location::LatitudeLongitude(value)
    }
}

impl From<[f64; 2]> for Location {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Location::LonLatTuple(LonLatTuple(lon, lat))
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let lat = self.latitude();
        let lon = self.longitude();
        let ns = if lat.is_sign_negative() { 'S' } else { 'N' };
        let ew = if lon.is_sign_negative() { 'W' } else { 'E' };
        write!(f, "{}°{ns}, {}°{ew}", lat.abs(), lon.abs())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for LonLatTuple {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TupleVisitor;

        impl<'de> serde::de::Visitor<'de> for TupleVisitor {
            type Value = LonLatTuple;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a list starting with longitude and latitude")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let lon: f64 = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::invalid_length(0, &self))?;
                let lat: f64 = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::invalid_length(1, &self))?;
                // anything beyond the pair (eg, altitude) is ignored
                while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
                Ok(LonLatTuple(lon, lat))
            }
        }

        deserializer.deserialize_seq(TupleVisitor)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Location {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        // degrees; about a tenth of a millimeter on the ground
        0.000_000_001
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.latitude().abs_diff_eq(&other.latitude(), epsilon)
            && self.longitude().abs_diff_eq(&other.longitude(), epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Location {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.latitude()
            .relative_eq(&other.latitude(), epsilon, max_relative)
            && self
                .longitude()
                .relative_eq(&other.longitude(), epsilon, max_relative)
    }
}
