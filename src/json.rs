//! Recognizing locations in untyped JSON data.
//!
//! A JSON value is matched against the four location encodings in a fixed order:
//!
//! 1. a list whose first two elements are numbers, `[longitude, latitude, ...]`;
//! 2. an object with numeric `lat` and `lon`;
//! 3. an object with numeric `lat` and `lng`;
//! 4. an object with numeric `latitude` and `longitude`.
//!
//! The first match wins and any other elements or fields are ignored. Values that match none of
//! these fail with [`Error::UnrecognizedFormat`].

use crate::error::{Error, Result};
use crate::location::{Location, LocationKind};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn number_field(value: &Value, name: &str) -> Option<f64> {
    value.as_object()?.get(name)?.as_f64()
}

fn tuple_pair(value: &Value) -> Option<(f64, f64)> {
    match value.as_array()?.as_slice() {
        [lon, lat, ..] => Some((lon.as_f64()?, lat.as_f64()?)),
        _ => None,
    }
}

/// Tests whether `value` has the shape `[longitude, latitude]`.
#[must_use]
pub fn is_lon_lat_tuple(value: &Value) -> bool {
    tuple_pair(value).is_some()
}

/// Tests whether `value` has the shape `{lat, lon}`.
#[must_use]
pub fn is_lat_lon(value: &Value) -> bool {
    number_field(value, "lat").is_some() && number_field(value, "lon").is_some()
}

/// Tests whether `value` has the shape `{lat, lng}`.
#[must_use]
pub fn is_lat_lng(value: &Value) -> bool {
    number_field(value, "lat").is_some() && number_field(value, "lng").is_some()
}

/// Tests whether `value` has the shape `{latitude, longitude}`.
#[must_use]
pub fn is_latitude_longitude(value: &Value) -> bool {
    number_field(value, "latitude").is_some() && number_field(value, "longitude").is_some()
}

/// Determines which location encoding `value` uses.
pub fn detect_kind(value: &Value) -> Result<LocationKind> {
    if is_lon_lat_tuple(value) {
        Ok(LocationKind::LonLatTuple)
    } else if is_lat_lon(value) {
        Ok(LocationKind::LatLon)
    } else if is_lat_lng(value) {
        Ok(LocationKind::LatLng)
    } else if is_latitude_longitude(value) {
        Ok(LocationKind::LatitudeLongitude)
    } else {
        tracing::trace!(%value, "value is not a recognized location");
        Err(Error::UnrecognizedFormat {
            found: value.to_string(),
        })
    }
}

/// Returns the latitude of the location held in `value`, in degrees.
pub fn latitude_of(value: &Value) -> Result<f64> {
    Location::from_value(value).map(|location| location.latitude())
}

/// Returns the longitude of the location held in `value`, in degrees.
pub fn longitude_of(value: &Value) -> Result<f64> {
    Location::from_value(value).map(|location| location.longitude())
}

/// Reads a list of locations, such as the input to [`average`](crate::average).
///
/// `null` is read as an empty list. Any other non-list value is an [`Error::InvalidRegion`].
pub fn locations_from_value(value: &Value) -> Result<Vec<Location>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.iter().map(Location::from_value).collect(),
        _ => Err(Error::InvalidRegion(format!(
            "expected a list of locations, got {value}"
        ))),
    }
}

/// Reads the vertices of a polygon.
///
/// Unlike [`locations_from_value`], the polygon must be a non-empty list.
pub fn polygon_from_value(value: &Value) -> Result<Vec<Location>> {
    match value {
        Value::Array(items) if !items.is_empty() => {
            items.iter().map(Location::from_value).collect()
        }
        Value::Array(_) => Err(Error::InvalidRegion(
            "polygon must contain at least one location".to_owned(),
        )),
        _ => Err(Error::InvalidRegion(format!(
            "expected a polygon as a list of locations, got {value}"
        ))),
    }
}

impl Location {
    /// Reads a location in whichever encoding `value` uses.
    pub fn from_value(value: &Value) -> Result<Self> {
        let kind = detect_kind(value)?;
        let (latitude, longitude) = match kind {
            LocationKind::LonLatTuple => tuple_pair(value).map(|(lon, lat)| (lat, lon)),
            LocationKind::LatLon => number_field(value, "lat").zip(number_field(value, "lon")),
            LocationKind::LatLng => number_field(value, "lat").zip(number_field(value, "lng")),
            LocationKind::LatitudeLongitude => {
                number_field(value, "latitude").zip(number_field(value, "longitude"))
            }
        }
        .ok_or_else(|| Error::UnrecognizedFormat {
            found: value.to_string(),
        })?;
        Ok(Location::build(latitude, longitude, kind))
    }

    /// Turns this location back into JSON, in its own encoding.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match *self {
            Location::LonLatTuple(tuple) => serde_json::json!([tuple.0, tuple.1]),
            Location::LatLon(l) => serde_json::json!({ "lat": l.lat, "lon": l.lon }),
            Location::LatLng(l) => serde_json::json!({ "lat": l.lat, "lng": l.lng }),
            Location::LatitudeLongitude(l) => {
                serde_json::json!({ "latitude": l.latitude, "longitude": l.longitude })
            }
        }
    }
}

impl TryFrom<&Value> for Location {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        Location::from_value(value)
    }
}

impl TryFrom<Value> for Location {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Location::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Location::from_value(&value).map_err(serde::de::Error::custom)
    }
}
