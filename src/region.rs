//! Containment checks against regions, and summaries (center, bounds) of groups of locations.

use crate::error::{Error, Result};
use crate::location::Location;
use crate::sphere::HeadingDistance;
use geo::Intersects;
use std::f64::consts::SQRT_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned box in latitude/longitude spanned by two opposite corners.
///
/// The corners are normally the north-west (`top_left`) and south-east (`bottom_right`) ones,
/// but the containment check does not depend on that: it uses the minimum and maximum of the two
/// corners along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BoundingBox {
    pub top_left: Location,
    pub bottom_right: Location,
}

impl BoundingBox {
    #[must_use]
    pub fn new(top_left: Location, bottom_right: Location) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Computes the smallest box holding all of `locations`, widened by `margin` meters on
    /// every side.
    ///
    /// The corners use the encoding of the first location. Returns `None` if `locations` is
    /// empty.
    ///
    /// The margin is applied by moving each corner `margin * √2` meters outward along the
    /// diagonal (at 315° and 135°) with [`Location::move_to`], so the same approximations apply.
    #[must_use]
    pub fn around(locations: &[Location], margin: f64) -> Option<Self> {
        let first = locations.first()?;
        let (mut min_lat, mut max_lat) = (first.latitude(), first.latitude());
        let (mut min_lon, mut max_lon) = (first.longitude(), first.longitude());
        for location in &locations[1..] {
            min_lat = min_lat.min(location.latitude());
            max_lat = max_lat.max(location.latitude());
            min_lon = min_lon.min(location.longitude());
            max_lon = max_lon.max(location.longitude());
        }

        let top_left = first.with_coordinates(max_lat, min_lon);
        let bottom_right = first.with_coordinates(min_lat, max_lon);
        if margin == 0. {
            return Some(Self::new(top_left, bottom_right));
        }

        let diagonal = margin * SQRT_2;
        let top_left = top_left.move_to(HeadingDistance::new(315., diagonal));
        let bottom_right = bottom_right.move_to(HeadingDistance::new(135., diagonal));
        tracing::trace!(%top_left, %bottom_right, margin, "widened bounding box");
        Some(Self::new(top_left, bottom_right))
    }

    /// Tests whether `location` lies inside the box or on its edge.
    #[must_use]
    pub fn contains(&self, location: &Location) -> bool {
        let (a, b) = (&self.top_left, &self.bottom_right);
        let lat_min = a.latitude().min(b.latitude());
        let lat_max = a.latitude().max(b.latitude());
        let lon_min = a.longitude().min(b.longitude());
        let lon_max = a.longitude().max(b.longitude());

        (lat_min..=lat_max).contains(&location.latitude())
            && (lon_min..=lon_max).contains(&location.longitude())
    }
}

impl From<&Location> for geo::Coord<f64> {
    fn from(location: &Location) -> Self {
        geo::coord! { x: location.longitude(), y: location.latitude() }
    }
}

impl From<Location> for geo::Point<f64> {
    fn from(location: Location) -> Self {
        geo::Point::from(geo::Coord::<f64>::from(&location))
    }
}

impl Location {
    /// Tests whether `self` lies inside `bounding_box` or on its edge.
    ///
    /// See [`BoundingBox::contains`].
    #[must_use]
    pub fn inside_bounding_box(&self, bounding_box: &BoundingBox) -> bool {
        bounding_box.contains(self)
    }

    /// Tests whether `self` is at most `radius` meters (great-circle distance) from `center`.
    ///
    /// A negative radius never contains anything.
    #[must_use]
    pub fn inside_circle(&self, center: &Location, radius: f64) -> bool {
        center.distance_to(self) <= radius
    }

    /// Tests whether `self` lies inside `polygon` or on its boundary.
    ///
    /// The polygon is a closed ring of vertices; the last vertex does not need to repeat the
    /// first. It is treated as a flat shape in longitude/latitude, so edges are straight lines in
    /// degrees rather than great circles.
    ///
    /// Fails with [`Error::InvalidRegion`] if `polygon` has no vertices.
    pub fn inside_polygon(&self, polygon: &[Location]) -> Result<bool> {
        if polygon.is_empty() {
            return Err(Error::InvalidRegion(
                "polygon must contain at least one location".to_owned(),
            ));
        }

        let ring: geo::LineString<f64> = polygon.iter().map(geo::Coord::<f64>::from).collect();
        let polygon = geo::Polygon::new(ring, Vec::new());
        Ok(geo::Point::from(*self).intersects(&polygon))
    }
}

/// Computes the mean latitude and mean longitude of `locations`.
///
/// The result uses the encoding of the first location. Returns `None` if `locations` is empty.
///
/// This is a plain arithmetic mean of the coordinates, so it is only meaningful for locations that
/// do not straddle the antimeridian.
#[must_use]
pub fn average(locations: &[Location]) -> Option<Location> {
    let first = locations.first()?;
    let (lat_sum, lon_sum) = locations
        .iter()
        .fold((0., 0.), |(lat, lon), location| {
            (lat + location.latitude(), lon + location.longitude())
        });
    let count = locations.len() as f64;
    Some(first.with_coordinates(lat_sum / count, lon_sum / count))
}
