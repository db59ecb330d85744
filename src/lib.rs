//! This library provides small, dependable geolocation helpers for code that already has its
//! locations in whatever shape some other system handed it.
//!
//! First and foremost, the library provides the [`Location`] type, which holds a latitude and
//! longitude in one of four common encodings: a `[lon, lat]` tuple ([`LonLatTuple`]),
//! `{lat, lon}` ([`LatLon`]), `{lat, lng}` ([`LatLng`]), or `{latitude, longitude}`
//! ([`LatitudeLongitude`]). Every operation that produces a location from another one keeps the
//! encoding it was given, so values can be handed back to their source without a translation
//! step. [`Location::convert`] switches between encodings explicitly. When the `serde` feature
//! is enabled, the [`json`] module detects the encoding of untyped JSON values.
//!
//! On top of that, the library offers:
//!
//!  - heading and distance between locations, and moving a location by a heading and distance
//!    (see [`HeadingDistance`]), all on a sphere with radius [`EARTH_RADIUS`];
//!  - containment checks against a [`BoundingBox`], a circle, or a polygon, and the [`average`]
//!    of a group of locations;
//!  - the closest point of approach ([`cpa`]) of two moving [`Track`]s;
//!  - angle arithmetic in the [`angles`] module and speed conversions in the [`units`] module.
//!
//! Angles are in degrees and distances in meters throughout. Where it helps to be explicit,
//! constructors and accessors also accept and produce [`uom`] quantities.
//!
//! The math is deliberately simple: spherical distances, an equirectangular approximation for
//! moving, and a flat plane for the closest point of approach. It is accurate enough for
//! distances of up to a few tens of kilometers away from the poles, and not meant for survey-grade
//! work.
//!
//! # Examples
//!
//! ```
//! use geolocation_utils::{HeadingDistance, LatLon, LatLng, Location, LocationKind};
//!
//! let harbour: Location = LatLon { lat: 51., lon: 4. }.into();
//!
//! // moving keeps the `{lat, lon}` encoding
//! let buoy = harbour.move_to(HeadingDistance::new(90., 1000.));
//! assert_eq!(buoy.kind(), LocationKind::LatLon);
//!
//! let back = buoy.heading_distance_to(&harbour);
//! assert!((back.distance - 1000.).abs() < 1.);
//! assert!((back.heading + 90.).abs() < 0.1);
//!
//! // switching encodings is explicit
//! let converted = harbour.convert(LocationKind::LatLng);
//! assert_eq!(converted, LatLng { lat: 51., lng: 4. }.into());
//! ```
//!
//! Closest point of approach of two ships, with speeds given in knots:
//!
//! ```
//! use geolocation_utils::{cpa, LatLon, Track};
//! use uom::si::f64::{Angle, Velocity};
//! use uom::si::{angle::degree, velocity::knot};
//!
//! let ferry = Track::from_quantities(
//!     LatLon { lat: 51.70401, lon: 4.61039 }.into(),
//!     Angle::new::<degree>(200.),
//!     Velocity::new::<knot>(9.7),
//! );
//! let barge = Track::from_quantities(
//!     LatLon { lat: 51.69613, lon: 4.60109 }.into(),
//!     Angle::new::<degree>(180.),
//!     Velocity::new::<knot>(1.6),
//! );
//!
//! let closest = cpa(&ferry, &barge);
//! assert!(closest.time > 0.);
//! assert!(closest.distance < ferry.location.distance_to(&barge.location));
//! ```

mod cpa;
mod error;
mod location;
mod region;
mod sphere;

pub mod angles;
#[cfg(feature = "serde")]
pub mod json;
pub mod units;

pub use cpa::{cpa, TimeDistance, Track};
pub use error::{Error, Result};
pub use location::{LatLng, LatLon, LatitudeLongitude, Location, LocationKind, LonLatTuple};
pub use region::{average, BoundingBox};
pub use sphere::{HeadingDistance, EARTH_RADIUS};
