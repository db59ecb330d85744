use thiserror::Error;

/// Errors produced when untyped input cannot be turned into locations or regions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The value is none of `[lon, lat]`, `{lat, lon}`, `{lat, lng}`, or
    /// `{latitude, longitude}`.
    #[error("unknown location format: {found}")]
    UnrecognizedFormat { found: String },

    /// A region argument (eg, a polygon) is missing, is not a list, or has no locations.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// The name does not identify one of the four location encodings.
    #[error("unknown location kind {0:?}")]
    UnknownKind(String),
}

/// Shorthand for results whose error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
