//! Longitude/latitude pairs and their `"x,y"` wire encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Axis, ParseError};

/// Maximum per-axis difference, in degrees, for two coordinates to be
/// considered the same location.
///
/// The service serializes the same match with different precision in its
/// JSON and CSV responses.
pub const COORDINATE_TOLERANCE: f64 = 0.001;

/// A longitude (`x`) / latitude (`y`) pair in degrees.
///
/// No range validation is applied; out-of-range values pass through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    /// Creates a new coordinate pair.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Parses a `"x,y"` string as found in batch output CSV.
    ///
    /// # Errors
    /// [`ParseError::MalformedCoordinate`] unless the input splits into exactly
    /// two non-empty halves on `,`; [`ParseError::InvalidNumber`] when either
    /// half is not a base-10 float. Halves are not trimmed, so padding around
    /// a number is an invalid number.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let malformed = || ParseError::MalformedCoordinate {
            input: s.to_string(),
        };

        let (xs, ys) = s.split_once(',').ok_or_else(malformed)?;
        if xs.is_empty() || ys.is_empty() || ys.contains(',') {
            return Err(malformed());
        }

        let x = parse_axis(Axis::X, xs, s)?;
        let y = parse_axis(Axis::Y, ys, s)?;
        Ok(Self { x, y })
    }

    /// Returns true if both axes differ by less than [`COORDINATE_TOLERANCE`].
    pub fn approx_eq(&self, other: &Coordinates) -> bool {
        (self.x - other.x).abs() < COORDINATE_TOLERANCE
            && (self.y - other.y).abs() < COORDINATE_TOLERANCE
    }

    /// Returns true if both axes are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

fn parse_axis(axis: Axis, value: &str, input: &str) -> Result<f64, ParseError> {
    value
        .parse::<f64>()
        .map_err(|source| ParseError::InvalidNumber {
            axis,
            input: input.to_string(),
            source,
        })
}

impl FromStr for Coordinates {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinates::parse(s)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
