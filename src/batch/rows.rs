//! Typed batch rows, independent of their CSV encoding.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::model::{Coordinates, TigerLine};

/// Status literal marking a matched output row.
pub const MATCH: &str = "Match";

/// Match-type literal marking an exact match.
pub const EXACT: &str = "Exact";

/// Narrowest possible output record: id, input address, match status.
pub const MIN_OUTPUT_FIELDS: usize = 3;

/// Narrowest matched record: adds match type, address, coordinates, tiger line.
pub const MATCH_OUTPUT_FIELDS: usize = 8;

/// Widest output record: a matched record plus the four geography columns.
pub const GEOGRAPHY_OUTPUT_FIELDS: usize = 12;

/// One address submitted for batch geocoding.
///
/// On the wire this is always five positional columns:
/// id, address, city, state, zip.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputRow {
    /// Caller-chosen unique key; echoed back on the matching output row.
    pub id: String,

    /// Street line, or a full one-line address when the other fields are empty.
    pub address: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub zip: String,
}

impl InputRow {
    /// Creates a row with only the required fields set.
    pub fn new(id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    /// Creates a row with every field set.
    pub fn with_locality(
        id: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }

    /// The five wire columns in their fixed order.
    pub fn as_record(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            self.address.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.zip.as_str(),
        ]
    }
}

/// Administrative geography identifiers for a matched row.
///
/// Only returned by `geographies` batch requests; the four columns always
/// travel together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockGeography {
    pub state: String,
    pub county: String,
    pub tract: String,
    pub block: String,
}

/// One geocoding result, keyed by the id of the input row it answers.
///
/// Rows are only ever built by decoding a CSV record. When `is_match` is
/// false, `match_address` is empty and every optional field is `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub id: String,

    /// Echo of the submitted address.
    pub input_address: String,

    pub is_match: bool,

    /// Only ever true when `is_match` is true.
    pub is_exact: bool,

    /// Normalized address the service matched against.
    pub match_address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiger_line: Option<TigerLine>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<BlockGeography>,
}

impl OutputRow {
    /// Builds a row from one CSV record.
    ///
    /// `row` is the 1-based record number, used only in error messages.
    ///
    /// # Errors
    /// - [`ParseError::ShortRow`] for fewer than 3 fields
    /// - [`ParseError::ShortMatchRow`] for a `Match` record narrower than 8 fields
    /// - any coordinate codec error for field 5
    pub fn from_record(row: u64, record: &[&str]) -> Result<Self, ParseError> {
        if record.len() < MIN_OUTPUT_FIELDS {
            return Err(ParseError::ShortRow {
                row,
                record: owned(record),
            });
        }

        let is_match = record[2] == MATCH;
        let is_exact = is_match && record.len() > 3 && record[3] == EXACT;

        let mut out = OutputRow {
            id: record[0].to_string(),
            input_address: record[1].to_string(),
            is_match,
            is_exact,
            ..Default::default()
        };

        // Non-match rows may carry a trailing status such as "Tie"; ignored.
        if !is_match {
            return Ok(out);
        }

        if record.len() < MATCH_OUTPUT_FIELDS {
            return Err(ParseError::ShortMatchRow {
                row,
                record: owned(record),
            });
        }

        out.match_address = record[4].to_string();
        out.coordinates = Some(Coordinates::parse(record[5])?);
        out.tiger_line = Some(TigerLine::new(record[6], record[7]));

        if record.len() >= GEOGRAPHY_OUTPUT_FIELDS {
            out.geography = Some(BlockGeography {
                state: record[8].to_string(),
                county: record[9].to_string(),
                tract: record[10].to_string(),
                block: record[11].to_string(),
            });
        }

        Ok(out)
    }

    /// Compares two rows field by field, with coordinates compared under
    /// [`COORDINATE_TOLERANCE`](crate::model::COORDINATE_TOLERANCE).
    pub fn approx_eq(&self, other: &OutputRow) -> bool {
        let coords_eq = match (&self.coordinates, &other.coordinates) {
            (Some(a), Some(b)) => a.approx_eq(b),
            (None, None) => true,
            _ => false,
        };

        coords_eq
            && self.id == other.id
            && self.input_address == other.input_address
            && self.is_match == other.is_match
            && self.is_exact == other.is_exact
            && self.match_address == other.match_address
            && self.tiger_line == other.tiger_line
            && self.geography == other.geography
    }
}

fn owned(record: &[&str]) -> Vec<String> {
    record.iter().map(|field| field.to_string()).collect()
}
