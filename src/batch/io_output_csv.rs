//! Batch output CSV reader.
//!
//! The service answers a batch upload with a headerless CSV whose record width
//! depends on the outcome of each row and on the requested return type:
//!
//! | fields | meaning |
//! |--------|---------|
//! | 0 | id from the input row |
//! | 1 | input address as the service saw it |
//! | 2 | `Match`, `No_Match` or `Tie` |
//! | 3 | `Exact` or `Non_Exact` (matches only) |
//! | 4 | matched, normalized address |
//! | 5 | `"x,y"` coordinates |
//! | 6, 7 | tiger line id and side |
//! | 8..=11 | state, county, tract, block (`geographies` only) |
//!
//! Records are 3 to 12 fields wide. Decoding is fail-fast: one bad record
//! fails the whole read and no partial list is returned.

use std::io::Read;

use tracing::{debug, trace};

use super::rows::OutputRow;
use crate::error::{GeocoderError, ParseError};

/// Decodes every record in `source` into an [`OutputRow`], preserving order.
///
/// Duplicate ids are passed through unchanged.
///
/// # Errors
/// [`ParseError::ShortRow`], [`ParseError::ShortMatchRow`], a coordinate codec
/// error, or [`ParseError::Csv`] for framing problems.
pub fn read_output_rows<R: Read>(source: R) -> Result<Vec<OutputRow>, GeocoderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(ParseError::Csv)?;
        let fields: Vec<&str> = record.iter().collect();
        trace!(row = idx + 1, width = fields.len(), "decoding batch output record");

        rows.push(OutputRow::from_record((idx + 1) as u64, &fields)?);
    }

    debug!(
        rows = rows.len(),
        matched = rows.iter().filter(|r| r.is_match).count(),
        "read batch output CSV"
    );
    Ok(rows)
}

/// Decodes batch output rows from a CSV string.
pub fn from_output_csv_str(csv_str: &str) -> Result<Vec<OutputRow>, GeocoderError> {
    read_output_rows(csv_str.as_bytes())
}

/// Decodes batch output rows from raw response bytes.
///
/// Non-UTF-8 input is reported as a CSV error rather than rejected upfront.
pub fn from_output_csv_slice(bytes: &[u8]) -> Result<Vec<OutputRow>, GeocoderError> {
    read_output_rows(bytes)
}
