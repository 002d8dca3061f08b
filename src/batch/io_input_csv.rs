//! Batch input CSV writer and reader.
//!
//! The service expects a headerless CSV file with exactly five columns per
//! record, in this order:
//!
//! | column | content | required |
//! |--------|---------|----------|
//! | 1 | unique id | yes |
//! | 2 | street address | yes |
//! | 3 | city | no |
//! | 4 | state | no |
//! | 5 | zip | no |
//!
//! Optional columns are written as empty strings, never omitted. Standard CSV
//! quoting applies to any field containing a comma, quote or newline.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use tracing::debug;

use super::rows::InputRow;
use crate::error::{GeocoderError, ParseError};

/// Number of columns in every input record.
pub const INPUT_FIELDS: usize = 5;

/// Writes `rows` as batch input CSV to `sink`.
///
/// Rows are written in order with no header. The CSV buffer and `sink` are
/// both flushed before this returns `Ok`, so a downstream reader of `sink`
/// sees every byte.
///
/// # Errors
/// The first write or flush failure aborts the call. Callers cannot assume
/// any particular prefix of `rows` reached the sink.
pub fn write_input_rows<W: Write>(sink: W, rows: &[InputRow]) -> Result<(), GeocoderError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);

    for row in rows {
        writer
            .write_record(row.as_record())
            .map_err(GeocoderError::CsvWrite)?;
    }

    writer.flush().map_err(GeocoderError::Io)?;
    debug!(rows = rows.len(), "wrote batch input CSV");
    Ok(())
}

/// Encodes `rows` as a batch input CSV string.
pub fn to_input_csv_string(rows: &[InputRow]) -> Result<String, GeocoderError> {
    let mut buf = Vec::new();
    write_input_rows(&mut buf, rows)?;

    // Every field is a Rust String, so the encoding is valid UTF-8.
    String::from_utf8(buf).map_err(|e| {
        GeocoderError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Reads batch input rows from a headerless five-column CSV source.
///
/// The first record is *not* treated as a header; strip column titles before
/// calling this.
///
/// # Errors
/// Fails on the first record that does not have exactly five fields
/// ([`ParseError::InputRowWidth`]) or on malformed CSV. No partial result is
/// returned.
pub fn read_input_rows<R: Read>(source: R) -> Result<Vec<InputRow>, GeocoderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(ParseError::Csv)?;

        if record.len() != INPUT_FIELDS {
            return Err(ParseError::InputRowWidth {
                row: (idx + 1) as u64,
                record: record.iter().map(str::to_string).collect(),
            }
            .into());
        }

        rows.push(InputRow::with_locality(
            &record[0], &record[1], &record[2], &record[3], &record[4],
        ));
    }

    debug!(rows = rows.len(), "read batch input CSV");
    Ok(rows)
}

/// Reads batch input rows from a CSV file.
pub fn read_input_csv(path: &Path) -> Result<Vec<InputRow>, GeocoderError> {
    let file = File::open(path).map_err(GeocoderError::Io)?;
    read_input_rows(BufReader::new(file))
}

/// Reads batch input rows from a CSV string.
pub fn from_input_csv_str(csv_str: &str) -> Result<Vec<InputRow>, GeocoderError> {
    read_input_rows(csv_str.as_bytes())
}
