//! Batch geocoding: row models, CSV codecs and the multipart upload body.
//!
//! Data flows one way through this module:
//!
//! ```text
//! [InputRow] -> input CSV -> multipart body -> (HTTP) -> output CSV -> [OutputRow]
//! ```
//!
//! Nothing here performs I/O beyond the reader or writer it is handed; the
//! network call lives in [`crate::client`].
//!
//! # Example
//!
//! ```
//! use census_geocoder::batch::{from_output_csv_str, to_input_csv_string, InputRow};
//!
//! let csv = to_input_csv_string(&[InputRow::new("1", "4600 Silver Hill Rd, Washington, DC 20233")])?;
//! assert_eq!(csv, "1,\"4600 Silver Hill Rd, Washington, DC 20233\",,,\n");
//!
//! let rows = from_output_csv_str("\"1\",\"4600 Silver Hill Rd\",\"No_Match\"\n")?;
//! assert!(!rows[0].is_match);
//! # Ok::<(), census_geocoder::GeocoderError>(())
//! ```

pub mod io_input_csv;
pub mod io_output_csv;
pub mod multipart;
mod rows;

pub use io_input_csv::{
    from_input_csv_str, read_input_csv, read_input_rows, to_input_csv_string, write_input_rows,
};
pub use io_output_csv::{from_output_csv_slice, from_output_csv_str, read_output_rows};
pub use multipart::{build_batch_body, build_batch_body_with_boundary, MultipartBody};
pub use rows::{BlockGeography, InputRow, OutputRow, EXACT, MATCH};

/// Largest batch the service accepts in one upload.
pub const MAX_BATCH_ROWS: usize = 10_000;
