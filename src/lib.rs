//! census-geocoder: a client for the US Census geocoding service.
//!
//! The service resolves street addresses to coordinates and, on request, to
//! administrative geography identifiers (state, county, tract, block). It
//! offers one-line lookups returning JSON and batch uploads exchanging CSV.
//!
//! # Modules
//!
//! - [`client`]: the [`Geocoder`] and its pluggable HTTP transport
//! - [`batch`]: batch row types, the CSV codecs and the multipart upload body
//! - [`model`]: coordinates and the JSON payload types
//! - [`config`]: base URL, default benchmark/vintage, timeout
//! - [`validation`]: opt-in preflight checks for batch input
//! - [`error`]: error types
//!
//! # Example
//!
//! ```no_run
//! use census_geocoder::{batch::InputRow, Geocoder};
//!
//! let geocoder = Geocoder::from_env()?;
//! let rows = vec![
//!     InputRow::with_locality("1", "4600 Silver Hill Rd", "Washington", "DC", "20233"),
//!     InputRow::new("2", "1600 Pennsylvania Ave NW, Washington, DC 20500"),
//! ];
//!
//! for row in geocoder.batch_geographies(&rows)? {
//!     match (&row.coordinates, &row.geography) {
//!         (Some(c), Some(g)) => println!("{}: {} tract {}", row.id, c, g.tract),
//!         _ => println!("{}: no match", row.id),
//!     }
//! }
//! # Ok::<(), census_geocoder::GeocoderError>(())
//! ```

pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod validation;

pub use batch::{InputRow, OutputRow};
pub use client::{Geocoder, HttpResponse, HttpTransport, ReturnType, UreqTransport};
pub use config::GeocoderConfig;
pub use error::{GeocoderError, ParseError, TransportError};
pub use model::{AddressMatch, Benchmark, Coordinates, TigerLine, Vintage};

// Shortcuts against a default-configured geocoder. Each call builds its own
// instance; nothing is shared between calls.

/// Lists benchmarks from the public service.
pub fn benchmarks() -> Result<Vec<Benchmark>, GeocoderError> {
    Geocoder::default().benchmarks()
}

/// Lists vintages for `benchmark` from the public service.
pub fn vintages(benchmark: &str) -> Result<Vec<Vintage>, GeocoderError> {
    Geocoder::default().vintages(benchmark)
}

/// Geocodes a one-line address with the default benchmark.
pub fn locations(address: &str) -> Result<Vec<AddressMatch>, GeocoderError> {
    Geocoder::default().locations(address)
}

/// Geocodes a one-line address with geography layers.
pub fn geographies(
    address: &str,
    benchmark: &str,
    vintage: &str,
) -> Result<Vec<AddressMatch>, GeocoderError> {
    Geocoder::default().geographies_from_vintage(address, benchmark, vintage)
}

/// Batch geocodes `rows` with the default benchmark.
pub fn batch_locations(rows: &[InputRow]) -> Result<Vec<OutputRow>, GeocoderError> {
    Geocoder::default().batch_locations(rows)
}

/// Batch geocodes `rows` with geography columns.
pub fn batch_geographies(
    rows: &[InputRow],
    benchmark: &str,
    vintage: &str,
) -> Result<Vec<OutputRow>, GeocoderError> {
    Geocoder::default().batch_geographies_from_vintage(rows, benchmark, vintage)
}
