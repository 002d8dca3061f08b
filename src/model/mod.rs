//! Value types shared by the single-address and batch paths.
//!
//! [`Coordinates`] and [`TigerLine`] appear both in JSON match payloads and in
//! batch output CSV rows. The remaining types mirror the JSON documents the
//! service returns for benchmarks, vintages and one-line address lookups.

mod coord;
mod matches;

pub use coord::{Coordinates, COORDINATE_TOLERANCE};
pub use matches::{AddressComponents, AddressMatch, Benchmark, Geographies, TigerLine, Vintage};
