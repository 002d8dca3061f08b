//! Service-facing client.
//!
//! [`Geocoder`] builds endpoint URLs from its [`GeocoderConfig`], issues one
//! request per call through an [`HttpTransport`], and turns the response into
//! typed values or a single [`GeocoderError`]. It holds no mutable state, so
//! one instance can serve many threads.

mod envelope;
pub mod transport;

use tracing::debug;
use url::Url;

use crate::batch::{self, InputRow, OutputRow};
use crate::config::GeocoderConfig;
use crate::error::{GeocoderError, TransportError};
use crate::model::{AddressMatch, Benchmark, Vintage};

use envelope::{status_error, unwrap_envelope, BenchmarksEnvelope, MatchesEnvelope, VintagesEnvelope};
pub use transport::{HttpResponse, HttpTransport, UreqTransport};

/// Which kind of answer a lookup asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// Matched address, coordinates and tiger line.
    Locations,
    /// Everything in `Locations` plus geography layers; needs a vintage.
    Geographies,
}

impl ReturnType {
    /// Path segment used by the service for this return type.
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnType::Locations => "locations",
            ReturnType::Geographies => "geographies",
        }
    }
}

impl std::fmt::Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Census geocoder client.
///
/// # Example
///
/// ```no_run
/// use census_geocoder::Geocoder;
///
/// let geocoder = Geocoder::default();
/// for m in geocoder.locations("4600 Silver Hill Rd, Washington, DC 20233")? {
///     println!("{} at {}", m.matched_address, m.coordinates);
/// }
/// # Ok::<(), census_geocoder::GeocoderError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Geocoder<T = UreqTransport> {
    config: GeocoderConfig,
    transport: T,
}

impl Geocoder<UreqTransport> {
    /// Creates a geocoder using the default `ureq` transport.
    pub fn new(config: GeocoderConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self { config, transport }
    }

    /// Creates a geocoder configured from the process environment.
    ///
    /// See [`GeocoderConfig::from_env`].
    pub fn from_env() -> Result<Self, GeocoderError> {
        Ok(Self::new(GeocoderConfig::from_env()?))
    }
}

impl Default for Geocoder<UreqTransport> {
    fn default() -> Self {
        Self::new(GeocoderConfig::default())
    }
}

impl<T: HttpTransport> Geocoder<T> {
    /// Creates a geocoder that sends requests through `transport`.
    pub fn with_transport(config: GeocoderConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Lists the available benchmarks.
    pub fn benchmarks(&self) -> Result<Vec<Benchmark>, GeocoderError> {
        self.get_json::<BenchmarksEnvelope>("benchmarks", &[])
    }

    /// Lists the vintages available for `benchmark`.
    pub fn vintages(&self, benchmark: &str) -> Result<Vec<Vintage>, GeocoderError> {
        self.get_json::<VintagesEnvelope>("vintages", &[("benchmark", benchmark)])
    }

    /// Geocodes a one-line address against the configured benchmark.
    pub fn locations(&self, address: &str) -> Result<Vec<AddressMatch>, GeocoderError> {
        self.locations_from_benchmark(address, &self.config.benchmark)
    }

    /// Geocodes a one-line address against `benchmark`.
    pub fn locations_from_benchmark(
        &self,
        address: &str,
        benchmark: &str,
    ) -> Result<Vec<AddressMatch>, GeocoderError> {
        self.get_json::<MatchesEnvelope>(
            "locations/onelineaddress",
            &[
                ("address", address),
                ("benchmark", benchmark),
                ("format", "json"),
            ],
        )
    }

    /// Geocodes a one-line address with geography layers, using the
    /// configured benchmark and vintage.
    pub fn geographies(&self, address: &str) -> Result<Vec<AddressMatch>, GeocoderError> {
        self.geographies_from_vintage(address, &self.config.benchmark, &self.config.vintage)
    }

    /// Geocodes a one-line address with geography layers from `vintage`.
    pub fn geographies_from_vintage(
        &self,
        address: &str,
        benchmark: &str,
        vintage: &str,
    ) -> Result<Vec<AddressMatch>, GeocoderError> {
        self.get_json::<MatchesEnvelope>(
            "geographies/onelineaddress",
            &[
                ("address", address),
                ("benchmark", benchmark),
                ("vintage", vintage),
                ("format", "json"),
            ],
        )
    }

    /// Batch geocodes `rows` against the configured benchmark.
    pub fn batch_locations(&self, rows: &[InputRow]) -> Result<Vec<OutputRow>, GeocoderError> {
        self.batch_locations_from_benchmark(rows, &self.config.benchmark)
    }

    /// Batch geocodes `rows` against `benchmark`.
    pub fn batch_locations_from_benchmark(
        &self,
        rows: &[InputRow],
        benchmark: &str,
    ) -> Result<Vec<OutputRow>, GeocoderError> {
        self.batch(ReturnType::Locations, rows, &[("benchmark", benchmark)])
    }

    /// Batch geocodes `rows` with the configured benchmark and vintage,
    /// filling in each matched row's [`BlockGeography`](crate::batch::BlockGeography).
    pub fn batch_geographies(&self, rows: &[InputRow]) -> Result<Vec<OutputRow>, GeocoderError> {
        self.batch_geographies_from_vintage(rows, &self.config.benchmark, &self.config.vintage)
    }

    /// Batch geocodes `rows` with geography columns from `vintage`.
    pub fn batch_geographies_from_vintage(
        &self,
        rows: &[InputRow],
        benchmark: &str,
        vintage: &str,
    ) -> Result<Vec<OutputRow>, GeocoderError> {
        self.batch(
            ReturnType::Geographies,
            rows,
            &[("benchmark", benchmark), ("vintage", vintage)],
        )
    }

    /// Uploads `rows` to the `addressbatch` endpoint for `return_type`.
    ///
    /// `fields` are sent as form fields ahead of the address file. An empty
    /// `rows` slice returns an empty result without contacting the service.
    ///
    /// # Errors
    /// Any undecodable response row fails the whole batch; no partial result
    /// is returned.
    pub fn batch(
        &self,
        return_type: ReturnType,
        rows: &[InputRow],
        fields: &[(&str, &str)],
    ) -> Result<Vec<OutputRow>, GeocoderError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let upload = batch::build_batch_body(rows, fields)?;
        let url = self.endpoint(&format!("{return_type}/addressbatch"), &[])?;

        debug!(%url, rows = rows.len(), bytes = upload.body.len(), "POST batch");
        let response = self
            .transport
            .post(&url, &upload.content_type, &upload.body)?;
        debug!(%url, status = response.status, bytes = response.body.len(), "batch response");

        if !response.is_success() {
            return Err(status_error(&url, &response).into());
        }

        batch::from_output_csv_slice(&response.body)
    }

    fn get_json<E: envelope::Envelope>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<E::Payload, GeocoderError> {
        let url = self.endpoint(path, query)?;

        debug!(%url, "GET");
        let response = self.transport.get(&url)?;
        debug!(%url, status = response.status, bytes = response.body.len(), "response");

        unwrap_envelope::<E>(path, &url, &response)
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, GeocoderError> {
        let mut url = self
            .config
            .base_url
            .join(path)
            .map_err(TransportError::Url)?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}
