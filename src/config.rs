//! Immutable client configuration.
//!
//! Defaults point at the public Census geocoder. [`GeocoderConfig::from_env`]
//! overlays process environment variables on top of those defaults.

use std::sync::LazyLock;
use std::time::Duration;

use url::Url;

use crate::error::GeocoderError;

/// Public Census geocoder root.
pub const DEFAULT_BASE_URL: &str = "https://geocoding.geo.census.gov/geocoder/";

/// Benchmark used when the caller does not name one.
pub const DEFAULT_BENCHMARK: &str = "Public_AR_Current";

/// Vintage used for geography lookups when the caller does not name one.
pub const DEFAULT_VINTAGE: &str = "Current_Current";

// DEFAULT_BASE_URL is a literal absolute URL; its parse cannot fail.
static DEFAULT_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL parses"));

pub const ENV_BASE_URL: &str = "CENSUS_GEOCODER_URL";
pub const ENV_BENCHMARK: &str = "CENSUS_GEOCODER_BENCHMARK";
pub const ENV_VINTAGE: &str = "CENSUS_GEOCODER_VINTAGE";
pub const ENV_TIMEOUT_SECS: &str = "CENSUS_GEOCODER_TIMEOUT_SECS";

/// Settings a [`Geocoder`](crate::Geocoder) is constructed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeocoderConfig {
    /// Service root. Endpoint paths are joined onto it.
    pub base_url: Url,

    /// Benchmark for calls that do not take one explicitly.
    pub benchmark: String,

    /// Vintage for geography calls that do not take one explicitly.
    pub vintage: String,

    /// Whole-request timeout applied by the default transport. `None` waits
    /// indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.clone(),
            benchmark: DEFAULT_BENCHMARK.to_string(),
            vintage: DEFAULT_VINTAGE.to_string(),
            timeout: None,
        }
    }
}

impl GeocoderConfig {
    /// Creates a default configuration pointed at another service root.
    pub fn with_base_url(base_url: &str) -> Result<Self, GeocoderError> {
        Ok(Self {
            base_url: parse_base_url(ENV_BASE_URL, base_url)?,
            ..Self::default()
        })
    }

    /// Builds a configuration from the process environment.
    ///
    /// | variable | field |
    /// |----------|-------|
    /// | `CENSUS_GEOCODER_URL` | `base_url` |
    /// | `CENSUS_GEOCODER_BENCHMARK` | `benchmark` |
    /// | `CENSUS_GEOCODER_VINTAGE` | `vintage` |
    /// | `CENSUS_GEOCODER_TIMEOUT_SECS` | `timeout` |
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self, GeocoderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GeocoderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config.base_url = parse_base_url(ENV_BASE_URL, url.trim())?;
        }
        if let Some(benchmark) = get(ENV_BENCHMARK) {
            config.benchmark = benchmark.trim().to_string();
        }
        if let Some(vintage) = get(ENV_VINTAGE) {
            config.vintage = vintage.trim().to_string();
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|e| GeocoderError::Config {
                key: ENV_TIMEOUT_SECS.to_string(),
                message: format!("{secs:?} is not a whole number of seconds: {e}"),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Parses a service root, forcing a trailing slash so that joining
/// `"benchmarks"` onto `http://host/geocoder` keeps the `geocoder` segment.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, GeocoderError> {
    let mut url = Url::parse(raw).map_err(|e| GeocoderError::Config {
        key: key.to_string(),
        message: format!("{raw:?} is not a valid URL: {e}"),
    })?;

    if url.cannot_be_a_base() {
        return Err(GeocoderError::Config {
            key: key.to_string(),
            message: format!("{raw:?} cannot be used as a base URL"),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
