//! JSON response envelopes and the service's embedded `errors` convention.
//!
//! The service wraps every JSON payload in an object that may also carry an
//! `errors` array, frequently with a 200 status. This module is the only place
//! that knows about it: callers get either the payload or one
//! [`GeocoderError`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::transport::HttpResponse;
use crate::error::{GeocoderError, ParseError, TransportError};
use crate::model::{AddressMatch, Benchmark, Vintage};

/// A decoded response document that may report service errors.
pub(crate) trait Envelope: DeserializeOwned {
    type Payload;

    fn errors(&self) -> &[String];

    fn into_payload(self) -> Self::Payload;
}

// Every field is an `Option`: the service sends `null` as freely as it omits
// keys, and both mean "nothing here".

#[derive(Debug, Deserialize)]
pub(crate) struct BenchmarksEnvelope {
    #[serde(default)]
    benchmarks: Option<Vec<Benchmark>>,
    #[serde(default)]
    errors: Option<Vec<String>>,
}

impl Envelope for BenchmarksEnvelope {
    type Payload = Vec<Benchmark>;

    fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }

    fn into_payload(self) -> Self::Payload {
        self.benchmarks.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VintagesEnvelope {
    #[serde(default)]
    vintages: Option<Vec<Vintage>>,
    #[serde(default)]
    errors: Option<Vec<String>>,
}

impl Envelope for VintagesEnvelope {
    type Payload = Vec<Vintage>;

    fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }

    fn into_payload(self) -> Self::Payload {
        self.vintages.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchResult {
    #[serde(default)]
    address_matches: Option<Vec<AddressMatch>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchesEnvelope {
    #[serde(default)]
    result: Option<MatchResult>,
    #[serde(default)]
    errors: Option<Vec<String>>,
}

impl Envelope for MatchesEnvelope {
    type Payload = Vec<AddressMatch>;

    fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }

    fn into_payload(self) -> Self::Payload {
        self.result
            .and_then(|result| result.address_matches)
            .unwrap_or_default()
    }
}

/// Decodes `response` as envelope `E` and unwraps it.
///
/// - a non-empty `errors` array wins, whatever the status: the first message
///   becomes [`GeocoderError::Service`], later ones are dropped
/// - a non-2xx status without service errors is a [`TransportError::Status`]
/// - an undecodable 2xx body is a [`ParseError::Json`]
pub(crate) fn unwrap_envelope<E: Envelope>(
    endpoint: &str,
    url: &Url,
    response: &HttpResponse,
) -> Result<E::Payload, GeocoderError> {
    let decoded = serde_json::from_slice::<E>(&response.body);

    match decoded {
        Ok(envelope) => {
            if let Some(message) = envelope.errors().first() {
                return Err(GeocoderError::Service {
                    message: message.clone(),
                });
            }
            if !response.is_success() {
                return Err(status_error(url, response).into());
            }
            Ok(envelope.into_payload())
        }
        Err(_) if !response.is_success() => Err(status_error(url, response).into()),
        Err(source) => Err(ParseError::Json {
            endpoint: endpoint.to_string(),
            source,
        }
        .into()),
    }
}

pub(crate) fn status_error(url: &Url, response: &HttpResponse) -> TransportError {
    TransportError::Status {
        url: url.to_string(),
        status: response.status,
    }
}
