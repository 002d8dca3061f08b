use thiserror::Error;

/// The main error type for geocoder operations.
///
/// Every public operation returns exactly one of these. The three semantic
/// classes a caller usually cares about are [`GeocoderError::Parse`] (bad
/// data), [`GeocoderError::Service`] (the service said no) and
/// [`GeocoderError::Transport`] (the exchange itself failed).
#[derive(Debug, Error)]
pub enum GeocoderError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The service answered at the transport level but reported an error in
    /// its `errors` array. Only the first message is kept.
    #[error("service error: {message}")]
    Service { message: String },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write batch CSV: {0}")]
    CsvWrite(#[source] csv::Error),

    #[error("failed to build multipart body: {message}")]
    Multipart { message: String },

    #[error("invalid configuration for {key}: {message}")]
    Config { key: String, message: String },
}

impl GeocoderError {
    /// Returns the service-reported message, if this is a service error.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            GeocoderError::Service { message } => Some(message),
            _ => None,
        }
    }
}

/// Which half of a coordinate pair failed to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Errors raised while decoding coordinates, CSV records, or JSON payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed coordinates {input:?}: expected \"x,y\"")]
    MalformedCoordinate { input: String },

    #[error("invalid {axis} coordinate in {input:?}: {source}")]
    InvalidNumber {
        axis: Axis,
        input: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("invalid batch output row {row}: expected at least 3 fields, got {record:?}")]
    ShortRow { row: u64, record: Vec<String> },

    #[error("invalid batch output row {row}: match row needs 8 fields, got {record:?}")]
    ShortMatchRow { row: u64, record: Vec<String> },

    #[error("invalid batch input row {row}: expected 5 fields, got {record:?}")]
    InputRowWidth { row: u64, record: Vec<String> },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to decode {endpoint} response: {source}")]
    Json {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of the HTTP exchange itself, never conflated with service errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
