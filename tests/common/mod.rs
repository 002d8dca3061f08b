#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use census_geocoder::{GeocoderConfig, HttpResponse, HttpTransport, TransportError};
use url::Url;

pub const TEST_BENCHMARK: &str = "Public_AR_Current";
pub const TEST_ADDRESS: &str = "4600 Silver Hill Rd, Washington, DC 20233";

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("read fixture")
}

pub fn mock_config() -> GeocoderConfig {
    GeocoderConfig::with_base_url("http://mock.test/geocoder/").expect("mock config")
}

/// One request as seen by [`MockTransport`].
#[derive(Clone, Debug)]
pub struct Request {
    pub method: &'static str,
    pub url: Url,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Request {
    pub fn query(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

enum Reply {
    Response(HttpResponse),
    Fail(String),
}

/// In-memory stand-in for the geocoder service.
///
/// Routes match on the trailing part of the request path. Unrouted paths get
/// a plain-text 404, like the real server's mux.
pub struct MockTransport {
    routes: Vec<(String, Reply)>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serves every endpoint from the fixture files.
    pub fn with_fixtures() -> Self {
        Self::new()
            .route("/benchmarks", 200, &fixture("benchmarks.json"))
            .route("/vintages", 200, &fixture("vintages.json"))
            .route("/locations/onelineaddress", 200, &fixture("locations.json"))
            .route("/geographies/onelineaddress", 200, &fixture("geographies.json"))
            .route(
                "/locations/addressbatch",
                200,
                &fixture("batch-output-locations.csv"),
            )
            .route(
                "/geographies/addressbatch",
                200,
                &fixture("batch-output-geographies.csv"),
            )
    }

    pub fn route(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            path.to_string(),
            Reply::Response(HttpResponse::new(status, body)),
        ));
        self
    }

    pub fn fail(mut self, path: &str, message: &str) -> Self {
        self.routes
            .push((path.to_string(), Reply::Fail(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().expect("lock").clone()
    }

    fn reply(&self, request: Request) -> Result<HttpResponse, TransportError> {
        let path = request.url.path().to_string();
        self.requests.lock().expect("lock").push(request);

        match self.routes.iter().find(|(route, _)| path.ends_with(route.as_str())) {
            Some((_, Reply::Response(response))) => Ok(response.clone()),
            Some((_, Reply::Fail(message))) => Err(TransportError::Other(message.clone())),
            None => Ok(HttpResponse::new(404, "404 page not found\n")),
        }
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.reply(Request {
            method: "GET",
            url: url.clone(),
            content_type: None,
            body: Vec::new(),
        })
    }

    fn post(
        &self,
        url: &Url,
        content_type: &str,
        body: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        self.reply(Request {
            method: "POST",
            url: url.clone(),
            content_type: Some(content_type.to_string()),
            body: body.to_vec(),
        })
    }
}

/// One decoded part of a multipart/form-data body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl Part {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.content).expect("utf8 part")
    }
}

/// Minimal multipart/form-data parser, independent of the builder under test.
pub fn parse_multipart(content_type: &str, body: &[u8]) -> Result<Vec<Part>, String> {
    let mime = content_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or_default();
    if mime != "multipart/form-data" {
        return Err(format!("not multipart/form-data: {content_type}"));
    }

    let boundary = content_type
        .split(';')
        .filter_map(|p| p.trim().strip_prefix("boundary="))
        .map(|b| b.trim_matches('"'))
        .next()
        .ok_or_else(|| format!("no boundary in {content_type}"))?;

    let delimiter = format!("--{boundary}").into_bytes();
    let separator = [b"\r\n".as_slice(), delimiter.as_slice()].concat();

    if !body.starts_with(&delimiter) {
        return Err("body does not start with the boundary".to_string());
    }

    let mut parts = Vec::new();
    let mut pos = delimiter.len();

    loop {
        if body[pos..].starts_with(b"--") {
            return Ok(parts);
        }
        if !body[pos..].starts_with(b"\r\n") {
            return Err(format!("expected CRLF after boundary at byte {pos}"));
        }

        let start = pos + 2;
        let end = find(body, &separator, start)
            .ok_or_else(|| "unterminated part".to_string())?;
        parts.push(parse_part(&body[start..end])?);
        pos = end + separator.len();
    }
}

fn parse_part(raw: &[u8]) -> Result<Part, String> {
    let split = find(raw, b"\r\n\r\n", 0).ok_or_else(|| "part without headers".to_string())?;
    let headers = std::str::from_utf8(&raw[..split]).map_err(|e| e.to_string())?;
    let content = raw[split + 4..].to_vec();

    let mut name = None;
    let mut filename = None;
    let mut content_type = None;

    for line in headers.split("\r\n") {
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| format!("bad header line {line:?}"))?;
        match key.trim().to_ascii_lowercase().as_str() {
            "content-disposition" => {
                for param in value.split(';').skip(1) {
                    let (k, v) = param
                        .trim()
                        .split_once('=')
                        .ok_or_else(|| format!("bad parameter {param:?}"))?;
                    let v = v.trim_matches('"').replace("\\\"", "\"");
                    match k {
                        "name" => name = Some(v),
                        "filename" => filename = Some(v),
                        _ => {}
                    }
                }
            }
            "content-type" => content_type = Some(value.trim().to_string()),
            _ => {}
        }
    }

    Ok(Part {
        name: name.ok_or_else(|| "part without name".to_string())?,
        filename,
        content_type,
        content,
    })
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}
