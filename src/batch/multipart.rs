//! `multipart/form-data` request bodies for batch uploads.
//!
//! The batch endpoints take the request parameters as plain form fields and
//! the addresses as a CSV file part:
//!
//! ```text
//! --<boundary>
//! Content-Disposition: form-data; name="benchmark"
//!
//! Public_AR_Current
//! --<boundary>
//! Content-Disposition: form-data; name="addressFile"; filename="input.csv"
//! Content-Type: text/csv
//!
//! 1,4600 Silver Hill Rd,Washington,DC,20233
//! --<boundary>--
//! ```
//!
//! Lines are CRLF-terminated on the wire. The body is built fully in memory;
//! the service caps batch size, so bodies stay small.

use std::io::Write;

use tracing::debug;

use super::io_input_csv::write_input_rows;
use super::rows::InputRow;
use crate::error::GeocoderError;

/// Form field name of the address file part.
pub const ADDRESS_FILE_FIELD: &str = "addressFile";

/// Filename sent with the address file part.
pub const ADDRESS_FILE_NAME: &str = "input.csv";

const MAX_BOUNDARY_LEN: usize = 70;

/// A complete multipart body and the `Content-Type` value that describes it.
///
/// The two are a matched pair: the content type carries the boundary used to
/// frame `body`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultipartBody {
    pub content_type: String,
    pub body: Vec<u8>,
}

impl MultipartBody {
    /// Returns the boundary embedded in the content type.
    pub fn boundary(&self) -> Option<&str> {
        self.content_type
            .split(';')
            .filter_map(|param| param.trim().strip_prefix("boundary="))
            .map(|b| b.trim_matches('"'))
            .next()
    }
}

/// Builds a batch upload body with a freshly generated boundary.
///
/// `fields` become plain form fields, in the given order, ahead of the
/// address file part holding the CSV encoding of `rows`.
pub fn build_batch_body<K, V>(
    rows: &[InputRow],
    fields: &[(K, V)],
) -> Result<MultipartBody, GeocoderError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    build_batch_body_with_boundary(rows, fields, &random_boundary())
}

/// Builds a batch upload body framed with the given boundary.
///
/// # Errors
/// [`GeocoderError::Multipart`] if the boundary is empty, longer than 70
/// characters, or contains anything besides ASCII alphanumerics and
/// `'+_-.`.
pub fn build_batch_body_with_boundary<K, V>(
    rows: &[InputRow],
    fields: &[(K, V)],
    boundary: &str,
) -> Result<MultipartBody, GeocoderError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    validate_boundary(boundary)?;

    let mut body = Vec::new();

    for (name, value) in fields {
        write!(
            body,
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n",
            escape_quotes(name.as_ref())
        )?;
        body.write_all(value.as_ref().as_bytes())?;
        body.write_all(b"\r\n")?;
    }

    write!(
        body,
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{ADDRESS_FILE_FIELD}\"; filename=\"{ADDRESS_FILE_NAME}\"\r\nContent-Type: text/csv\r\n\r\n"
    )?;
    write_input_rows(&mut body, rows)?;
    write!(body, "\r\n--{boundary}--\r\n")?;

    debug!(
        rows = rows.len(),
        fields = fields.len(),
        bytes = body.len(),
        "built batch multipart body"
    );

    Ok(MultipartBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        body,
    })
}

fn random_boundary() -> String {
    format!("{:032x}", rand::random::<u128>())
}

fn validate_boundary(boundary: &str) -> Result<(), GeocoderError> {
    let invalid = |message: String| Err(GeocoderError::Multipart { message });

    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return invalid(format!(
            "boundary must be 1 to {MAX_BOUNDARY_LEN} characters, got {}",
            boundary.len()
        ));
    }

    if let Some(c) = boundary.chars().find(|c| !is_boundary_char(*c)) {
        return invalid(format!("boundary contains invalid character {c:?}"));
    }

    Ok(())
}

fn is_boundary_char(c: char) -> bool {
    // Restricted to characters that need no quoting in the Content-Type header.
    c.is_ascii_alphanumeric() || "'+_-.".contains(c)
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
