use crate::types::version::{OpenApiVersion, VersionError};
use crate::{OPENAPI_FIELD, PATHS_FIELD, SWAGGER_FIELD};
use bytes::Bytes;
use http::HeaderMap;
use http::header::CONTENT_TYPE;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug)]
pub enum LoaderError {
    /// The response was an HTML page rather than an API document, typically
    /// an authentication wall (e.g. Cloudflare Access) answering in place of
    /// the requested URL. The caller should prompt the user to authenticate
    /// in a separate context and retry.
    AuthenticationRequired,

    /// The payload parsed as JSON but carries none of the top-level markers
    /// (`paths`, `openapi`, `swagger`) of an API document.
    NotAnApiDocument,

    /// The payload is not valid JSON.
    Parse(String),
}

impl LoaderError {
    #[inline]
    pub(crate) fn parse(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

impl Display for LoaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::AuthenticationRequired => {
                write!(f, "Authentication required: received an HTML page instead of a document")
            }
            LoaderError::NotAnApiDocument => {
                write!(f, "Not an API document: no paths, openapi, or swagger marker")
            }
            LoaderError::Parse(message) => {
                write!(f, "Parse failure: {}", message)
            }
        }
    }
}

impl std::error::Error for LoaderError {}

/// Turns a fetched payload into a Document for the extractor.
///
/// This is the intake seam between the fetch/upload layer and the core:
/// it rejects auth-wall HTML, malformed JSON, and JSON that is not an API
/// document, so that the core only ever sees plausible input.
pub fn parse_document(headers: &HeaderMap, body: &Bytes) -> Result<Value, LoaderError> {
    let text = String::from_utf8_lossy(body);
    if is_html_content_type(headers) || looks_like_html(&text) {
        return Err(LoaderError::AuthenticationRequired);
    }
    let document: Value = serde_json::from_str(&text).map_err(LoaderError::parse)?;
    if !has_document_marker(&document) {
        return Err(LoaderError::NotAnApiDocument);
    }
    match document_version(&document) {
        Ok(version) => log::debug!("loaded {} document", version),
        Err(e) => log::debug!("loaded document with unrecognized version marker: {}", e),
    }
    Ok(document)
}

/// Reads the document's `openapi` or `swagger` marker. Best effort: the
/// extractor works the same either way, this feeds logging and display.
pub fn document_version(document: &Value) -> Result<OpenApiVersion, VersionError> {
    let marker = document
        .get(OPENAPI_FIELD)
        .or_else(|| document.get(SWAGGER_FIELD))
        .and_then(Value::as_str);
    match marker {
        Some(version) => OpenApiVersion::from_str(version),
        None => Err(VersionError::MissingMarker),
    }
}

fn has_document_marker(document: &Value) -> bool {
    document.get(PATHS_FIELD).is_some()
        || document.get(OPENAPI_FIELD).is_some()
        || document.get(SWAGGER_FIELD).is_some()
}

fn is_html_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("text/html"))
}

fn looks_like_html(body: &str) -> bool {
    let head: String = body.trim_start().chars().take(16).collect();
    let head = head.to_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}
