pub mod primitive;
pub mod schema_ref;
pub mod version;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// One HTTP operation of an endpoint, normalized for display and copying.
///
/// `parameters` and `request_body` carry resolved schemas; `responses` is the
/// source document's mapping copied as-is.
#[derive(Debug, Clone, Serialize)]
pub struct MethodRecord {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub parameters: Vec<Value>,
    pub responses: Map<String, Value>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
}

/// A path of the document together with all of its method records, keyed by
/// uppercased method name.
///
/// `error` is populated for the recoverable conditions (absent path, cyclic
/// reference) instead of failing extraction; callers must check it.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub methods: IndexMap<String, MethodRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
