use crate::resolver::resolve_references;
use crate::types::{EndpointInfo, MethodRecord};
use crate::{
    PARAMETERS_FIELD, PATHS_FIELD, REF_FIELD, REQUEST_BODY_FIELD, RESPONSES_FIELD, SCHEMA_FIELD,
    TAGS_FIELD,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Builds the normalized view of one path of the document.
///
/// Every key of the path item whose value is an object is treated as a
/// method; method names are stored uppercased (`get` becomes `GET`). Request
/// bodies are resolved in full; parameter schemas are resolved only when
/// they carry a reference; responses are copied as-is.
///
/// # Examples
/// ```rust
/// use serde_json::json;
/// use oaspect::extractor::extract_endpoint_info;
///
/// let document = json!({
///     "openapi": "3.0.0",
///     "paths": {
///         "/widgets": {
///             "get": {"tags": ["widgets"], "responses": {"200": {"description": "ok"}}}
///         }
///     }
/// });
/// let endpoint = extract_endpoint_info(&document, "/widgets");
/// assert!(endpoint.error.is_none());
/// assert_eq!(endpoint.methods["GET"].tags, vec!["widgets"]);
/// ```
///
/// # Behavior
/// Extraction is total. An absent path yields empty `methods` and a
/// populated `error`; a cyclic reference keeps the offending value
/// unresolved and records the condition in `error` as well.
pub fn extract_endpoint_info(document: &Value, path: &str) -> EndpointInfo {
    let path_item = document
        .get(PATHS_FIELD)
        .and_then(|paths| paths.get(path))
        .and_then(Value::as_object);
    let Some(path_item) = path_item else {
        return EndpointInfo {
            path: path.to_string(),
            methods: IndexMap::new(),
            error: Some(format!("{} not found", path)),
        };
    };

    let mut methods = IndexMap::new();
    let mut error = None;
    for (method, operation) in path_item {
        let Some(operation) = operation.as_object() else {
            continue;
        };
        let record = build_method_record(document, operation, &mut error);
        methods.insert(method.to_uppercase(), record);
    }
    EndpointInfo {
        path: path.to_string(),
        methods,
        error,
    }
}

/// Applies [`extract_endpoint_info`] to every key of `paths`, in the
/// document's own key order. A document without paths yields an empty
/// mapping, not an error.
pub fn all_endpoints_info(document: &Value) -> IndexMap<String, EndpointInfo> {
    let Some(paths) = document.get(PATHS_FIELD).and_then(Value::as_object) else {
        return IndexMap::new();
    };
    paths
        .keys()
        .map(|path| (path.clone(), extract_endpoint_info(document, path)))
        .collect()
}

fn build_method_record(
    document: &Value,
    operation: &Map<String, Value>,
    error: &mut Option<String>,
) -> MethodRecord {
    let tags = operation
        .get(TAGS_FIELD)
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    let responses = operation
        .get(RESPONSES_FIELD)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let request_body = operation
        .get(REQUEST_BODY_FIELD)
        .map(|body| resolve_or_keep(document, body, error));
    let parameters = operation
        .get(PARAMETERS_FIELD)
        .and_then(Value::as_array)
        .map(|parameters| {
            parameters
                .iter()
                .map(|parameter| resolve_parameter(document, parameter, error))
                .collect()
        })
        .unwrap_or_default();
    MethodRecord {
        tags,
        parameters,
        responses,
        request_body,
    }
}

/// Resolution failures never abort extraction: the value is kept unresolved
/// and the condition is surfaced through the endpoint's `error` field.
fn resolve_or_keep(document: &Value, value: &Value, error: &mut Option<String>) -> Value {
    match resolve_references(document, value) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::warn!("keeping value unresolved: {}", e);
            error.get_or_insert_with(|| e.to_string());
            value.clone()
        }
    }
}

/// Parameters whose schema carries a reference get that schema resolved and
/// merged in place, with the reference field removed unconditionally from
/// the final schema. Parameters without a schema reference pass through
/// unchanged.
fn resolve_parameter(document: &Value, parameter: &Value, error: &mut Option<String>) -> Value {
    let Some(schema) = parameter.get(SCHEMA_FIELD) else {
        return parameter.clone();
    };
    if schema.get(REF_FIELD).and_then(Value::as_str).is_none() {
        return parameter.clone();
    }

    let mut resolved_schema = resolve_or_keep(document, schema, error);
    if let Some(schema_fields) = resolved_schema.as_object_mut() {
        schema_fields.remove(REF_FIELD);
    }
    let mut resolved = parameter.clone();
    if let Some(parameter_fields) = resolved.as_object_mut() {
        parameter_fields.insert(SCHEMA_FIELD.to_string(), resolved_schema);
    }
    resolved
}
