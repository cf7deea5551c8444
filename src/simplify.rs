use crate::types::MethodRecord;
use crate::types::primitive::OpenApiPrimitives;
use crate::{CONTENT_FIELD, PROPERTIES_FIELD, SCHEMA_FIELD, TYPE_FIELD};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Reduces a method record to the shape placed on the clipboard.
///
/// When the request body carries a resolvable `content`/`schema`/`properties`
/// chain, the body is replaced entirely by a flat property-name to
/// placeholder-value mapping; content-type wrapping, required-ness, and
/// nested detail are discarded on purpose. This is a fill-in-the-blanks
/// template, not an example generator. Everything else passes through
/// unchanged, and the caller's record is never mutated.
///
/// # Examples
/// ```rust
/// use serde_json::json;
/// use oaspect::extractor::extract_endpoint_info;
/// use oaspect::simplify::simplify_method_for_copy;
///
/// let document = json!({
///     "paths": {
///         "/widgets": {
///             "post": {
///                 "requestBody": {
///                     "content": {
///                         "application/json": {
///                             "schema": {"properties": {"count": {"type": "integer"}}}
///                         }
///                     }
///                 }
///             }
///         }
///     }
/// });
/// let endpoint = extract_endpoint_info(&document, "/widgets");
/// let simplified = simplify_method_for_copy(&endpoint.methods["POST"]);
/// assert_eq!(simplified.request_body, Some(json!({"count": 0})));
/// ```
pub fn simplify_method_for_copy(record: &MethodRecord) -> MethodRecord {
    let mut simplified = record.clone();
    if let Some(template) = record.request_body.as_ref().and_then(flatten_request_body) {
        simplified.request_body = Some(template);
    }
    simplified
}

/// Serializes a record as the indented JSON text the presentation layer
/// places on the clipboard.
pub fn clipboard_json(record: &MethodRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

fn flatten_request_body(request_body: &Value) -> Option<Value> {
    let media_types = request_body.get(CONTENT_FIELD)?.as_object()?;
    // Single-representative choice: the first media type wins, the rest are
    // dropped rather than merged.
    let (_, entry) = media_types.iter().next()?;
    let properties = entry
        .get(SCHEMA_FIELD)?
        .get(PROPERTIES_FIELD)?
        .as_object()?;
    let mut template = Map::with_capacity(properties.len());
    for (name, schema) in properties {
        template.insert(name.clone(), placeholder_for_schema(schema));
    }
    Some(Value::Object(template))
}

fn placeholder_for_schema(schema: &Value) -> Value {
    schema
        .get(TYPE_FIELD)
        .and_then(Value::as_str)
        .and_then(|type_name| OpenApiPrimitives::from_str(type_name).ok())
        .map(|primitive| primitive.placeholder_value())
        .unwrap_or_else(|| Value::String(String::from("string")))
}

#[cfg(test)]
mod test {
    use crate::simplify::{clipboard_json, simplify_method_for_copy};
    use crate::types::MethodRecord;
    use serde_json::{Map, json};

    fn record_with_body(request_body: serde_json::Value) -> MethodRecord {
        MethodRecord {
            tags: vec![String::from("widgets")],
            parameters: vec![json!({"name": "id", "in": "path"})],
            responses: Map::new(),
            request_body: Some(request_body),
        }
    }

    #[test]
    fn test_placeholders_follow_declared_types() {
        let record = record_with_body(json!({
            "content": {
                "application/json": {
                    "schema": {
                        "properties": {
                            "count": {"type": "integer"},
                            "active": {"type": "boolean"},
                            "name": {"type": "string"},
                            "tags": {"type": "array"},
                            "meta": {"type": "object"}
                        }
                    }
                }
            }
        }));
        let simplified = simplify_method_for_copy(&record);
        assert_eq!(
            simplified.request_body,
            Some(json!({
                "count": 0,
                "active": false,
                "name": "string",
                "tags": [],
                "meta": {}
            }))
        );
    }

    #[test]
    fn test_untyped_property_defaults_to_string() {
        let record = record_with_body(json!({
            "content": {
                "application/json": {
                    "schema": {
                        "properties": {
                            "anything": {},
                            "strange": {"type": "widget"}
                        }
                    }
                }
            }
        }));
        let simplified = simplify_method_for_copy(&record);
        assert_eq!(
            simplified.request_body,
            Some(json!({"anything": "string", "strange": "string"}))
        );
    }

    #[test]
    fn test_first_content_type_wins() {
        let record = record_with_body(json!({
            "content": {
                "application/json": {
                    "schema": {"properties": {"name": {"type": "string"}}}
                },
                "application/x-www-form-urlencoded": {
                    "schema": {"properties": {"count": {"type": "integer"}}}
                }
            }
        }));
        let simplified = simplify_method_for_copy(&record);
        assert_eq!(simplified.request_body, Some(json!({"name": "string"})));
    }

    #[test]
    fn test_body_without_content_passes_through() {
        let record = record_with_body(json!({"description": "opaque"}));
        let simplified = simplify_method_for_copy(&record);
        assert_eq!(simplified.request_body, Some(json!({"description": "opaque"})));
    }

    #[test]
    fn test_body_without_properties_passes_through() {
        let body = json!({
            "content": {
                "application/json": {"schema": {"type": "string"}}
            }
        });
        let simplified = simplify_method_for_copy(&record_with_body(body.clone()));
        assert_eq!(simplified.request_body, Some(body));
    }

    #[test]
    fn test_absent_body_and_other_fields_pass_through() {
        let record = MethodRecord {
            tags: vec![String::from("widgets")],
            parameters: vec![json!({"name": "id"})],
            responses: Map::new(),
            request_body: None,
        };
        let simplified = simplify_method_for_copy(&record);
        assert!(simplified.request_body.is_none());
        assert_eq!(simplified.tags, record.tags);
        assert_eq!(simplified.parameters, record.parameters);
    }

    #[test]
    fn test_input_record_is_not_mutated() {
        let body = json!({
            "content": {
                "application/json": {
                    "schema": {"properties": {"name": {"type": "string"}}}
                }
            }
        });
        let record = record_with_body(body.clone());
        let _ = simplify_method_for_copy(&record);
        assert_eq!(record.request_body, Some(body));
    }

    #[test]
    fn test_clipboard_json_is_indented_and_renamed() {
        let record = record_with_body(json!({
            "content": {
                "application/json": {
                    "schema": {"properties": {"name": {"type": "string"}}}
                }
            }
        }));
        let text = clipboard_json(&simplify_method_for_copy(&record)).unwrap();
        assert!(text.contains("\"requestBody\""));
        assert!(text.contains('\n'));
        assert!(!text.contains("request_body"));
    }
}
