use crate::types::schema_ref::SchemaRef;
use crate::{
    COMPONENTS_FIELD, CONTENT_FIELD, REF_FIELD, RESPONSES_FIELD, SCHEMA_FIELD, SCHEMAS_FIELD,
    serde_type_name,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

type ResolveResult = Result<Value, ResolverError>;

/// Error types that can occur while resolving schema references.
///
/// An unresolvable reference is deliberately *not* an error: it degrades to
/// an empty schema so that one broken reference does not block viewing the
/// rest of the document. Only a reference that re-enters itself is fatal,
/// since it has no finite resolved form.
#[derive(Debug, PartialEq)]
pub enum ResolverError {
    /// A reference chain led back to a reference still being resolved.
    CyclicReference(String),
}

impl ResolverError {
    /// Creates a new `CyclicReference` error.
    ///
    /// # Parameters
    /// - `ref_string`: The reference string that re-entered its own resolution
    #[inline]
    pub(crate) fn cyclic_reference(ref_string: impl Into<String>) -> Self {
        Self::CyclicReference(ref_string.into())
    }
}

impl Display for ResolverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolverError::CyclicReference(ref_string) => {
                write!(f, "Cyclic reference: {}", ref_string)
            }
        }
    }
}

impl std::error::Error for ResolverError {}

/// Recursively replaces every schema reference in `value` with the structure
/// it points to in `document`'s schema registry (`components.schemas`).
///
/// Neither input is mutated; the result is always a newly built structure.
/// Sibling keys of a `$ref` survive resolution and win over the referenced
/// schema's own fields, so a call site can narrow a shared schema locally.
/// Resolution is idempotent: running it over an already-resolved value is a
/// structural no-op.
///
/// # Examples
/// ```rust
/// use serde_json::json;
/// use oaspect::resolver::resolve_references;
///
/// let document = json!({
///     "components": {
///         "schemas": {
///             "Widget": {"type": "object", "properties": {"id": {"type": "string"}}}
///         }
///     }
/// });
/// let value = json!({"$ref": "#/components/schemas/Widget", "description": "x"});
/// let resolved = resolve_references(&document, &value).unwrap();
/// assert_eq!(resolved["description"], "x");
/// assert_eq!(resolved["properties"]["id"]["type"], "string");
/// ```
///
/// # Behavior
/// References that do not point into the registry, or whose target name is
/// absent, contribute an empty object instead of failing. The only error is
/// `ResolverError::CyclicReference`, raised when a reference chain loops.
pub fn resolve_references(document: &Value, value: &Value) -> ResolveResult {
    let mut in_progress = HashSet::new();
    resolve_value(document, value, &mut in_progress)
}

fn resolve_value(
    document: &Value,
    value: &Value,
    in_progress: &mut HashSet<String>,
) -> ResolveResult {
    match value {
        Value::Array(items) => {
            let mut resolved = Vec::with_capacity(items.len());
            for item in items {
                resolved.push(resolve_value(document, item, in_progress)?);
            }
            Ok(Value::Array(resolved))
        }
        Value::Object(fields) => resolve_object(document, fields, in_progress),
        scalar => Ok(scalar.clone()),
    }
}

fn resolve_object(
    document: &Value,
    fields: &Map<String, Value>,
    in_progress: &mut HashSet<String>,
) -> ResolveResult {
    if let Some(ref_string) = fields.get(REF_FIELD).and_then(Value::as_str) {
        return resolve_reference(document, ref_string, fields, in_progress);
    }
    if fields.get(CONTENT_FIELD).is_some_and(Value::is_object) {
        return resolve_media_types(document, fields, in_progress);
    }
    if fields.get(RESPONSES_FIELD).is_some_and(Value::is_object) {
        return resolve_responses(document, fields, in_progress);
    }
    let mut resolved = Map::with_capacity(fields.len());
    for (key, field_value) in fields {
        resolved.insert(key.clone(), resolve_value(document, field_value, in_progress)?);
    }
    Ok(Value::Object(resolved))
}

/// Resolves one `$ref`-bearing object: the referenced schema is looked up and
/// itself resolved (reference chains), then every sibling key of the original
/// object except the reference field is overlaid on top.
fn resolve_reference(
    document: &Value,
    ref_string: &str,
    fields: &Map<String, Value>,
    in_progress: &mut HashSet<String>,
) -> ResolveResult {
    if !in_progress.insert(ref_string.to_string()) {
        return Err(ResolverError::cyclic_reference(ref_string));
    }
    let mut merged = match lookup_registry_schema(document, ref_string) {
        Some(target) => match resolve_value(document, target, in_progress)? {
            Value::Object(target_fields) => target_fields,
            other => {
                log::debug!(
                    "reference '{}' resolved to {}; treating as empty schema",
                    ref_string,
                    serde_type_name(&other)
                );
                Map::new()
            }
        },
        None => {
            log::debug!(
                "unresolvable reference '{}'; treating as empty schema",
                ref_string
            );
            Map::new()
        }
    };
    in_progress.remove(ref_string);
    // Siblings are resolved too, so the output is a fixed point even when a
    // sibling carries its own reference. They still win on conflict.
    for (key, field_value) in fields {
        if key != REF_FIELD {
            merged.insert(key.clone(), resolve_value(document, field_value, in_progress)?);
        }
    }
    Ok(Value::Object(merged))
}

/// Resolves the `schema` of every media-type entry under a `content` mapping.
/// All other fields of the entries and of the container pass through as-is.
fn resolve_media_types(
    document: &Value,
    fields: &Map<String, Value>,
    in_progress: &mut HashSet<String>,
) -> ResolveResult {
    let mut resolved = fields.clone();
    if let Some(Value::Object(media_types)) = fields.get(CONTENT_FIELD) {
        let mut content = media_types.clone();
        for (media_type, entry) in media_types {
            let Some(schema) = entry.get(SCHEMA_FIELD) else {
                continue;
            };
            let resolved_schema = resolve_value(document, schema, in_progress)?;
            if let Some(entry_fields) = content.get_mut(media_type).and_then(Value::as_object_mut)
            {
                entry_fields.insert(SCHEMA_FIELD.to_string(), resolved_schema);
            }
        }
        resolved.insert(CONTENT_FIELD.to_string(), Value::Object(content));
    }
    Ok(Value::Object(resolved))
}

/// Resolves every response entry of a `responses` mapping as a whole, which
/// covers each response's own `content` in turn.
fn resolve_responses(
    document: &Value,
    fields: &Map<String, Value>,
    in_progress: &mut HashSet<String>,
) -> ResolveResult {
    let mut resolved = fields.clone();
    if let Some(Value::Object(responses)) = fields.get(RESPONSES_FIELD) {
        let mut out = Map::with_capacity(responses.len());
        for (status, response) in responses {
            out.insert(status.clone(), resolve_value(document, response, in_progress)?);
        }
        resolved.insert(RESPONSES_FIELD.to_string(), Value::Object(out));
    }
    Ok(Value::Object(resolved))
}

fn lookup_registry_schema<'a>(document: &'a Value, ref_string: &str) -> Option<&'a Value> {
    let schema_ref = SchemaRef::parse(ref_string)?;
    document
        .get(COMPONENTS_FIELD)?
        .get(SCHEMAS_FIELD)?
        .get(schema_ref.name())
}
