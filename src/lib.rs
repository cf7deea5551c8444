pub mod extractor;
pub mod loader;
pub mod resolver;
pub mod simplify;
pub mod types;

use serde_json::Value;

const REF_FIELD: &'static str = "$ref";
const PATHS_FIELD: &'static str = "paths";
const CONTENT_FIELD: &'static str = "content";
const SCHEMA_FIELD: &'static str = "schema";
const SCHEMAS_FIELD: &'static str = "schemas";
const COMPONENTS_FIELD: &'static str = "components";
const REQUEST_BODY_FIELD: &'static str = "requestBody";
const PARAMETERS_FIELD: &'static str = "parameters";
const RESPONSES_FIELD: &'static str = "responses";
const PROPERTIES_FIELD: &'static str = "properties";
const TAGS_FIELD: &'static str = "tags";
const TYPE_FIELD: &'static str = "type";
const OPENAPI_FIELD: &'static str = "openapi";
const SWAGGER_FIELD: &'static str = "swagger";
const PATH_SEPARATOR: &'static str = "/";
const SCHEMA_REGISTRY_PREFIX: &'static str = "#/components/schemas/";

fn serde_type_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}
