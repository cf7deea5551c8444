use serde_json::{Value, json};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(PartialEq, Debug)]
pub enum OpenApiPrimitives {
    Null,
    Bool,
    Integer,
    Array,
    Number,
    String,
    Object,
}

impl Display for OpenApiPrimitives {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenApiPrimitives::Null => write!(f, "null"),
            OpenApiPrimitives::Bool => write!(f, "boolean"),
            OpenApiPrimitives::Integer => write!(f, "integer"),
            OpenApiPrimitives::Array => write!(f, "array"),
            OpenApiPrimitives::Number => write!(f, "number"),
            OpenApiPrimitives::String => write!(f, "string"),
            OpenApiPrimitives::Object => write!(f, "object"),
        }
    }
}

impl FromStr for OpenApiPrimitives {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "null" => Ok(OpenApiPrimitives::Null),
            "bool" | "boolean" => Ok(OpenApiPrimitives::Bool),
            "integer" => Ok(OpenApiPrimitives::Integer),
            "number" => Ok(OpenApiPrimitives::Number),
            "string" => Ok(OpenApiPrimitives::String),
            "array" => Ok(OpenApiPrimitives::Array),
            "object" => Ok(OpenApiPrimitives::Object),
            unknown => Err(PrimitiveError::unknown_type(unknown)),
        }
    }
}

impl OpenApiPrimitives {
    /// Representative placeholder for a property of this declared type, used
    /// to build fill-in-the-blanks request body templates.
    pub fn placeholder_value(&self) -> Value {
        match self {
            OpenApiPrimitives::Integer | OpenApiPrimitives::Number => json!(0),
            OpenApiPrimitives::Bool => json!(false),
            OpenApiPrimitives::Array => json!([]),
            OpenApiPrimitives::Object => json!({}),
            OpenApiPrimitives::Null | OpenApiPrimitives::String => json!("string"),
        }
    }
}

#[derive(Debug)]
pub enum PrimitiveError {
    UnknownType(String),
}

impl PrimitiveError {
    pub(crate) fn unknown_type<T>(type_name: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        PrimitiveError::UnknownType(type_name.to_string())
    }
}

impl Display for PrimitiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveError::UnknownType(type_name) => {
                write!(f, "Unknown type: {}", type_name)
            }
        }
    }
}

impl std::error::Error for PrimitiveError {}
