use crate::{PATH_SEPARATOR, SCHEMA_REGISTRY_PREFIX};

/// A parsed reference into the named-schema registry
/// (`#/components/schemas/<Name>`).
///
/// Parsing is the resolver's gatekeeper: anything that does not point into
/// the registry yields `None`, which the resolver degrades to an empty
/// schema rather than an error.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaRef<'a> {
    name: &'a str,
}

impl<'a> SchemaRef<'a> {
    /// Parses a reference string, returning `None` when it does not carry the
    /// registry prefix or names no schema. The name is the final path segment.
    pub fn parse(ref_string: &'a str) -> Option<Self> {
        let remainder = ref_string.strip_prefix(SCHEMA_REGISTRY_PREFIX)?;
        let name = remainder
            .rsplit(PATH_SEPARATOR)
            .next()
            .filter(|segment| !segment.is_empty())?;
        Some(SchemaRef { name })
    }

    /// The referenced schema's name in `components.schemas`.
    pub fn name(&self) -> &'a str {
        self.name
    }
}

#[cfg(test)]
mod test {
    use crate::types::schema_ref::SchemaRef;

    #[test]
    fn test_parse_registry_reference() {
        let schema_ref = SchemaRef::parse("#/components/schemas/Widget").unwrap();
        assert_eq!(schema_ref.name(), "Widget");
    }

    #[test]
    fn test_parse_takes_final_path_segment() {
        let schema_ref = SchemaRef::parse("#/components/schemas/nested/Widget").unwrap();
        assert_eq!(schema_ref.name(), "Widget");
    }

    #[test]
    fn test_parse_rejects_non_registry_prefix() {
        assert!(SchemaRef::parse("#/definitions/Widget").is_none());
        assert!(SchemaRef::parse("#/components/parameters/Widget").is_none());
        assert!(SchemaRef::parse("Widget").is_none());
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        assert!(SchemaRef::parse("#/components/schemas/").is_none());
    }
}
