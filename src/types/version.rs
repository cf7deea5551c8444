use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Best-effort classification of the document's version marker. The core
/// itself is version-agnostic; this exists for the intake layer's logging
/// and for display.
pub enum OpenApiVersion {
    V2x,
    V30x,
    V31x,
}

impl FromStr for OpenApiVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("3.1") {
            Ok(OpenApiVersion::V31x)
        } else if s.starts_with("3.0") {
            Ok(OpenApiVersion::V30x)
        } else if s.starts_with("2.") {
            Ok(OpenApiVersion::V2x)
        } else {
            Err(VersionError::unsupported_version(s))
        }
    }
}

impl Display for OpenApiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenApiVersion::V2x => write!(f, "swagger 2.x"),
            OpenApiVersion::V30x => write!(f, "openapi 3.0.x"),
            OpenApiVersion::V31x => write!(f, "openapi 3.1.x"),
        }
    }
}

#[derive(Debug)]
pub enum VersionError {
    UnsupportedVersion(String),
    MissingMarker,
}

impl VersionError {
    pub(crate) fn unsupported_version<T>(version: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        VersionError::UnsupportedVersion(version.to_string())
    }
}

impl Display for VersionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionError::UnsupportedVersion(version) => {
                write!(f, "Unsupported version: {}", version)
            }
            VersionError::MissingMarker => {
                write!(f, "No openapi or swagger version marker")
            }
        }
    }
}

impl std::error::Error for VersionError {}

#[cfg(test)]
mod test {
    use crate::types::version::OpenApiVersion;
    use std::str::FromStr;

    #[test]
    fn test_version_markers_parse() {
        assert!(matches!(
            OpenApiVersion::from_str("3.1.0"),
            Ok(OpenApiVersion::V31x)
        ));
        assert!(matches!(
            OpenApiVersion::from_str("3.0.3"),
            Ok(OpenApiVersion::V30x)
        ));
        assert!(matches!(
            OpenApiVersion::from_str("2.0"),
            Ok(OpenApiVersion::V2x)
        ));
    }

    #[test]
    fn test_unknown_marker_is_rejected() {
        assert!(OpenApiVersion::from_str("1.2").is_err());
        assert!(OpenApiVersion::from_str("next").is_err());
    }
}
