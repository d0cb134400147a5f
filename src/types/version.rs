use crate::{OPENAPI_FIELD, SWAGGER_FIELD};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const LEGACY_VERSION: &str = "2.0";
const MODERN_PREFIX: &str = "3.";

/// The two document layouts the explorer understands.
///
/// `Legacy` is Swagger 2.0 (single `host`), `Modern` is OpenAPI 3.x (a list of
/// `servers`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Legacy,
    Modern,
}

impl FromStr for SpecFormat {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == LEGACY_VERSION {
            Ok(SpecFormat::Legacy)
        } else if s.starts_with(MODERN_PREFIX) {
            Ok(SpecFormat::Modern)
        } else {
            Err(VersionError::unsupported_version(s))
        }
    }
}

impl SpecFormat {
    /// Reads the version discriminator of a document.
    ///
    /// A `swagger` field wins over `openapi`, matching how the viewer decides
    /// whether a document is Swagger 2.0.
    pub fn detect(document: &Value) -> Result<Self, VersionError> {
        if let Some(version) = document.get(SWAGGER_FIELD).and_then(Value::as_str) {
            return SpecFormat::from_str(version);
        }
        match document.get(OPENAPI_FIELD).and_then(Value::as_str) {
            Some(version) => SpecFormat::from_str(version),
            None => Err(VersionError::MissingDiscriminator),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, SpecFormat::Legacy)
    }
}

impl Display for SpecFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecFormat::Legacy => write!(f, "swagger 2.0"),
            SpecFormat::Modern => write!(f, "openapi 3.x"),
        }
    }
}

#[derive(Debug)]
pub enum VersionError {
    UnsupportedVersion(String),
    MissingDiscriminator,
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
            VersionError::MissingDiscriminator => {
                write!(f, "Neither 'swagger' nor 'openapi' is present")
            }
        }
    }
}

impl std::error::Error for VersionError {}
