pub mod json_path;
pub mod operation;
pub mod security;
pub mod server;
pub mod spec;
pub mod version;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Where a parameter is sent. `Body` and `FormData` only occur in Swagger 2.0
/// documents; OpenAPI 3.x request bodies are mapped onto `Body` as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Header,
    Query,
    Cookie,
    Path,
    Body,
    FormData,
}

impl FromStr for ParameterLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(ParameterLocation::Header),
            "query" => Ok(ParameterLocation::Query),
            "cookie" => Ok(ParameterLocation::Cookie),
            "path" => Ok(ParameterLocation::Path),
            "body" => Ok(ParameterLocation::Body),
            "formData" => Ok(ParameterLocation::FormData),
            other => Err(other.to_string()),
        }
    }
}

impl Display for ParameterLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            ParameterLocation::Header => "header",
            ParameterLocation::Query => "query",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Path => "path",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
        };
        write!(f, "{}", str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_location_round_trip() {
        for location in ["header", "query", "cookie", "path", "body", "formData"] {
            let parsed = ParameterLocation::from_str(location).unwrap();
            assert_eq!(parsed.to_string(), location);
        }
    }

    #[test]
    fn test_parameter_location_unknown() {
        assert_eq!(
            ParameterLocation::from_str("matrix"),
            Err("matrix".to_string())
        );
    }
}
