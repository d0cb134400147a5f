use crate::traverser::OpenApiTraverser;
use crate::{IN_FIELD, NAME_FIELD};
use serde_json::Value;

const TYPE_FIELD: &str = "type";
const SCHEME_FIELD: &str = "scheme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

/// A declared security scheme, from `securityDefinitions` (Swagger 2.0) or
/// `components.securitySchemes` (OpenAPI 3.x).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityScheme {
    ApiKey { name: String, location: ApiKeyLocation },
    HttpBearer,
    HttpBasic,
    OAuth2,
    OpenIdConnect,
    Unknown(String),
}

impl SecurityScheme {
    pub(crate) fn from_definition(definition: &Value) -> Self {
        let scheme_type = OpenApiTraverser::get_as_str(definition, TYPE_FIELD).unwrap_or_default();
        match scheme_type {
            "apiKey" => {
                let name = OpenApiTraverser::get_as_str(definition, NAME_FIELD).unwrap_or_default();
                let location = match OpenApiTraverser::get_as_str(definition, IN_FIELD) {
                    Ok("query") => ApiKeyLocation::Query,
                    Ok("cookie") => ApiKeyLocation::Cookie,
                    _ => ApiKeyLocation::Header,
                };
                SecurityScheme::ApiKey {
                    name: name.to_string(),
                    location,
                }
            }
            "http" => {
                let scheme = OpenApiTraverser::get_as_str(definition, SCHEME_FIELD).unwrap_or_default();
                if scheme.eq_ignore_ascii_case("bearer") {
                    SecurityScheme::HttpBearer
                } else if scheme.eq_ignore_ascii_case("basic") {
                    SecurityScheme::HttpBasic
                } else {
                    SecurityScheme::Unknown(format!("http {}", scheme))
                }
            }
            "basic" => SecurityScheme::HttpBasic,
            "oauth2" => SecurityScheme::OAuth2,
            "openIdConnect" => SecurityScheme::OpenIdConnect,
            other => SecurityScheme::Unknown(other.to_string()),
        }
    }
}
