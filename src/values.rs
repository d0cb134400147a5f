use crate::types::operation::OperationDescriptor;
use crate::types::version::SpecFormat;
use std::collections::HashMap;

const LEGACY_BEARER_PREFIX: &str = "Bearer: ";

/// The credential that goes into a synthesized request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    ApiKey(String),
    BearerToken(String),
}

impl Credential {
    pub fn value(&self) -> &str {
        match self {
            Credential::ApiKey(value) => value,
            Credential::BearerToken(value) => value,
        }
    }
}

/// Values typed into the example-request form for one operation.
///
/// Parameter values are keyed by parameter name. The API key and bearer
/// token are kept apart so a parameter can never shadow them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValueSet {
    values: HashMap<String, String>,
    api_key: String,
    bearer_token: String,
}

impl ParameterValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills every declared parameter with its example, or `""`.
    pub fn from_operation(operation: &OperationDescriptor) -> Self {
        let mut set = Self::new();
        for parameter in &operation.parameters {
            set.values.insert(
                parameter.name.clone(),
                parameter.example.clone().unwrap_or_default(),
            );
        }
        set
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The edited value, then the example, then the empty string.
    pub fn value_or_example<'a>(&'a self, name: &str, example: Option<&'a str>) -> &'a str {
        self.get(name).or(example).unwrap_or_default()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    pub fn set_bearer_token(&mut self, bearer_token: impl Into<String>) {
        self.bearer_token = bearer_token.into();
    }

    /// Picks the credential to send.
    ///
    /// A non-empty API key always wins. Otherwise the bearer token is used,
    /// written as `Bearer: <token>` for Swagger 2.0 documents (which declare
    /// the token as a raw `Authorization` api key) and as the bare token for
    /// OpenAPI 3.x (whose `http` bearer scheme adds the prefix itself).
    pub fn credential(&self, format: SpecFormat) -> Credential {
        if !self.api_key.is_empty() {
            return Credential::ApiKey(self.api_key.clone());
        }
        match format {
            SpecFormat::Legacy => {
                Credential::BearerToken(format!("{}{}", LEGACY_BEARER_PREFIX, self.bearer_token))
            }
            SpecFormat::Modern => Credential::BearerToken(self.bearer_token.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::spec::SpecDocument;
    use serde_json::json;

    #[test]
    fn test_from_operation_uses_examples() {
        let spec = SpecDocument::new(json!({
            "swagger": "2.0",
            "paths": {
                "/facilities": {
                    "get": {
                        "operationId": "getAllFacilities",
                        "parameters": [
                            {"name": "state", "in": "query", "example": "FL"},
                            {"name": "page", "in": "query"}
                        ]
                    }
                }
            }
        }))
        .unwrap();
        let operation = spec.find_operation("getAllFacilities").unwrap();
        let values = ParameterValueSet::from_operation(&operation);
        assert_eq!(values.get("state"), Some("FL"));
        assert_eq!(values.get("page"), Some(""));
        assert_eq!(values.api_key(), "");
        assert_eq!(values.bearer_token(), "");
    }

    #[test]
    fn test_value_or_example_fallbacks() {
        let mut values = ParameterValueSet::new();
        assert_eq!(values.value_or_example("zip", Some("32801")), "32801");
        assert_eq!(values.value_or_example("zip", None), "");
        values.set("zip", "10001");
        assert_eq!(values.value_or_example("zip", Some("32801")), "10001");
    }

    #[test]
    fn test_api_key_takes_precedence() {
        let mut values = ParameterValueSet::new();
        values.set_api_key("key");
        values.set_bearer_token("abc");
        assert_eq!(
            values.credential(SpecFormat::Legacy),
            Credential::ApiKey("key".to_string())
        );
        assert_eq!(
            values.credential(SpecFormat::Modern),
            Credential::ApiKey("key".to_string())
        );
    }

    #[test]
    fn test_bearer_token_formatting() {
        let mut values = ParameterValueSet::new();
        values.set_bearer_token("abc");
        assert_eq!(
            values.credential(SpecFormat::Legacy),
            Credential::BearerToken("Bearer: abc".to_string())
        );
        assert_eq!(values.credential(SpecFormat::Modern).value(), "abc");
    }
}
