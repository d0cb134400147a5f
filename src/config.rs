use crate::error::ExplorerError;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// One entry of the environment picker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvironmentOption {
    pub value: String,
    pub label: String,
}

impl EnvironmentOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Settings for the example-request form and the curl synthesizer.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use apiexplorer::ExplorerConfig;
///
/// let config = ExplorerConfig::from_json_str(r#"{"default_legacy_environment": "staging"}"#).unwrap();
/// assert_eq!(config.default_legacy_environment, "staging");
/// assert_eq!(config.api_key_scheme, "apikey");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Choices offered for Swagger 2.0 documents. The empty value is production.
    pub legacy_environments: Vec<EnvironmentOption>,
    pub default_legacy_environment: String,
    /// Security scheme name the API key is authorized under.
    pub api_key_scheme: String,
    /// Security scheme name the bearer token is authorized under.
    pub bearer_scheme: String,
    pub default_accept: String,
    /// Where the "Don't have an API Key?" link points.
    pub apply_url: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            legacy_environments: vec![
                EnvironmentOption::new("dev", "Development"),
                EnvironmentOption::new("staging", "Staging"),
                EnvironmentOption::new("", "Production"),
            ],
            default_legacy_environment: "dev".to_string(),
            api_key_scheme: "apikey".to_string(),
            bearer_scheme: "bearer_token".to_string(),
            default_accept: "application/json".to_string(),
            apply_url: "/apply".to_string(),
        }
    }
}

impl ExplorerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(content: &str) -> Result<Self, ExplorerError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ExplorerError::invalid_config(&e))?;
        if !value.is_object() {
            return Err(ExplorerError::invalid_config("configuration must be a JSON object"));
        }
        let config: ExplorerConfig =
            serde_json::from_value(value).map_err(|e| ExplorerError::invalid_config(&e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P>(file_path: P) -> Result<Self, ExplorerError>
    where
        P: AsRef<Path>,
    {
        let path = file_path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExplorerError::file_read(&path.display(), &e))?;
        Self::from_json_str(&content)
    }

    pub fn legacy_environments(mut self, environments: Vec<EnvironmentOption>) -> Self {
        self.legacy_environments = environments;
        self
    }

    pub fn default_legacy_environment(mut self, environment: impl Into<String>) -> Self {
        self.default_legacy_environment = environment.into();
        self
    }

    pub fn api_key_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.api_key_scheme = scheme.into();
        self
    }

    pub fn bearer_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.bearer_scheme = scheme.into();
        self
    }

    pub fn default_accept(mut self, accept: impl Into<String>) -> Self {
        self.default_accept = accept.into();
        self
    }

    pub fn apply_url(mut self, url: impl Into<String>) -> Self {
        self.apply_url = url.into();
        self
    }

    fn validate(&self) -> Result<(), ExplorerError> {
        if self.api_key_scheme.is_empty() || self.bearer_scheme.is_empty() {
            return Err(ExplorerError::invalid_config("security scheme names must not be empty"));
        }
        if self.api_key_scheme == self.bearer_scheme {
            return Err(ExplorerError::invalid_config(
                "api key and bearer token must use different schemes",
            ));
        }
        Ok(())
    }
}
