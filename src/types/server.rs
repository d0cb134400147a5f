use serde::Deserialize;
use std::collections::BTreeMap;

/// A `servers[]` entry of an OpenAPI 3.x document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerEntry {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub variables: BTreeMap<String, ServerVariable>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerVariable {
    #[serde(default)]
    pub default: String,
    #[serde(default, rename = "enum")]
    pub allowed: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ServerEntry {
    /// The text shown for this server in the environment picker.
    pub fn label(&self) -> &str {
        match &self.description {
            Some(description) if !description.is_empty() => description,
            _ => &self.url,
        }
    }

    /// Substitutes `{name}` placeholders in `url`.
    ///
    /// `overrides` win over the declared defaults; placeholders that are in
    /// neither are left untouched.
    pub fn expand_url(url: &str, overrides: &BTreeMap<String, String>, declared: Option<&ServerEntry>) -> String {
        let mut expanded = url.to_string();
        for (name, value) in overrides {
            expanded = expanded.replace(&format!("{{{}}}", name), value);
        }
        if let Some(server) = declared {
            for (name, variable) in &server.variables {
                expanded = expanded.replace(&format!("{{{}}}", name), &variable.default);
            }
        }
        expanded
    }
}
