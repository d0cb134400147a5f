use crate::traverser::OpenApiTraverser;
use crate::types::ParameterLocation;
use crate::types::json_path::JsonPath;
use crate::{
    CONSUMES_FIELD, CONTENT_FIELD, EXAMPLE_FIELD, IN_FIELD, NAME_FIELD, OPERATION_ID_FIELD,
    PARAMETERS_FIELD, PRODUCES_FIELD, REQUEST_BODY_FIELD, REQUIRED_FIELD, RESPONSES_FIELD,
    SCHEMA_FIELD, SECURITY_FIELD,
};
use http::Method;
use serde_json::Value;
use std::str::FromStr;

const LEGACY_EXAMPLE_FIELD: &str = "x-example";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Name under which an OpenAPI 3.x request body is edited in a
/// [`crate::values::ParameterValueSet`].
pub const REQUEST_BODY_PARAMETER: &str = "requestBody";

/// A single documented parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub example: Option<String>,
}

/// One endpoint + method combination, extracted from a spec document.
///
/// `location` points back at the raw operation object inside the owning
/// [`crate::types::spec::SpecDocument`].
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    pub operation_id: String,
    pub method: Method,
    pub path: String,
    pub parameters: Vec<ParameterDefinition>,
    pub security: Option<Vec<Value>>,
    pub produces: Vec<String>,
    pub consumes: Option<String>,
    pub location: JsonPath,
}

impl OperationDescriptor {
    /// Builds a descriptor from the raw operation object.
    ///
    /// Path-level parameters are merged in first and overridden by
    /// operation-level parameters with the same name and location. Parameters
    /// whose `$ref` can not be resolved, or that lack `name`/`in`, are skipped.
    pub(crate) fn from_spec<'spec>(
        traverser: &OpenApiTraverser<'spec>,
        path: &str,
        method: Method,
        path_item: &'spec Value,
        operation: &'spec Value,
        location: JsonPath,
    ) -> Self {
        let operation_id = OpenApiTraverser::get_as_str(operation, OPERATION_ID_FIELD)
            .unwrap_or_default()
            .to_string();

        let mut parameters: Vec<ParameterDefinition> = Vec::new();
        for source in [path_item.get(PARAMETERS_FIELD), operation.get(PARAMETERS_FIELD)]
            .into_iter()
            .flatten()
        {
            let Ok(entries) = OpenApiTraverser::require_array(source) else {
                continue;
            };
            for entry in entries {
                let Some(parameter) = Self::parse_parameter(traverser, entry) else {
                    log::debug!("Skipping unusable parameter in operation '{}'", operation_id);
                    continue;
                };
                match parameters
                    .iter_mut()
                    .find(|p| p.name == parameter.name && p.location == parameter.location)
                {
                    Some(existing) => *existing = parameter,
                    None => parameters.push(parameter),
                }
            }
        }

        let consumes = Self::extract_request_body(traverser, operation, &mut parameters)
            .or_else(|| Self::extract_consumes(traverser, operation));

        let security = operation
            .get(SECURITY_FIELD)
            .and_then(Value::as_array)
            .cloned();

        Self {
            operation_id,
            method,
            path: path.to_string(),
            parameters,
            security,
            produces: Self::extract_produces(traverser, operation),
            consumes,
            location,
        }
    }

    fn parse_parameter<'spec>(
        traverser: &OpenApiTraverser<'spec>,
        entry: &'spec Value,
    ) -> Option<ParameterDefinition> {
        let entry = traverser.resolve_possible_ref(entry).ok()?;
        let name = OpenApiTraverser::get_as_str(entry, NAME_FIELD).ok()?;
        let location = OpenApiTraverser::get_as_str(entry, IN_FIELD).ok()?;
        let location = ParameterLocation::from_str(location).ok()?;
        let required = entry
            .get(REQUIRED_FIELD)
            .and_then(|r| OpenApiTraverser::require_bool(r).ok())
            .unwrap_or(false);

        let example = entry
            .get(EXAMPLE_FIELD)
            .or_else(|| entry.get(LEGACY_EXAMPLE_FIELD))
            .or_else(|| entry.get(SCHEMA_FIELD).and_then(|s| s.get(EXAMPLE_FIELD)))
            .map(example_to_string);

        Some(ParameterDefinition {
            name: name.to_string(),
            location,
            required,
            example,
        })
    }

    /// Maps an OpenAPI 3.x `requestBody` onto a body parameter and returns its
    /// content type. Swagger 2.0 body parameters already arrive as parameters.
    fn extract_request_body<'spec>(
        traverser: &OpenApiTraverser<'spec>,
        operation: &'spec Value,
        parameters: &mut Vec<ParameterDefinition>,
    ) -> Option<String> {
        let request_body = traverser.get_optional(operation, REQUEST_BODY_FIELD).ok()??;
        let content = OpenApiTraverser::get_as_object(request_body, CONTENT_FIELD).ok()?;
        let (content_type, media) = content
            .get_key_value(JSON_CONTENT_TYPE)
            .or_else(|| content.iter().next())?;

        let example = media
            .get(EXAMPLE_FIELD)
            .or_else(|| media.get(SCHEMA_FIELD).and_then(|s| s.get(EXAMPLE_FIELD)))
            .map(example_to_string);
        let required = request_body
            .get(REQUIRED_FIELD)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        parameters.push(ParameterDefinition {
            name: REQUEST_BODY_PARAMETER.to_string(),
            location: ParameterLocation::Body,
            required,
            example,
        });
        Some(content_type.clone())
    }

    /// Swagger 2.0 `consumes`, operation level first, then document level.
    fn extract_consumes<'spec>(
        traverser: &OpenApiTraverser<'spec>,
        operation: &'spec Value,
    ) -> Option<String> {
        [operation, traverser.specification()]
            .into_iter()
            .filter_map(|node| OpenApiTraverser::get_as_array(node, CONSUMES_FIELD).ok())
            .find_map(|consumes| consumes.first().and_then(Value::as_str))
            .map(str::to_string)
    }

    fn extract_produces<'spec>(
        traverser: &OpenApiTraverser<'spec>,
        operation: &'spec Value,
    ) -> Vec<String> {
        if let Ok(produces) = OpenApiTraverser::get_as_array(operation, PRODUCES_FIELD) {
            return produces
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
        if let Some(produces) = traverser
            .specification()
            .get(PRODUCES_FIELD)
            .and_then(Value::as_array)
        {
            return produces
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }

        let mut produces: Vec<String> = Vec::new();
        if let Ok(responses) = OpenApiTraverser::get_as_object(operation, RESPONSES_FIELD) {
            for response in responses.values() {
                let Ok(response) = traverser.resolve_possible_ref(response) else {
                    continue;
                };
                if let Ok(content) = OpenApiTraverser::get_as_object(response, CONTENT_FIELD) {
                    for content_type in content.keys() {
                        if !produces.contains(content_type) {
                            produces.push(content_type.clone());
                        }
                    }
                }
            }
        }
        produces
    }

    /// Whether the operation object declares a `security` field at all.
    pub fn has_security(&self) -> bool {
        self.security.is_some()
    }

    /// Scheme names of the first security requirement.
    pub fn first_requirement_schemes(&self) -> Vec<&str> {
        self.security
            .as_ref()
            .and_then(|requirements| requirements.first())
            .and_then(Value::as_object)
            .map(|requirement| requirement.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Every scheme named by any security requirement, without duplicates.
    pub fn required_schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = Vec::new();
        for requirement in self.security.iter().flatten() {
            if let Some(requirement) = requirement.as_object() {
                for scheme in requirement.keys() {
                    if !schemes.contains(&scheme.as_str()) {
                        schemes.push(scheme);
                    }
                }
            }
        }
        schemes
    }

    pub fn parameters_in(
        &self,
        location: ParameterLocation,
    ) -> impl Iterator<Item = &ParameterDefinition> {
        self.parameters.iter().filter(move |p| p.location == location)
    }
}

fn example_to_string(example: &Value) -> String {
    match example {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
