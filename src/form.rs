use crate::config::{EnvironmentOption, ExplorerConfig};
use crate::curl::{CurlSynthesizer, requirements_met};
use crate::types::operation::OperationDescriptor;
use crate::types::spec::SpecDocument;
use crate::values::ParameterValueSet;
use crate::viewer::ViewerSystem;

/// Which credential field the form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthInputKind {
    ApiKey,
    BearerToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthInput {
    pub kind: AuthInputKind,
    pub value: String,
    /// Target of the "Don't have an API Key?" link.
    pub apply_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInput {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSelector {
    pub options: Vec<EnvironmentOption>,
    pub selected: String,
}

/// Everything the example block displays for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlPreview {
    pub auth: AuthInput,
    pub environment: EnvironmentSelector,
    /// `None` when the operation takes no parameters.
    pub parameters: Option<Vec<ParameterInput>>,
    pub command: String,
}

/// Input state of the example-request form attached to an operation.
#[derive(Debug, Clone)]
pub struct CurlForm {
    operation: OperationDescriptor,
    values: ParameterValueSet,
    environment: String,
    synthesizer: CurlSynthesizer,
}

impl CurlForm {
    /// Creates the form with every parameter pre-filled with its example.
    ///
    /// Swagger 2.0 documents start on the configured default environment.
    /// OpenAPI 3.x documents start on their first server when the form is
    /// displayable at all.
    pub fn new(spec: &SpecDocument, operation: OperationDescriptor, config: ExplorerConfig) -> Self {
        let mut environment = config.default_legacy_environment.clone();
        if !spec.is_legacy() && requirements_met(spec, &operation) {
            if let Some(server) = spec.servers().into_iter().next() {
                environment = server.url;
            }
        }
        let values = ParameterValueSet::from_operation(&operation);
        Self {
            operation,
            values,
            environment,
            synthesizer: CurlSynthesizer::new(config),
        }
    }

    pub fn operation(&self) -> &OperationDescriptor {
        &self.operation
    }

    pub fn values(&self) -> &ParameterValueSet {
        &self.values
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config(&self) -> &ExplorerConfig {
        self.synthesizer.config()
    }

    pub fn set_environment(&mut self, environment: impl Into<String>) {
        self.environment = environment.into();
        log::debug!(
            "Environment of {} set to {:?}",
            self.operation.operation_id,
            self.environment
        );
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        log::debug!("Parameter {} of {} changed", name, self.operation.operation_id);
        self.values.set(name, value);
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.values.set_api_key(api_key);
        log::debug!("API key of {} changed", self.operation.operation_id);
    }

    pub fn set_bearer_token(&mut self, bearer_token: impl Into<String>) {
        self.values.set_bearer_token(bearer_token);
        log::debug!("Bearer token of {} changed", self.operation.operation_id);
    }

    /// The environment picker entries: the configured list for Swagger 2.0,
    /// one entry per server for OpenAPI 3.x.
    pub fn environment_options(&self, spec: &SpecDocument) -> Vec<EnvironmentOption> {
        if spec.is_legacy() {
            return self.config().legacy_environments.clone();
        }
        spec.servers()
            .iter()
            .map(|server| EnvironmentOption::new(server.url.clone(), server.label()))
            .collect()
    }

    /// An API key field when the first security requirement names the API
    /// key scheme, a bearer token field otherwise.
    pub fn auth_input(&self) -> AuthInput {
        let config = self.config();
        let uses_api_key = self
            .operation
            .first_requirement_schemes()
            .contains(&config.api_key_scheme.as_str());
        let (kind, value) = if uses_api_key {
            (AuthInputKind::ApiKey, self.values.api_key())
        } else {
            (AuthInputKind::BearerToken, self.values.bearer_token())
        };
        AuthInput {
            kind,
            value: value.to_string(),
            apply_url: config.apply_url.clone(),
        }
    }

    pub fn parameter_inputs(&self) -> Option<Vec<ParameterInput>> {
        if self.operation.parameters.is_empty() {
            return None;
        }
        let inputs = self
            .operation
            .parameters
            .iter()
            .map(|parameter| ParameterInput {
                name: parameter.name.clone(),
                value: self
                    .values
                    .value_or_example(&parameter.name, parameter.example.as_deref())
                    .to_string(),
            })
            .collect();
        Some(inputs)
    }

    /// The environment a render against `spec` uses.
    ///
    /// For OpenAPI 3.x documents the chosen server must be declared by
    /// `spec`; after the viewer switches versions a stale choice falls back
    /// to the first server of the displayed document.
    pub fn effective_environment(&self, spec: &SpecDocument) -> String {
        if spec.is_legacy() || spec.server_for_url(&self.environment).is_some() {
            return self.environment.clone();
        }
        match spec.servers().into_iter().next() {
            Some(server) => {
                log::debug!(
                    "Server {} is not declared by the displayed document, using {}",
                    self.environment,
                    server.url
                );
                server.url
            }
            None => self.environment.clone(),
        }
    }

    /// The current example, or `None` when the operation can not have one.
    ///
    /// Always reads the document the viewer currently displays.
    pub fn render(&self, system: &dyn ViewerSystem) -> Option<CurlPreview> {
        let spec = system.spec()?;
        if !requirements_met(&spec, &self.operation) {
            return None;
        }
        let environment = self.effective_environment(&spec);
        let command = self.synthesizer.synthesize(
            &spec,
            &self.operation,
            &self.values,
            &environment,
            system.api_version(),
        );
        Some(CurlPreview {
            auth: self.auth_input(),
            environment: EnvironmentSelector {
                options: self.environment_options(&spec),
                selected: environment,
            },
            parameters: self.parameter_inputs(),
            command,
        })
    }
}
