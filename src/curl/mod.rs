//! Example `curl` command synthesis.
//!
//! [`requirements_met`] decides whether an operation can get an example at
//! all; [`synthesize`] (or [`CurlSynthesizer::synthesize`] with a custom
//! [`ExplorerConfig`]) produces the command. Synthesis assumes the gate
//! passed and never fails.

pub mod render;
pub mod request;

pub use render::curlify;
pub use request::{ExampleRequest, legacy_host, version_variable};

use crate::config::ExplorerConfig;
use crate::types::operation::OperationDescriptor;
use crate::types::spec::SpecDocument;
use crate::values::ParameterValueSet;
use request::RequestBuilder;

/// Whether the example form should be shown for `operation`.
///
/// The operation must declare `security`, and the document must say where
/// to send the request: a non-empty `host` for Swagger 2.0, a non-empty
/// `servers` list for OpenAPI 3.x.
pub fn requirements_met(spec: &SpecDocument, operation: &OperationDescriptor) -> bool {
    if !operation.has_security() {
        return false;
    }
    if spec.is_legacy() {
        spec.host().is_some()
    } else {
        spec.has_servers()
    }
}

/// Synthesizes a command with the default configuration.
pub fn synthesize(
    spec: &SpecDocument,
    operation: &OperationDescriptor,
    values: &ParameterValueSet,
    environment: &str,
    api_version: Option<&str>,
) -> String {
    CurlSynthesizer::default().synthesize(spec, operation, values, environment, api_version)
}

#[derive(Debug, Clone, Default)]
pub struct CurlSynthesizer {
    config: ExplorerConfig,
}

impl CurlSynthesizer {
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Resolves the request without rendering it.
    ///
    /// `environment` is the environment prefix for Swagger 2.0 documents
    /// (`""` for production) and the server URL for OpenAPI 3.x documents.
    /// `api_version` is the version currently selected in the viewer.
    pub fn build_request(
        &self,
        spec: &SpecDocument,
        operation: &OperationDescriptor,
        values: &ParameterValueSet,
        environment: &str,
        api_version: Option<&str>,
    ) -> ExampleRequest {
        RequestBuilder::new(spec, operation, values, &self.config).build(environment, api_version)
    }

    pub fn synthesize(
        &self,
        spec: &SpecDocument,
        operation: &OperationDescriptor,
        values: &ParameterValueSet,
        environment: &str,
        api_version: Option<&str>,
    ) -> String {
        let request = self.build_request(spec, operation, values, environment, api_version);
        curlify(&request)
    }
}
