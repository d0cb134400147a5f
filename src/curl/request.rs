//! Operation + values → concrete HTTP request.
//!
//! Mirrors what the documentation viewer's own request builder does for an
//! operation: resolve the base URL, substitute path parameters, append query
//! parameters, collect headers and apply the authorized security scheme.

use crate::config::ExplorerConfig;
use crate::types::ParameterLocation;
use crate::types::operation::OperationDescriptor;
use crate::types::security::{ApiKeyLocation, SecurityScheme};
use crate::types::server::ServerEntry;
use crate::types::spec::SpecDocument;
use crate::values::{Credential, ParameterValueSet};
use http::Method;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use std::collections::BTreeMap;

/// Characters left alone when encoding a single path segment or query
/// component (the RFC 3986 unreserved set).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const VERSION_VARIABLE: &str = "version";
const DEFAULT_VERSION_DIGIT: char = '0';
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const AUTHORIZATION_HEADER: &str = "Authorization";

/// A fully resolved example request, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// The `version` server variable for OpenAPI 3.x documents.
///
/// Takes the first character of the selected API version, so `"2.0.1"`
/// becomes `"v2"`. An unset or empty version yields `"v0"`.
pub fn version_variable(api_version: Option<&str>) -> String {
    let digit = api_version
        .and_then(|version| version.chars().next())
        .unwrap_or(DEFAULT_VERSION_DIGIT);
    format!("v{}", digit)
}

/// The effective Swagger 2.0 host for an environment. The empty environment
/// is production and leaves the host unprefixed.
pub fn legacy_host(host: &str, environment: &str) -> String {
    if environment.is_empty() {
        host.to_string()
    } else {
        format!("{}-{}", environment, host)
    }
}

pub(crate) struct RequestBuilder<'a> {
    spec: &'a SpecDocument,
    operation: &'a OperationDescriptor,
    values: &'a ParameterValueSet,
    config: &'a ExplorerConfig,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(
        spec: &'a SpecDocument,
        operation: &'a OperationDescriptor,
        values: &'a ParameterValueSet,
        config: &'a ExplorerConfig,
    ) -> Self {
        Self {
            spec,
            operation,
            values,
            config,
        }
    }

    pub(crate) fn build(&self, environment: &str, api_version: Option<&str>) -> ExampleRequest {
        let mut query: Vec<(String, String)> = Vec::new();
        let mut headers: Vec<(String, String)> = Vec::new();

        headers.push((
            http::header::ACCEPT.as_str().to_string(),
            self.accept().to_string(),
        ));
        for parameter in self.operation.parameters_in(ParameterLocation::Header) {
            let value = self.value_for(&parameter.name, parameter.example.as_deref());
            if !value.is_empty() {
                headers.push((parameter.name.clone(), value.to_string()));
            }
        }
        for parameter in self.operation.parameters_in(ParameterLocation::Query) {
            let value = self.value_for(&parameter.name, parameter.example.as_deref());
            if !value.is_empty() {
                query.push((parameter.name.clone(), value.to_string()));
            }
        }

        let mut cookies: Vec<String> = Vec::new();
        for parameter in self.operation.parameters_in(ParameterLocation::Cookie) {
            let value = self.value_for(&parameter.name, parameter.example.as_deref());
            if !value.is_empty() {
                cookies.push(format!("{}={}", parameter.name, value));
            }
        }

        let body = self.body(&mut headers);
        self.apply_security(&mut headers, &mut query, &mut cookies);
        if !cookies.is_empty() {
            headers.push((http::header::COOKIE.as_str().to_string(), cookies.join("; ")));
        }

        let mut url = format!(
            "{}{}",
            self.base_url(environment, api_version).trim_end_matches('/'),
            self.substituted_path()
        );
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|(name, value)| {
                    format!(
                        "{}={}",
                        utf8_percent_encode(name, COMPONENT),
                        utf8_percent_encode(value, COMPONENT)
                    )
                })
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }

        ExampleRequest {
            method: self.operation.method.clone(),
            url,
            headers,
            body,
        }
    }

    fn value_for(&self, name: &str, example: Option<&'a str>) -> &'a str {
        self.values.value_or_example(name, example)
    }

    fn accept(&self) -> &str {
        self.operation
            .produces
            .first()
            .map(String::as_str)
            .unwrap_or(&self.config.default_accept)
    }

    fn base_url(&self, environment: &str, api_version: Option<&str>) -> String {
        if self.spec.is_legacy() {
            let host = match self.spec.host() {
                Some(host) => host,
                None => {
                    log::warn!(
                        "Swagger 2.0 document has no host; operation '{}' gets a relative URL",
                        self.operation.operation_id
                    );
                    return self.spec.base_path().to_string();
                }
            };
            format!(
                "{}://{}{}",
                self.spec.scheme(),
                legacy_host(host, environment),
                self.spec.base_path()
            )
        } else {
            let mut overrides = BTreeMap::new();
            overrides.insert(
                VERSION_VARIABLE.to_string(),
                version_variable(api_version),
            );
            let declared = self.spec.server_for_url(environment);
            ServerEntry::expand_url(environment, &overrides, declared.as_ref())
        }
    }

    fn substituted_path(&self) -> String {
        let mut path = self.operation.path.clone();
        for parameter in self.operation.parameters_in(ParameterLocation::Path) {
            let value = self.value_for(&parameter.name, parameter.example.as_deref());
            path = path.replace(
                &format!("{{{}}}", parameter.name),
                &utf8_percent_encode(value, COMPONENT).to_string(),
            );
        }
        path
    }

    fn body(&self, headers: &mut Vec<(String, String)>) -> Option<String> {
        if let Some(parameter) = self.operation.parameters_in(ParameterLocation::Body).next() {
            let value = self.value_for(&parameter.name, parameter.example.as_deref());
            if value.is_empty() {
                return None;
            }
            let content_type = self
                .operation
                .consumes
                .clone()
                .unwrap_or_else(|| self.config.default_accept.clone());
            headers.push((http::header::CONTENT_TYPE.as_str().to_string(), content_type));
            return Some(value.to_string());
        }

        let form: Vec<String> = self
            .operation
            .parameters_in(ParameterLocation::FormData)
            .filter_map(|parameter| {
                let value = self.value_for(&parameter.name, parameter.example.as_deref());
                if value.is_empty() {
                    return None;
                }
                Some(format!(
                    "{}={}",
                    utf8_percent_encode(&parameter.name, COMPONENT),
                    utf8_percent_encode(value, COMPONENT)
                ))
            })
            .collect();
        if form.is_empty() {
            return None;
        }
        headers.push((
            http::header::CONTENT_TYPE.as_str().to_string(),
            FORM_CONTENT_TYPE.to_string(),
        ));
        Some(form.join("&"))
    }

    /// Applies the chosen credential when the operation requires its scheme.
    fn apply_security(
        &self,
        headers: &mut Vec<(String, String)>,
        query: &mut Vec<(String, String)>,
        cookies: &mut Vec<String>,
    ) {
        let credential = self.values.credential(self.spec.format());
        let scheme_name = match &credential {
            Credential::ApiKey(_) => self.config.api_key_scheme.as_str(),
            Credential::BearerToken(_) => self.config.bearer_scheme.as_str(),
        };
        if credential.value().is_empty() {
            return;
        }
        if !self.requires_scheme(scheme_name) {
            log::debug!(
                "Operation '{}' does not require '{}', sending no credential",
                self.operation.operation_id,
                scheme_name
            );
            return;
        }

        let value = credential.value().to_string();
        match self.spec.security_scheme(scheme_name) {
            Some(SecurityScheme::ApiKey { name, location }) => match location {
                ApiKeyLocation::Header => headers.push((name, value)),
                ApiKeyLocation::Query => query.push((name, value)),
                ApiKeyLocation::Cookie => cookies.push(format!("{}={}", name, value)),
            },
            Some(SecurityScheme::HttpBearer)
            | Some(SecurityScheme::OAuth2)
            | Some(SecurityScheme::OpenIdConnect) => {
                headers.push((AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", value)))
            }
            Some(other) => {
                log::warn!(
                    "Security scheme '{}' ({:?}) can not carry the selected credential",
                    scheme_name,
                    other
                );
            }
            None => headers.push((scheme_name.to_string(), value)),
        }
    }

    fn requires_scheme(&self, scheme_name: &str) -> bool {
        if self.operation.has_security() {
            return self.operation.required_schemes().contains(&scheme_name);
        }
        self.spec
            .global_security()
            .map(|requirements| {
                requirements
                    .iter()
                    .filter_map(Value::as_object)
                    .any(|requirement| requirement.contains_key(scheme_name))
            })
            .unwrap_or(false)
    }
}
