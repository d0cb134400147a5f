//! Headless model of an API documentation explorer.
//!
//! The crate covers the interactive pieces of a documentation portal that
//! embeds a Swagger-style viewer:
//!
//! * [`curl`] turns an OpenAPI 2.0 or 3.x operation plus user-entered values
//!   into an example `curl` command.
//! * [`form`] holds the per-operation input state that feeds the synthesizer.
//! * [`version_select`] models the spec version picker.
//! * [`plugin`] and [`viewer`] describe how both are wired into the viewer.
//! * [`catalog`] filters the API catalog through feature flags.
//!
//! ```rust
//! use apiexplorer::curl::{requirements_met, synthesize};
//! use apiexplorer::types::spec::SpecDocument;
//! use apiexplorer::values::ParameterValueSet;
//! use serde_json::json;
//!
//! let spec = SpecDocument::new(json!({
//!     "swagger": "2.0",
//!     "host": "api.va.gov",
//!     "basePath": "/services/va_facilities/v0",
//!     "securityDefinitions": {
//!         "apikey": {"type": "apiKey", "name": "apikey", "in": "header"}
//!     },
//!     "paths": {
//!         "/facilities/{id}": {
//!             "get": {
//!                 "operationId": "getFacilityById",
//!                 "security": [{"apikey": []}],
//!                 "parameters": [
//!                     {"name": "id", "in": "path", "required": true, "example": "vha_688"}
//!                 ]
//!             }
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! let operation = spec.find_operation("getFacilityById").unwrap();
//! assert!(requirements_met(&spec, &operation));
//!
//! let mut values = ParameterValueSet::from_operation(&operation);
//! values.set_api_key("my-key");
//! let command = synthesize(&spec, &operation, &values, "dev", None);
//! assert_eq!(
//!     command,
//!     "curl -X GET \"https://dev-api.va.gov/services/va_facilities/v0/facilities/vha_688\" \
//!      -H \"accept: application/json\" -H \"apikey: my-key\""
//! );
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod curl;
pub mod error;
pub mod form;
pub mod plugin;
pub mod traverser;
pub mod types;
pub mod values;
pub mod version_select;
pub mod viewer;

pub use crate::config::ExplorerConfig;
pub use crate::error::ExplorerError;

const SWAGGER_FIELD: &str = "swagger";
const OPENAPI_FIELD: &str = "openapi";
const PATHS_FIELD: &str = "paths";
const PARAMETERS_FIELD: &str = "parameters";
const OPERATION_ID_FIELD: &str = "operationId";
const SECURITY_FIELD: &str = "security";
const HOST_FIELD: &str = "host";
const BASE_PATH_FIELD: &str = "basePath";
const SCHEMES_FIELD: &str = "schemes";
const SERVERS_FIELD: &str = "servers";
const PRODUCES_FIELD: &str = "produces";
const CONSUMES_FIELD: &str = "consumes";
const RESPONSES_FIELD: &str = "responses";
const CONTENT_FIELD: &str = "content";
const REQUEST_BODY_FIELD: &str = "requestBody";
const SECURITY_DEFINITIONS_FIELD: &str = "securityDefinitions";
const COMPONENTS_FIELD: &str = "components";
const SECURITY_SCHEMES_FIELD: &str = "securitySchemes";
const NAME_FIELD: &str = "name";
const IN_FIELD: &str = "in";
const REQUIRED_FIELD: &str = "required";
const EXAMPLE_FIELD: &str = "example";
const SCHEMA_FIELD: &str = "schema";
const REF_FIELD: &str = "$ref";
const PATH_SEPARATOR: &str = "/";
const TILDE: &str = "~";
const ENCODED_BACKSLASH: &str = "~1";
const ENCODED_TILDE: &str = "~0";
