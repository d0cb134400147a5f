use crate::error::ExplorerError;
use crate::traverser::OpenApiTraverser;
use crate::types::json_path::JsonPath;
use crate::types::operation::OperationDescriptor;
use crate::types::security::SecurityScheme;
use crate::types::server::ServerEntry;
use crate::types::version::SpecFormat;
use crate::{
    BASE_PATH_FIELD, COMPONENTS_FIELD, HOST_FIELD, OPERATION_ID_FIELD, PATHS_FIELD,
    SCHEMES_FIELD, SECURITY_DEFINITIONS_FIELD, SECURITY_FIELD, SECURITY_SCHEMES_FIELD,
    SERVERS_FIELD,
};
use http::Method;
use serde_json::Value;
use std::path::Path;

const DEFAULT_SCHEME: &str = "https";
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// A parsed OpenAPI document, either Swagger 2.0 or OpenAPI 3.x.
///
/// The raw JSON is kept as-is; accessors read from it on demand.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    data: Value,
    format: SpecFormat,
}

impl SpecDocument {
    pub fn new(data: Value) -> Result<Self, ExplorerError> {
        let format = SpecFormat::detect(&data)?;
        log::debug!("Loaded {} document", format);
        Ok(Self { data, format })
    }

    pub fn from_json_str(content: &str) -> Result<Self, ExplorerError> {
        let data: Value =
            serde_json::from_str(content).map_err(|e| ExplorerError::invalid_json(&e))?;
        Self::new(data)
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

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn format(&self) -> SpecFormat {
        self.format
    }

    pub fn is_legacy(&self) -> bool {
        self.format.is_legacy()
    }

    /// The Swagger 2.0 `host`, when present and non-empty.
    pub fn host(&self) -> Option<&str> {
        OpenApiTraverser::get_as_str(&self.data, HOST_FIELD)
            .ok()
            .filter(|host| !host.is_empty())
    }

    pub fn base_path(&self) -> &str {
        OpenApiTraverser::get_as_str(&self.data, BASE_PATH_FIELD).unwrap_or_default()
    }

    /// First declared Swagger 2.0 scheme, `https` when none is declared.
    pub fn scheme(&self) -> &str {
        OpenApiTraverser::get_as_array(&self.data, SCHEMES_FIELD)
            .ok()
            .and_then(|schemes| schemes.first())
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_SCHEME)
    }

    /// The OpenAPI 3.x `servers` list. Entries that do not deserialize are dropped.
    pub fn servers(&self) -> Vec<ServerEntry> {
        let Ok(servers) = OpenApiTraverser::get_as_array(&self.data, SERVERS_FIELD) else {
            return Vec::new();
        };
        servers
            .iter()
            .filter_map(|server| match serde_json::from_value(server.clone()) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Ignoring malformed server entry: {}", e);
                    None
                }
            })
            .collect()
    }

    pub fn has_servers(&self) -> bool {
        OpenApiTraverser::get_as_array(&self.data, SERVERS_FIELD)
            .map(|servers| !servers.is_empty())
            .unwrap_or(false)
    }

    pub fn server_for_url(&self, url: &str) -> Option<ServerEntry> {
        self.servers().into_iter().find(|server| server.url == url)
    }

    /// Looks up a named security scheme in the section matching the format.
    pub fn security_scheme(&self, name: &str) -> Option<SecurityScheme> {
        let traverser = OpenApiTraverser::new(&self.data);
        let definitions = match self.format {
            SpecFormat::Legacy => self.data.get(SECURITY_DEFINITIONS_FIELD),
            SpecFormat::Modern => self
                .data
                .get(COMPONENTS_FIELD)
                .and_then(|components| components.get(SECURITY_SCHEMES_FIELD)),
        }?;
        let definition = definitions.get(name)?;
        let definition = traverser.resolve_possible_ref(definition).ok()?;
        Some(SecurityScheme::from_definition(definition))
    }

    /// Document-level security requirements, used when an operation has none of its own.
    pub fn global_security(&self) -> Option<&Vec<Value>> {
        OpenApiTraverser::get_as_array(&self.data, SECURITY_FIELD).ok()
    }

    /// Every operation in the document: paths in document order, methods in
    /// `get, put, post, delete, options, head, patch, trace` order.
    pub fn operations(&self) -> Vec<OperationDescriptor> {
        let traverser = OpenApiTraverser::new(&self.data);
        let Ok(paths) = OpenApiTraverser::get_as_object(&self.data, PATHS_FIELD) else {
            return Vec::new();
        };

        let mut operations = Vec::new();
        for (path, path_item) in paths {
            for method in HTTP_METHODS {
                let Some(operation) = path_item.get(method) else {
                    continue;
                };
                if let Some(descriptor) =
                    Self::describe(&traverser, path, method, path_item, operation)
                {
                    operations.push(descriptor);
                }
            }
        }
        operations
    }

    pub fn find_operation(&self, operation_id: &str) -> Option<OperationDescriptor> {
        let traverser = OpenApiTraverser::new(&self.data);
        let paths = OpenApiTraverser::get_as_object(&self.data, PATHS_FIELD).ok()?;
        for (path, path_item) in paths {
            for method in HTTP_METHODS {
                let Some(operation) = path_item.get(method) else {
                    continue;
                };
                if OpenApiTraverser::get_as_str(operation, OPERATION_ID_FIELD).ok() == Some(operation_id) {
                    return Self::describe(&traverser, path, method, path_item, operation);
                }
            }
        }
        None
    }

    /// Follows an operation's back-reference into this document.
    pub fn operation_at(&self, location: &JsonPath) -> Option<&Value> {
        location.resolve(&self.data)
    }

    fn describe<'spec>(
        traverser: &OpenApiTraverser<'spec>,
        path: &str,
        method: &str,
        path_item: &'spec Value,
        operation: &'spec Value,
    ) -> Option<OperationDescriptor> {
        let http_method = Method::from_bytes(method.to_uppercase().as_bytes()).ok()?;
        let mut location = JsonPath::new();
        location.add(PATHS_FIELD).add(path).add(method);
        Some(OperationDescriptor::from_spec(
            traverser,
            path,
            http_method,
            path_item,
            operation,
            location,
        ))
    }
}
