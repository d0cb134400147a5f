use crate::config::ExplorerConfig;
use crate::curl::{ExampleRequest, curlify};
use crate::form::CurlForm;
use crate::types::operation::OperationDescriptor;
use crate::types::spec::SpecDocument;
use crate::version_select::{VersionMetadata, VersionSelector, should_show_selector};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Reloads the viewer at another spec version.
pub trait VersionHandler: Send + Sync {
    fn reload(&self, version: &str);
}

impl<F> VersionHandler for F
where
    F: Fn(&str) + Send + Sync,
{
    fn reload(&self, version: &str) {
        self(version)
    }
}

/// Components the plugin renders in place of the viewer's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentOverride {
    /// Base layout with the version picker on top.
    ExtendedLayout,
    OperationTag,
    Servers,
    ServersContainer,
}

pub const COMPONENT_OVERRIDES: [ComponentOverride; 4] = [
    ComponentOverride::ExtendedLayout,
    ComponentOverride::OperationTag,
    ComponentOverride::Servers,
    ComponentOverride::ServersContainer,
];

pub struct PluginFunctions {
    pub curlify: fn(&ExampleRequest) -> String,
    pub version_handler: Arc<dyn VersionHandler>,
}

impl Debug for PluginFunctions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginFunctions").finish_non_exhaustive()
    }
}

/// Transforms applied to the viewer's `spec` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecStateTransforms {
    pub try_it_out_enabled: bool,
}

/// Viewer components the plugin wraps rather than replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrappedComponents {
    pub authorize_visible: bool,
    /// Operation parameters get the example form appended.
    pub parameters_with_curl_form: bool,
}

/// Everything registered into the documentation viewer.
#[derive(Debug)]
pub struct ExplorerPlugin {
    pub components: Vec<ComponentOverride>,
    pub functions: PluginFunctions,
    pub state_transforms: SpecStateTransforms,
    pub wrap_components: WrappedComponents,
    config: ExplorerConfig,
}

impl ExplorerPlugin {
    pub fn new<H>(version_handler: H) -> Self
    where
        H: VersionHandler + 'static,
    {
        Self::with_config(version_handler, ExplorerConfig::default())
    }

    pub fn with_config<H>(version_handler: H, config: ExplorerConfig) -> Self
    where
        H: VersionHandler + 'static,
    {
        Self {
            components: COMPONENT_OVERRIDES.to_vec(),
            functions: PluginFunctions {
                curlify,
                version_handler: Arc::new(version_handler),
            },
            state_transforms: SpecStateTransforms {
                try_it_out_enabled: false,
            },
            wrap_components: WrappedComponents {
                authorize_visible: false,
                parameters_with_curl_form: true,
            },
            config,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn overrides(&self, component: ComponentOverride) -> bool {
        self.components.contains(&component)
    }

    pub fn curlify(&self, request: &ExampleRequest) -> String {
        (self.functions.curlify)(request)
    }

    /// Whether the layout renders the version picker for this metadata.
    pub fn show_version_selector(&self, metadata: Option<&VersionMetadata>) -> bool {
        self.overrides(ComponentOverride::ExtendedLayout) && should_show_selector(metadata)
    }

    /// Confirms the picker and hands the chosen version to the handler.
    pub fn confirm_version(&self, selector: &mut VersionSelector) -> String {
        let handler = &self.functions.version_handler;
        selector.confirm(|version| handler.reload(version))
    }

    /// The example form shown under an operation's parameters, if the
    /// parameters are wrapped at all.
    pub fn curl_form(&self, spec: &SpecDocument, operation: OperationDescriptor) -> Option<CurlForm> {
        if !self.wrap_components.parameters_with_curl_form {
            return None;
        }
        Some(CurlForm::new(spec, operation, self.config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version_select::VersionInfo;
    use http::Method;
    use serde_json::json;
    use std::sync::Mutex;

    fn recording_plugin() -> (ExplorerPlugin, Arc<Mutex<Vec<String>>>) {
        let reloaded = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reloaded);
        let plugin = ExplorerPlugin::new(move |version: &str| {
            sink.lock().unwrap().push(version.to_string());
        });
        (plugin, reloaded)
    }

    fn metadata() -> VersionMetadata {
        VersionMetadata::new(vec![
            VersionInfo {
                version: "1.0.0".to_string(),
                status: "Current Version".to_string(),
                internal_only: false,
            },
            VersionInfo {
                version: "0.0.1".to_string(),
                status: "Previous Version".to_string(),
                internal_only: false,
            },
        ])
    }

    #[test]
    fn test_default_slots() {
        let (plugin, _) = recording_plugin();
        for component in COMPONENT_OVERRIDES {
            assert!(plugin.overrides(component));
        }
        assert!(!plugin.state_transforms.try_it_out_enabled);
        assert!(!plugin.wrap_components.authorize_visible);
        assert!(plugin.wrap_components.parameters_with_curl_form);
    }

    #[test]
    fn test_curlify_slot() {
        let (plugin, _) = recording_plugin();
        let request = ExampleRequest {
            method: Method::DELETE,
            url: "https://api.va.gov/x".to_string(),
            headers: vec![],
            body: None,
        };
        assert_eq!(plugin.curlify(&request), r#"curl -X DELETE "https://api.va.gov/x""#);
    }

    #[test]
    fn test_confirm_version_calls_handler_once() {
        let (plugin, reloaded) = recording_plugin();
        let mut selector = VersionSelector::new(metadata(), "1.0.0");

        selector.select("0.0.1");
        assert!(reloaded.lock().unwrap().is_empty());

        assert_eq!(plugin.confirm_version(&mut selector), "0.0.1");
        assert_eq!(*reloaded.lock().unwrap(), vec!["0.0.1".to_string()]);
    }

    #[test]
    fn test_show_version_selector() {
        let (mut plugin, _) = recording_plugin();
        assert!(plugin.show_version_selector(Some(&metadata())));
        assert!(!plugin.show_version_selector(Some(&VersionMetadata::default())));

        plugin.components.clear();
        assert!(!plugin.show_version_selector(Some(&metadata())));
    }

    #[test]
    fn test_curl_form_uses_plugin_config() {
        let config = ExplorerConfig::new().default_legacy_environment("staging");
        let plugin = ExplorerPlugin::with_config(|_: &str| {}, config);
        let spec = SpecDocument::new(json!({
            "swagger": "2.0",
            "host": "api.va.gov",
            "paths": {"/x": {"get": {"operationId": "x", "security": [{"apikey": []}]}}}
        }))
        .unwrap();
        let form = plugin
            .curl_form(&spec, spec.find_operation("x").unwrap())
            .unwrap();
        assert_eq!(form.environment(), "staging");
    }
}
