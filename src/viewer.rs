use crate::cache::{CacheError, SpecCollection};
use crate::error::ExplorerError;
use crate::types::spec::SpecDocument;
use std::sync::Arc;

/// Registry key: `(api name, version)`.
pub type SpecKey = (String, String);

/// What the example form and the version picker read from the viewer.
pub trait ViewerSystem {
    /// The document currently displayed, if any.
    fn spec(&self) -> Option<Arc<SpecDocument>>;

    /// The version currently displayed, if the API is versioned.
    fn api_version(&self) -> Option<&str>;
}

/// Displays one API at a time, switching between versions held in a shared
/// [`SpecCollection`].
pub struct DocumentationViewer {
    registry: Arc<SpecCollection<SpecKey>>,
    api_name: String,
    api_version: Option<String>,
    active: Option<Arc<SpecDocument>>,
}

impl DocumentationViewer {
    pub fn new(registry: Arc<SpecCollection<SpecKey>>, api_name: impl Into<String>) -> Self {
        Self {
            registry,
            api_name: api_name.into(),
            api_version: None,
            active: None,
        }
    }

    /// Opens `api_name` at `version`.
    pub fn open(
        registry: Arc<SpecCollection<SpecKey>>,
        api_name: impl Into<String>,
        version: &str,
    ) -> Result<Self, ExplorerError> {
        let mut viewer = Self::new(registry, api_name);
        viewer.reload(version)?;
        Ok(viewer)
    }

    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    pub fn registry(&self) -> &Arc<SpecCollection<SpecKey>> {
        &self.registry
    }

    /// Switches the displayed document to `version`.
    ///
    /// The current document stays in place when the version is not registered.
    pub fn reload(&mut self, version: &str) -> Result<Arc<SpecDocument>, ExplorerError> {
        let key = (self.api_name.clone(), version.to_string());
        let spec = match self.registry.get(&key) {
            Ok(spec) => spec,
            Err(CacheError::SpecNotFound) => {
                log::warn!("Version {} of {} is not loaded", version, self.api_name);
                return Err(ExplorerError::version_not_found(&self.api_name, version));
            }
            Err(e) => return Err(e.into()),
        };
        log::debug!("Loaded version {} of {}", version, self.api_name);
        self.api_version = Some(version.to_string());
        self.active = Some(Arc::clone(&spec));
        Ok(spec)
    }
}

impl ViewerSystem for DocumentationViewer {
    fn spec(&self) -> Option<Arc<SpecDocument>> {
        self.active.clone()
    }

    fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }
}
