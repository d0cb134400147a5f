use crate::error::ExplorerError;
use crate::types::spec::SpecDocument;
use dashmap::{DashMap, Entry, VacantEntry};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

/// Error types for registry operations
#[derive(Debug)]
pub enum CacheError {
    /// No document is registered under the requested key
    SpecNotFound,
    /// A document is already registered under the key
    SpecAlreadyExists,
    /// The document could not be read or parsed
    FailedToLoadSpec(Box<ExplorerError>),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::SpecNotFound => write!(f, "Spec not found in registry"),
            CacheError::SpecAlreadyExists => write!(f, "Spec already exists in registry"),
            CacheError::FailedToLoadSpec(err) => write!(f, "Failed to load spec: {}", err),
        }
    }
}

impl std::error::Error for CacheError {}

/// Loaded documents, shared between viewers.
///
/// Keys are usually `(api, version)` pairs; see [`crate::viewer::DocumentationViewer`].
pub struct SpecCollection<K> {
    cache: DashMap<K, Arc<SpecDocument>>,
}

impl<K> Default for SpecCollection<K>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SpecCollection<K>
where
    K: Hash + Eq,
{
    pub fn new() -> Self {
        SpecCollection {
            cache: DashMap::new(),
        }
    }

    pub fn insert_from_file_path<P>(
        &self,
        id: K,
        file_path: P,
    ) -> Result<Arc<SpecDocument>, CacheError>
    where
        P: AsRef<Path>,
    {
        let spec = SpecDocument::from_file(file_path)
            .map_err(|e| CacheError::FailedToLoadSpec(Box::new(e)))?;
        self.insert_document(id, spec)
    }

    pub fn insert(&self, id: K, spec: Value) -> Result<Arc<SpecDocument>, CacheError> {
        match self.cache.entry(id) {
            Entry::Occupied(_) => Err(CacheError::SpecAlreadyExists),
            Entry::Vacant(entry) => Self::load_spec(entry, spec),
        }
    }

    pub fn insert_document(&self, id: K, spec: SpecDocument) -> Result<Arc<SpecDocument>, CacheError> {
        match self.cache.entry(id) {
            Entry::Occupied(_) => Err(CacheError::SpecAlreadyExists),
            Entry::Vacant(entry) => {
                let spec = Arc::new(spec);
                entry.insert(spec.clone());
                Ok(spec)
            }
        }
    }

    fn load_spec(
        entry: VacantEntry<K, Arc<SpecDocument>>,
        spec: Value,
    ) -> Result<Arc<SpecDocument>, CacheError> {
        match SpecDocument::new(spec) {
            Ok(spec) => {
                let spec = Arc::new(spec);
                entry.insert(spec.clone());
                Ok(spec)
            }
            Err(e) => Err(CacheError::FailedToLoadSpec(Box::new(e))),
        }
    }

    pub fn get(&self, id: &K) -> Result<Arc<SpecDocument>, CacheError> {
        match self.cache.get(id) {
            Some(spec) => Ok(Arc::clone(spec.value())),
            None => Err(CacheError::SpecNotFound),
        }
    }

    pub fn remove(&self, id: &K) -> Result<(), CacheError> {
        if self.cache.remove(id).is_none() {
            return Err(CacheError::SpecNotFound);
        }
        Ok(())
    }

    pub fn contains(&self, id: &K) -> bool {
        self.cache.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&self) {
        self.cache.clear();
        log::debug!("Cleared spec registry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> Value {
        json!({
            "openapi": "3.0.0",
            "servers": [{"url": "https://sandbox-api.va.gov/services/fhir/v0/r4"}],
            "paths": {}
        })
    }

    #[test]
    fn test_cache_get_insert() {
        let cache: SpecCollection<String> = SpecCollection::new();
        assert!(matches!(cache.get(&"test".to_string()), Err(CacheError::SpecNotFound)));

        let inserted = cache.insert("test".to_string(), spec()).unwrap();
        assert!(!cache.is_empty());
        assert_eq!(cache.len(), 1);
        let cached = cache.get(&"test".to_string()).unwrap();
        assert!(Arc::ptr_eq(&inserted, &cached));
    }

    #[test]
    fn test_cache_insert_duplicate() {
        let cache: SpecCollection<&str> = SpecCollection::new();
        cache.insert("test", spec()).unwrap();
        assert!(matches!(
            cache.insert("test", spec()),
            Err(CacheError::SpecAlreadyExists)
        ));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_insert_invalid_spec() {
        let cache: SpecCollection<&str> = SpecCollection::new();
        let result = cache.insert("test", json!({"openapi": "1.0"}));
        assert!(matches!(result, Err(CacheError::FailedToLoadSpec(_))));
        assert!(!cache.contains(&"test"));
    }

    #[test]
    fn test_cache_insert_from_missing_file() {
        let cache: SpecCollection<&str> = SpecCollection::new();
        let result = cache.insert_from_file_path("test", "/nonexistent/openapi.json");
        match result {
            Err(CacheError::FailedToLoadSpec(err)) => {
                assert!(matches!(*err, ExplorerError::FileRead(_, _)))
            }
            _ => panic!("expected a load failure"),
        }
    }

    #[test]
    fn test_cache_remove() {
        let cache: SpecCollection<(String, String)> = SpecCollection::new();
        let key = ("claims".to_string(), "1.0.0".to_string());
        cache.insert(key.clone(), spec()).unwrap();
        assert!(cache.remove(&key).is_ok());
        assert!(matches!(cache.remove(&key), Err(CacheError::SpecNotFound)));
    }

    #[test]
    fn test_cache_clear() {
        let cache: SpecCollection<&str> = SpecCollection::new();
        cache.insert("test1", spec()).unwrap();
        cache.insert("test2", spec()).unwrap();
        cache.insert("test3", spec()).unwrap();
        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }
}
