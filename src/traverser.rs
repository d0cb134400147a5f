use crate::REF_FIELD;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

type TraverseNodeResult<'a> = Result<&'a Value, TraverserError<'a>>;
type TraverseOptionalNodeResult<'a> = Result<Option<&'a Value>, TraverserError<'a>>;
type TraverseTypeResult<'a, T> = Result<&'a T, TraverserError<'a>>;

/// Error types that can occur while reading a spec document.
#[derive(Debug)]
pub enum TraverserError<'a> {
    /// A required field was not found in the document.
    MissingField(Cow<'a, str>),

    /// The found type does not match the expected type.
    TypeMismatch {
        expected: Cow<'a, str>,
        found: Cow<'a, str>,
    },

    /// The reference points outside of the document.
    InvalidStructure(Cow<'a, str>),

    /// A circular reference was detected.
    CyclicReference(Cow<'a, str>),
}

impl<'a> TraverserError<'a> {
    #[inline]
    pub(crate) fn missing_field(message: impl Into<Cow<'a, str>>) -> Self {
        Self::MissingField(message.into())
    }

    #[inline]
    pub(crate) fn type_mismatch(
        expected: impl Into<Cow<'a, str>>,
        found: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    #[inline]
    pub(crate) fn invalid_structure(message: impl Into<Cow<'a, str>>) -> Self {
        Self::InvalidStructure(message.into())
    }

    #[inline]
    pub(crate) fn cyclic_reference(message: impl Into<Cow<'a, str>>) -> Self {
        Self::CyclicReference(message.into())
    }
}

impl Display for TraverserError<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TraverserError::MissingField(field) => {
                write!(f, "Missing field: {}", field)
            }
            TraverserError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            TraverserError::InvalidStructure(field) => {
                write!(f, "Invalid structure: {}", field)
            }
            TraverserError::CyclicReference(field) => {
                write!(f, "Cyclic reference: {}", field)
            }
        }
    }
}

impl std::error::Error for TraverserError<'_> {}

/// Read-only view over a spec document that follows local `$ref`s.
///
/// Parameters in both Swagger 2.0 (`#/parameters/...`) and OpenAPI 3.x
/// (`#/components/parameters/...`) are frequently shared through references,
/// so every lookup that can land on one goes through
/// [`OpenApiTraverser::resolve_possible_ref`].
pub struct OpenApiTraverser<'spec> {
    specification: &'spec Value,
}

impl<'spec> OpenApiTraverser<'spec> {
    pub fn new(specification: &'spec Value) -> Self {
        Self { specification }
    }

    pub fn specification(&self) -> &'spec Value {
        self.specification
    }

    /// Resolves `node` if it is a `{"$ref": "#/..."}` object, otherwise returns it unchanged.
    ///
    /// # Examples
    /// ```rust
    /// use serde_json::json;
    /// use apiexplorer::traverser::OpenApiTraverser;
    ///
    /// let spec = json!({
    ///     "parameters": {"Id": {"name": "id", "in": "path"}},
    ///     "alias": {"$ref": "#/parameters/Id"}
    /// });
    /// let traverser = OpenApiTraverser::new(&spec);
    /// let resolved = traverser.resolve_possible_ref(&spec["alias"]).unwrap();
    /// assert_eq!(resolved["name"], "id");
    /// ```
    pub fn resolve_possible_ref(&self, node: &'spec Value) -> TraverseNodeResult<'spec> {
        let mut seen_references: HashSet<&'spec str> = HashSet::new();
        let mut current = node;
        while let Ok(ref_string) = Self::get_as_str(current, REF_FIELD) {
            if !seen_references.insert(ref_string) {
                return Err(TraverserError::cyclic_reference(ref_string));
            }
            let pointer = match ref_string.strip_prefix('#') {
                Some(pointer) => pointer,
                None => return Err(TraverserError::invalid_structure(ref_string)),
            };
            current = match self.specification.pointer(pointer) {
                Some(found) => found,
                None => return Err(TraverserError::missing_field(ref_string)),
            };
        }
        Ok(current)
    }

    /// Retrieves a field after resolving references, failing if it is missing.
    pub fn get_required(&self, node: &'spec Value, field: &'spec str) -> TraverseNodeResult<'spec> {
        let node = self.resolve_possible_ref(node)?;
        match node.get(field) {
            None => Err(TraverserError::missing_field(field)),
            Some(found) => self.resolve_possible_ref(found),
        }
    }

    /// Like [`OpenApiTraverser::get_required`] but maps a missing field to `None`.
    pub fn get_optional(
        &self,
        node: &'spec Value,
        field: &'spec str,
    ) -> TraverseOptionalNodeResult<'spec> {
        match self.get_required(node, field) {
            Ok(found) => Ok(Some(found)),
            Err(TraverserError::MissingField(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn get_as_type<'n, T, F>(node: &'n Value, field: &str, converter: F) -> TraverseTypeResult<'n, T>
    where
        T: ?Sized,
        F: Fn(&'n Value) -> TraverseTypeResult<'n, T>,
    {
        match node.get(field) {
            None => Err(TraverserError::missing_field(field.to_string())),
            Some(found) => converter(found),
        }
    }

    fn require_type<'n, T, F>(
        node: &'n Value,
        converter: F,
        type_name: &'static str,
    ) -> Result<T, TraverserError<'n>>
    where
        F: Fn(&'n Value) -> Option<T>,
    {
        converter(node).ok_or_else(|| TraverserError::type_mismatch(type_name, node.to_string()))
    }

    pub(crate) fn get_as_str<'n>(node: &'n Value, field: &str) -> TraverseTypeResult<'n, str> {
        Self::get_as_type(node, field, Self::require_str)
    }

    pub(crate) fn get_as_object<'n>(
        node: &'n Value,
        field: &str,
    ) -> TraverseTypeResult<'n, Map<String, Value>> {
        Self::get_as_type(node, field, Self::require_object)
    }

    pub(crate) fn get_as_array<'n>(node: &'n Value, field: &str) -> TraverseTypeResult<'n, Vec<Value>> {
        Self::get_as_type(node, field, Self::require_array)
    }

    pub(crate) fn require_bool(node: &Value) -> Result<bool, TraverserError<'_>> {
        Self::require_type(node, Value::as_bool, "bool")
    }

    pub(crate) fn require_str(node: &Value) -> TraverseTypeResult<'_, str> {
        Self::require_type(node, Value::as_str, "string")
    }

    pub(crate) fn require_object(node: &Value) -> TraverseTypeResult<'_, Map<String, Value>> {
        Self::require_type(node, Value::as_object, "object")
    }

    pub(crate) fn require_array(node: &Value) -> TraverseTypeResult<'_, Vec<Value>> {
        Self::require_type(node, Value::as_array, "array")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_plain_node() {
        let spec = json!({"a": {"b": 1}});
        let traverser = OpenApiTraverser::new(&spec);
        let node = traverser.resolve_possible_ref(&spec["a"]).unwrap();
        assert_eq!(node, &json!({"b": 1}));
    }

    #[test]
    fn test_resolve_chained_refs() {
        let spec = json!({
            "components": {
                "parameters": {
                    "Page": {"$ref": "#/components/parameters/RealPage"},
                    "RealPage": {"name": "page", "in": "query"}
                }
            },
            "use": {"$ref": "#/components/parameters/Page"}
        });
        let traverser = OpenApiTraverser::new(&spec);
        let node = traverser.resolve_possible_ref(&spec["use"]).unwrap();
        assert_eq!(node["name"], "page");
    }

    #[test]
    fn test_resolve_cyclic_ref() {
        let spec = json!({
            "a": {"$ref": "#/b"},
            "b": {"$ref": "#/a"}
        });
        let traverser = OpenApiTraverser::new(&spec);
        let result = traverser.resolve_possible_ref(&spec["a"]);
        assert!(matches!(result, Err(TraverserError::CyclicReference(_))));
    }

    #[test]
    fn test_resolve_external_ref() {
        let spec = json!({"a": {"$ref": "other.json#/b"}});
        let traverser = OpenApiTraverser::new(&spec);
        let result = traverser.resolve_possible_ref(&spec["a"]);
        assert!(matches!(result, Err(TraverserError::InvalidStructure(_))));
    }

    #[test]
    fn test_resolve_missing_target() {
        let spec = json!({"a": {"$ref": "#/nowhere"}});
        let traverser = OpenApiTraverser::new(&spec);
        let result = traverser.resolve_possible_ref(&spec["a"]);
        assert!(matches!(result, Err(TraverserError::MissingField(_))));
    }

    #[test]
    fn test_get_optional() {
        let spec = json!({"node": {"present": "value"}});
        let traverser = OpenApiTraverser::new(&spec);
        let found = traverser.get_optional(&spec["node"], "present").unwrap();
        assert_eq!(found, Some(&json!("value")));
        let missing = traverser.get_optional(&spec["node"], "absent").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_typed_getters() {
        let node = json!({"s": "x", "a": [1], "o": {}, "b": true});
        assert_eq!(OpenApiTraverser::get_as_str(&node, "s").unwrap(), "x");
        assert_eq!(OpenApiTraverser::get_as_array(&node, "a").unwrap().len(), 1);
        assert!(OpenApiTraverser::get_as_object(&node, "o").unwrap().is_empty());
        assert!(OpenApiTraverser::require_bool(&node["b"]).unwrap());
        assert!(matches!(
            OpenApiTraverser::get_as_str(&node, "a"),
            Err(TraverserError::TypeMismatch { .. })
        ));
        assert!(matches!(
            OpenApiTraverser::get_as_str(&node, "missing"),
            Err(TraverserError::MissingField(_))
        ));
    }
}
