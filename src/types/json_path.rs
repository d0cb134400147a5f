use crate::{ENCODED_BACKSLASH, ENCODED_TILDE, PATH_SEPARATOR, TILDE};
use serde_json::Value;

/// Location of a node inside a spec document, kept as escaped RFC 6901
/// segments so it can be fed straight into [`Value::pointer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath(pub Vec<String>);

impl JsonPath {
    pub fn new() -> Self {
        JsonPath(Vec::new())
    }

    pub fn add(&mut self, segment: impl AsRef<str>) -> &mut Self {
        let segment = segment.as_ref();
        // `~` must be escaped before `/`, otherwise `~1` would become `~01`.
        let segment = segment
            .replace(TILDE, ENCODED_TILDE)
            .replace(PATH_SEPARATOR, ENCODED_BACKSLASH);
        self.0.push(segment);
        self
    }

    pub fn format_path(&self) -> String {
        self.0.join(PATH_SEPARATOR)
    }

    pub fn to_pointer(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        format!("{}{}", PATH_SEPARATOR, self.format_path())
    }

    /// Looks the path up in `document`.
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        document.pointer(&self.to_pointer())
    }
}

#[cfg(test)]
mod test {
    use crate::types::json_path::JsonPath;
    use crate::{ENCODED_BACKSLASH, ENCODED_TILDE};
    use serde_json::json;

    #[test]
    fn test_new_json_path() {
        let path = JsonPath::new();
        assert!(path.0.is_empty());
        assert_eq!(path.format_path(), "");
        assert_eq!(path.to_pointer(), "");
    }

    #[test]
    fn test_add_multiple_segments() {
        let mut path = JsonPath::new();
        path.add("paths").add("/facilities/{id}").add("get");
        assert_eq!(path.0.len(), 3);
        assert_eq!(path.0[1], format!("{}facilities{}{{id}}", ENCODED_BACKSLASH, ENCODED_BACKSLASH));
        assert_eq!(path.to_pointer(), "/paths/~1facilities~1{id}/get");
    }

    #[test]
    fn test_add_segment_with_tilde_and_slash() {
        let mut path = JsonPath::new();
        path.add("user~/profile");
        let expected = "user".to_string() + ENCODED_TILDE + ENCODED_BACKSLASH + "profile";
        assert_eq!(path.0[0], expected);
    }

    #[test]
    fn test_resolve_operation() {
        let document = json!({
            "paths": {
                "/facilities/{id}": {
                    "get": {"operationId": "getFacilityById"}
                }
            }
        });
        let mut path = JsonPath::new();
        path.add("paths").add("/facilities/{id}").add("get");
        let operation = path.resolve(&document).unwrap();
        assert_eq!(operation["operationId"], "getFacilityById");
    }

    #[test]
    fn test_resolve_missing() {
        let mut path = JsonPath::new();
        path.add("paths").add("/nothing");
        assert!(path.resolve(&json!({"paths": {}})).is_none());
    }
}
