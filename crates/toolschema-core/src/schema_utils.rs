//! Shared schema utilities: JSON Pointer path construction for diagnostics
//! and the flat-output contract check.

use std::borrow::Cow;

use serde_json::Value;

// ---------------------------------------------------------------------------
// JSON Pointer construction (RFC 6901)
// ---------------------------------------------------------------------------

/// Escape a single path segment per RFC 6901.
///
/// - `~` becomes `~0`
/// - `/` becomes `~1`
///
/// Returns `Cow::Borrowed` when no escaping is needed (the common case).
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') || segment.contains('/') {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Build a JSON Pointer path by appending segments to a parent path.
///
/// Each segment is escaped per RFC 6901 before joining. Used for error and
/// log messages only; the flattener never resolves these pointers.
///
/// # Example
/// ```
/// use toolschema_core::build_path;
/// assert_eq!(build_path("#", &["properties", "a/b"]), "#/properties/a~1b");
/// ```
pub fn build_path(parent: &str, segments: &[&str]) -> String {
    let mut path = parent.to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&escape_pointer_segment(segment));
    }
    path
}

// ---------------------------------------------------------------------------
// Flat-output contract
// ---------------------------------------------------------------------------

/// Check a document against the flat-output contract.
///
/// A document is flat when no object node carries `$ref` or `anyOf` and
/// every `type: "array"` node carries an `items` schema. Every value
/// returned by [`flatten`](crate::flatten) satisfies this; the check exists
/// for tests and for auditing documents produced elsewhere.
pub fn is_flat(schema: &Value) -> bool {
    match schema {
        Value::Object(obj) => {
            if obj.contains_key("$ref") || obj.contains_key("anyOf") {
                return false;
            }
            if obj.get("type").and_then(Value::as_str) == Some("array")
                && !obj.contains_key("items")
            {
                return false;
            }
            obj.values().all(is_flat)
        }
        Value::Array(elements) => elements.iter().all(is_flat),
        _ => true,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // --- Escaping tests ---

    #[test]
    fn test_escape_no_special() {
        let result = escape_pointer_segment("foo");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "foo");
    }

    #[test]
    fn test_escape_tilde_and_slash() {
        assert_eq!(escape_pointer_segment("a~b"), "a~0b");
        assert_eq!(escape_pointer_segment("a/b"), "a~1b");
        assert_eq!(escape_pointer_segment("~/"), "~0~1");
    }

    #[test]
    fn test_build_path_simple() {
        assert_eq!(
            build_path("#", &["properties", "name"]),
            "#/properties/name"
        );
    }

    #[test]
    fn test_build_path_escaping() {
        assert_eq!(build_path("#", &["properties", "a/b"]), "#/properties/a~1b");
    }

    #[test]
    fn test_build_path_empty() {
        assert_eq!(build_path("#", &[]), "#");
    }

    // --- is_flat tests ---

    #[test]
    fn test_flat_scalar_and_object() {
        assert!(is_flat(&json!({ "type": "string" })));
        assert!(is_flat(&json!({
            "type": "object",
            "properties": { "a": { "type": "integer" } },
            "required": ["a"]
        })));
    }

    #[test]
    fn test_ref_not_flat() {
        assert!(!is_flat(&json!({
            "type": "object",
            "properties": { "a": { "$ref": "#/$defs/A" } }
        })));
    }

    #[test]
    fn test_union_not_flat() {
        assert!(!is_flat(&json!({
            "anyOf": [{ "type": "string" }, { "type": "null" }]
        })));
    }

    #[test]
    fn test_untyped_array_not_flat() {
        assert!(!is_flat(&json!({ "type": "array" })));
        assert!(is_flat(&json!({
            "type": "array",
            "items": { "type": "string" }
        })));
    }

    #[test]
    fn test_violation_found_at_depth() {
        assert!(!is_flat(&json!({
            "type": "object",
            "properties": {
                "deep": {
                    "type": "object",
                    "properties": {
                        "list": { "type": "array" }
                    }
                }
            }
        })));
    }
}
