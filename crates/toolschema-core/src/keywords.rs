//! Keyword support table for the flattened output contract.
//!
//! The function-calling runtimes this crate targets accept only basic
//! type/shape keywords. Everything listed here is removed during flattening.
//! The list is data-driven so the consumer matrix stays easy to audit; all
//! other keywords, recognized or not, pass through unchanged.

/// Keywords that must not appear in flattened output.
///
/// Covers validation constraints (bounds, lengths, pattern), metadata the
/// runtimes ignore or reject (`default`, `title`, `examples`), shape flags
/// they cannot express (`additionalProperties`, `const`, `uniqueItems`,
/// `prefixItems`), and the reference machinery itself (`$defs`, `$ref`),
/// which is resolved away before filtering.
pub const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "$defs",
    "$ref",
    "default",
    "title",
    "additionalProperties",
    "const",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "minItems",
    "maxItems",
    "minLength",
    "maxLength",
    "pattern",
    "uniqueItems",
    "examples",
    "prefixItems",
];

/// True when `keyword` is dropped by the flattener.
pub fn is_unsupported(keyword: &str) -> bool {
    UNSUPPORTED_KEYWORDS.contains(&keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_machinery_unsupported() {
        assert!(is_unsupported("$ref"));
        assert!(is_unsupported("$defs"));
        assert!(is_unsupported("prefixItems"));
    }

    #[test]
    fn test_structural_keywords_supported() {
        for keyword in ["type", "properties", "items", "required", "description", "enum"] {
            assert!(!is_unsupported(keyword), "{} must pass through", keyword);
        }
    }

    #[test]
    fn test_custom_keywords_supported() {
        assert!(!is_unsupported("x-vendor-extension"));
        assert!(!is_unsupported("anyOf"), "anyOf is collapsed, not filtered");
    }
}
