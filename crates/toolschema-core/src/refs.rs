//! Reference resolution: definition-table scoping, `$ref` inlining, and
//! cycle breaking.
//!
//! A reference node is inlined by flattening the named definition and
//! merging the node's own sibling keywords over the result, so a use site
//! can override, say, the definition's `description`. A name already being
//! expanded on the current path marks a cycle; it terminates in a
//! `(recursive: Name)` placeholder instead of expanding again, which bounds
//! recursion depth structurally (each name expands at most once per path).

use std::borrow::Cow;
use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::FlattenError;
use crate::flatten::flatten_node;
use crate::keywords::is_unsupported;
use crate::schema_utils::build_path;

/// Scope-local mapping from definition name to its schema.
pub(crate) type DefinitionTable = Map<String, Value>;

/// Merge a node-local `$defs` block over the inherited definition table.
///
/// Local entries win on name collision. Returns `Cow::Borrowed` when the
/// node introduces no local definitions (the common case). A `$defs` value
/// that is not an object is a producer contract break.
pub(crate) fn scope_definitions<'a>(
    obj: &Map<String, Value>,
    inherited: &'a DefinitionTable,
    path: &str,
) -> Result<Cow<'a, DefinitionTable>, FlattenError> {
    match obj.get("$defs") {
        None => Ok(Cow::Borrowed(inherited)),
        Some(Value::Object(local)) => {
            let mut merged = inherited.clone();
            for (name, schema) in local {
                merged.insert(name.clone(), schema.clone());
            }
            Ok(Cow::Owned(merged))
        }
        Some(other) => Err(FlattenError::ShapeViolation {
            path: build_path(path, &["$defs"]),
            message: format!("$defs must be an object of definitions, got {}", other),
        }),
    }
}

/// Extract the definition name from a node's `$ref`, if it is a local
/// definition pointer.
///
/// Only `#/$defs/...` pointers participate in inlining; anything else
/// (external URIs, anchors, non-string values) is left for the keyword
/// filter to drop. The last pointer segment names the definition, so a
/// nested pointer like `#/$defs/group/Tag` resolves `Tag`.
pub(crate) fn ref_target(obj: &Map<String, Value>) -> Option<&str> {
    let suffix = obj.get("$ref")?.as_str()?.strip_prefix("#/$defs/")?;
    Some(match suffix.rsplit_once('/') {
        Some((_, name)) => name,
        None => suffix,
    })
}

/// Inline the definition `name` at a referencing node.
///
/// The caller has already verified that `name` is present in `defs`.
/// Sibling keywords on the referencing node are flattened and merged over
/// the inlined definition (site wins on key collision). If `name` is
/// already being expanded on this path, a terminal placeholder is emitted
/// instead, with the same sibling overlay.
pub(crate) fn resolve_reference(
    obj: &Map<String, Value>,
    name: &str,
    defs: &DefinitionTable,
    visited: &HashSet<String>,
    path: &str,
) -> Result<Value, FlattenError> {
    let mut siblings = Map::new();
    for (key, value) in obj {
        if is_unsupported(key) || key == "anyOf" {
            continue;
        }
        let child_path = build_path(path, &[key]);
        siblings.insert(key.clone(), flatten_node(value, defs, visited, &child_path)?);
    }

    if visited.contains(name) {
        tracing::debug!(name, path, "breaking recursive reference");
        let mut placeholder = Map::new();
        placeholder.insert("type".to_string(), Value::String("object".to_string()));
        placeholder.insert(
            "description".to_string(),
            Value::String(format!("(recursive: {})", name)),
        );
        for (key, value) in siblings {
            placeholder.insert(key, value);
        }
        return Ok(Value::Object(placeholder));
    }

    let mut extended = visited.clone();
    extended.insert(name.to_string());

    let mut inlined = match flatten_node(&defs[name], defs, &extended, path)? {
        Value::Object(map) => map,
        other => {
            return Err(FlattenError::ShapeViolation {
                path: path.to_string(),
                message: format!(
                    "definition `{}` is not an object schema, got {}",
                    name, other
                ),
            })
        }
    };
    for (key, value) in siblings {
        inlined.insert(key, value);
    }
    Ok(Value::Object(inlined))
}

// ===========================================================================
// Tests
// ===========================================================================
