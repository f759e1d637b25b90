//! Union collapsing: `anyOf` nodes reduce to a single concrete branch.
//!
//! The consumer runtime has no union concept, so multiplicity survives only
//! as descriptive text. Branches are partitioned into null markers
//! (`{"type": "null"}`, the "absence of value" convention) and concrete
//! branches; the first concrete branch, in input order, becomes the
//! representative type. Remaining concrete branches are named in a
//! `(Union of: ...)` description note. A union with no concrete branch
//! falls back to a string-typed node.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::FlattenError;
use crate::flatten::flatten_node;
use crate::keywords::is_unsupported;
use crate::refs::DefinitionTable;
use crate::schema_utils::build_path;

/// The node's union branches, when it is a union.
///
/// Only a non-empty `anyOf` array counts; an empty or non-array `anyOf` is
/// not a union and is left to the generic walk.
pub(crate) fn union_branches(obj: &Map<String, Value>) -> Option<&Vec<Value>> {
    match obj.get("anyOf") {
        Some(Value::Array(branches)) if !branches.is_empty() => Some(branches),
        _ => None,
    }
}

/// Collapse a union node to a single concrete schema.
pub(crate) fn collapse_union(
    obj: &Map<String, Value>,
    branches: &[Value],
    defs: &DefinitionTable,
    visited: &HashSet<String>,
    path: &str,
) -> Result<Value, FlattenError> {
    // Input order is authoritative; indices are kept for diagnostics.
    let concrete: Vec<(usize, &Value)> = branches
        .iter()
        .enumerate()
        .filter(|(_, branch)| is_concrete(branch))
        .collect();

    // The node's remaining keywords, flattened. The representative branch is
    // merged over these, so branch keywords win on collision; description is
    // fixed up afterwards.
    let mut result = Map::new();
    for (key, value) in obj {
        if is_unsupported(key) || key == "anyOf" {
            continue;
        }
        let child_path = build_path(path, &[key]);
        result.insert(key.clone(), flatten_node(value, defs, visited, &child_path)?);
    }

    let Some(&(index, representative)) = concrete.first() else {
        // Degenerate union: nothing concrete to report. A bare null has no
        // useful scalar type, so fall back to string.
        tracing::warn!(path, "union has no concrete branch, falling back to string");
        if !result.contains_key("type") {
            result.insert("type".to_string(), Value::String("string".to_string()));
        }
        return Ok(Value::Object(result));
    };

    let declared_description = obj.get("description").cloned();

    let branch_path = build_path(path, &["anyOf", &index.to_string()]);
    if let Value::Object(flat_branch) =
        flatten_node(representative, defs, visited, &branch_path)?
    {
        result.extend(flat_branch);
    }

    if concrete.len() > 1 {
        let names: Vec<String> = concrete
            .iter()
            .map(|(_, branch)| branch_type_name(branch))
            .collect();
        let note = format!("(Union of: {})", names.join(", "));
        // Non-string descriptions are stringified into the note rather than
        // dropped; only null and the empty string yield the bare note.
        let description = match declared_description.as_ref() {
            Some(Value::String(desc)) if !desc.is_empty() => format!("{} {}", desc, note),
            Some(Value::String(_)) | Some(Value::Null) | None => note,
            Some(other) => format!("{} {}", other, note),
        };
        result.insert("description".to_string(), Value::String(description));
    } else if let Some(description) = declared_description {
        // Exactly one concrete branch: the field's own description wins over
        // whatever the branch contributed.
        result.insert("description".to_string(), description);
    }

    Ok(Value::Object(result))
}

/// A branch is concrete unless it is the null marker. Non-object branches
/// are never concrete.
fn is_concrete(branch: &Value) -> bool {
    branch
        .as_object()
        .is_some_and(|obj| obj.get("type").and_then(Value::as_str) != Some("null"))
}

/// Human-readable name for a branch in the union annotation.
///
/// The branch's `type` when present; otherwise the last segment of a `$ref`
/// pointer, so bare references are named after their definition.
fn branch_type_name(branch: &Value) -> String {
    if let Some(type_tag) = branch.get("type") {
        return match type_tag {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        };
    }
    if let Some(reference) = branch.get("$ref").and_then(Value::as_str) {
        if let Some((_, name)) = reference.rsplit_once('/') {
            return name.to_string();
        }
    }
    "unknown".to_string()
}

// ===========================================================================
// Tests
// ===========================================================================
