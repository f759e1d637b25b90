//! The flattening walk: node dispatch, keyword filtering, and array item
//! inference.
//!
//! A single recursive pass over the schema tree. Each object node is
//! classified in order: reference, union, generic. References and unions
//! rewrite the node (see [`crate::refs`] and [`crate::unions`]); the generic
//! path drops unsupported keywords, recurses into every remaining value,
//! and backfills `items` on array nodes on the way back up. The walk is a
//! pure function of (node, definition table, visited set); concurrent calls
//! share nothing.

use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::error::FlattenError;
use crate::keywords::is_unsupported;
use crate::refs::{self, DefinitionTable};
use crate::schema_utils::build_path;
use crate::unions;

/// Flatten a schema document into the subset accepted by function-calling
/// runtimes.
///
/// The output is guaranteed free of `$ref` and `anyOf` nodes and of
/// unsupported keywords, and every `type: "array"` node carries an `items`
/// schema (see [`crate::is_flat`]). Malformed references, recursive cycles,
/// and unions with no concrete branch are recovered in place; the only
/// errors are shape violations on the producer side, which are fatal for
/// the single schema being flattened.
pub fn flatten(schema: &Value) -> Result<Value, FlattenError> {
    if !schema.is_object() {
        return Err(FlattenError::ShapeViolation {
            path: "#".to_string(),
            message: format!("root must be an object schema, got {}", schema),
        });
    }
    flatten_node(schema, &DefinitionTable::new(), &HashSet::new(), "#")
}

/// Flatten one node. `defs` is the definition table inherited from
/// enclosing scopes and `visited` the set of definition names currently
/// being expanded on this path.
pub(crate) fn flatten_node(
    node: &Value,
    defs: &DefinitionTable,
    visited: &HashSet<String>,
    path: &str,
) -> Result<Value, FlattenError> {
    match node {
        Value::Object(obj) => {
            let defs = refs::scope_definitions(obj, defs, path)?;

            if let Some(name) = refs::ref_target(obj) {
                if defs.contains_key(name) {
                    return refs::resolve_reference(obj, name, &defs, visited, path);
                }
                // Malformed reference: keep the siblings, drop the pointer.
                tracing::warn!(name, path, "reference to unknown definition, dropping $ref");
            }

            if let Some(branches) = unions::union_branches(obj) {
                return unions::collapse_union(obj, branches, &defs, visited, path);
            }

            flatten_object(obj, &defs, visited, path)
        }
        Value::Array(elements) => {
            let mut flat = Vec::with_capacity(elements.len());
            for (index, element) in elements.iter().enumerate() {
                let child_path = build_path(path, &[&index.to_string()]);
                flat.push(flatten_node(element, defs, visited, &child_path)?);
            }
            Ok(Value::Array(flat))
        }
        scalar => Ok(scalar.clone()),
    }
}

/// The generic path: filter unsupported keywords, recurse into remaining
/// values, and guarantee arrays an element type.
fn flatten_object(
    obj: &Map<String, Value>,
    defs: &DefinitionTable,
    visited: &HashSet<String>,
    path: &str,
) -> Result<Value, FlattenError> {
    // Tuple-style element list, captured before keyword filtering removes it.
    let tuple_items = obj.get("prefixItems").and_then(Value::as_array);

    let mut flat = Map::new();
    for (key, value) in obj {
        if is_unsupported(key) {
            continue;
        }
        if key == "properties" {
            let schemas = value.as_object().ok_or_else(|| FlattenError::ShapeViolation {
                path: build_path(path, &["properties"]),
                message: format!("properties must be an object of schemas, got {}", value),
            })?;
            // Property names pass through untouched; only their schemas are
            // rewritten.
            let mut flat_props = Map::new();
            for (name, schema) in schemas {
                let child_path = build_path(path, &["properties", name]);
                flat_props.insert(name.clone(), flatten_node(schema, defs, visited, &child_path)?);
            }
            flat.insert(key.clone(), Value::Object(flat_props));
            continue;
        }
        let child_path = build_path(path, &[key]);
        flat.insert(key.clone(), flatten_node(value, defs, visited, &child_path)?);
    }

    // Arrays must advertise an element type even when the input omits one.
    // A tuple's first element stands in for the whole list; per-position
    // typing is lost because the consumer has no tuple-array concept.
    if flat.get("type").and_then(Value::as_str) == Some("array") && !flat.contains_key("items") {
        let items = match tuple_items.and_then(|elements| elements.first()) {
            Some(first) => {
                let child_path = build_path(path, &["prefixItems", "0"]);
                flatten_node(first, defs, visited, &child_path)?
            }
            None => json!({ "type": "string" }),
        };
        flat.insert("items".to_string(), items);
    }

    Ok(Value::Object(flat))
}

// ===========================================================================
// Tests
// ===========================================================================
