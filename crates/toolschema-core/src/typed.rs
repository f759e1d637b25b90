//! Typed-model bridge: flattened schemas straight from Rust types.
//!
//! Tool servers declare their request/response shapes as plain structs
//! deriving [`schemars::JsonSchema`]. The generator emits draft 2020-12
//! documents full of `$defs`, `$ref`, and `anyOf` wrappers for `Option`
//! fields, which is exactly what the consumer runtime rejects. This module
//! generates the schema and runs it through [`flatten`] in one step, so a
//! registration site needs a single call per tool.

use schemars::JsonSchema;
use serde_json::Value;

use crate::error::FlattenError;
use crate::flatten::flatten;

/// Generate the flattened JSON Schema for `T`.
pub fn flat_schema_for<T: JsonSchema>() -> Result<Value, FlattenError> {
    let schema = schemars::schema_for!(T);
    let mut value = serde_json::to_value(&schema)?;
    // Generator metadata, not part of the tool contract.
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
    }
    flatten(&value)
}

// ===========================================================================
// Tests
// ===========================================================================
