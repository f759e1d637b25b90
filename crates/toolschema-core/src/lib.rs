//! Flatten JSON Schemas into the subset accepted by LLM function-calling
//! runtimes.
//!
//! Function-calling runtimes understand only a narrow schema dialect:
//! object, array, and scalar nodes with basic type/shape keywords. They have
//! no concept of `$ref` indirection, `anyOf` unions, tuple-typed arrays, or
//! validation constraints. Typed-model generators, on the other hand, emit
//! exactly those constructs. [`flatten`] bridges the gap in a single
//! recursive walk:
//!
//! - **References** (`$ref` into `$defs`) are inlined, with recursive cycles
//!   terminated by a `(recursive: Name)` placeholder instead of unbounded
//!   expansion.
//! - **Unions** (`anyOf`) collapse to their first concrete branch; the
//!   discarded alternatives survive only as a `(Union of: ...)` note in the
//!   description.
//! - **Unsupported keywords** (bounds, lengths, patterns, defaults, and the
//!   reference machinery itself) are dropped; every other keyword, custom or
//!   not, passes through.
//! - **Arrays** are guaranteed a concrete `items` schema, inferred from the
//!   first `prefixItems` entry when the input declared a tuple.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use toolschema_core::flatten;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "tag": { "$ref": "#/$defs/Tag" }
//!     },
//!     "$defs": {
//!         "Tag": { "type": "string", "maxLength": 32 }
//!     }
//! });
//!
//! let flat = flatten(&schema).unwrap();
//! assert_eq!(flat, json!({
//!     "type": "object",
//!     "properties": { "tag": { "type": "string" } }
//! }));
//! ```
//!
//! Malformed references, cycles, and unions with no concrete branch are all
//! recovered in place; the only fatal condition is a shape violation on the
//! producer side (see [`FlattenError`]).

mod error;
mod flatten;
mod refs;
mod typed;
mod unions;

pub mod keywords;
pub mod schema_utils;

pub use error::FlattenError;
pub use flatten::flatten;
pub use schema_utils::{build_path, is_flat};
pub use typed::flat_schema_for;
