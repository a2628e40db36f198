//! Helm Values Trees
//!
//! Dynamically typed configuration documents with key-path addressing.
//!
//! # Core Concepts
//!
//! - [`Value`]: Tagged variant over mapping, sequence, scalar and null
//! - [`Mapping`]: Lexicographically ordered string-keyed mapping
//! - [`KeyPath`]: Hierarchical address of an entry (`service.port`)
//! - [`tree`]: `exists` / `get` / `set` / `delete` by key path
//! - [`equal`]: Lenient structural equality used for redundancy checks
//!
//! # Example
//!
//! ```rust,ignore
//! use hvm_values::{tree, KeyPath, Value};
//!
//! let doc = Value::from_yaml_str("service:\n  port: 80\n")?;
//! let mut optimized = doc.as_mapping().map(hvm_values::deep_copy_mapping).unwrap_or_default();
//!
//! let port: KeyPath = "service.port".parse()?;
//! tree::delete(&mut optimized, &port)?;
//! assert!(optimized.is_empty());
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod convert;
mod equality;
mod path;
mod value;

pub mod tree;

pub use convert::{to_json_string, to_yaml_string, ConvertError};
pub use equality::{equal, mappings_equal};
pub use path::{KeyPath, PathError};
pub use value::{count_nested_keys, deep_copy_mapping, Mapping, Number, Value, ValueKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
