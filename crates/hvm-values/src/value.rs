//! Configuration value trees
//!
//! [`Value`] is a closed tagged variant over the shapes a parsed values
//! document can take. All traversal dispatches on the tag.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::ser::{Serialize, Serializer};

pub use serde_yaml::Number;

/// String-keyed mapping
///
/// Ordered lexicographically so that iteration and serialized reports are
/// deterministic.
pub type Mapping = BTreeMap<String, Value>;

/// A node in a configuration tree
///
/// The derived `PartialEq` is strict structural equality. Redundancy checks
/// use the lenient [`crate::equal`] instead.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent / `null`
    #[default]
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Numeric scalar (integer or float)
    Number(Number),
    /// String scalar
    String(String),
    /// Ordered list
    Sequence(Vec<Value>),
    /// Nested mapping
    Mapping(Mapping),
}

/// Shape of a [`Value`], for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// bool, number or string
    Scalar,
    /// list
    Sequence,
    /// mapping
    Mapping,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Scalar => "scalar",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Shape of this value
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) | Self::Number(_) | Self::String(_) => ValueKind::Scalar,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// True for `null`
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for bool, number and string
    #[inline]
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.kind() == ValueKind::Scalar
    }

    /// Borrow as mapping
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Canonical string form of a scalar
    ///
    /// Strings are returned verbatim, booleans as `true`/`false`, numbers in
    /// shortest decimal form with integral floats printed as integers. `null`
    /// renders as `null`. Returns `None` for sequences and mappings.
    #[must_use]
    pub fn canonical_string(&self) -> Option<String> {
        match self {
            Self::Null => Some("null".to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(canonical_number(n)),
            Self::String(s) => Some(s.clone()),
            Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    /// Structurally independent copy
    ///
    /// Every mapping and sequence node is freshly allocated; scalars are
    /// copied by value. Editing the copy never affects `self`.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        match self {
            Self::Mapping(map) => Self::Mapping(deep_copy_mapping(map)),
            Self::Sequence(items) => Self::Sequence(items.iter().map(Self::deep_copy).collect()),
            scalar => scalar.clone(),
        }
    }
}

/// Structurally independent copy of a mapping
#[must_use]
pub fn deep_copy_mapping(map: &Mapping) -> Mapping {
    map.iter()
        .map(|(key, value)| (key.clone(), value.deep_copy()))
        .collect()
}

/// Count every key at every mapping level
///
/// Intermediate keys count as well as leaves: `{a: {b: 1}}` has two keys.
/// Sequences are not descended into.
#[must_use]
pub fn count_nested_keys(map: &Mapping) -> usize {
    map.values()
        .map(|value| match value {
            Value::Mapping(nested) => 1 + count_nested_keys(nested),
            _ => 1,
        })
        .sum()
}

#[allow(clippy::cast_possible_truncation)]
fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // Below 2^53 every integral float maps exactly onto an i64.
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            (f as i64).to_string()
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(map) => serializer.collect_map(map),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Number(Number::from(i64::from(i)))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Number(Number::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::Number(Number::from(u))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Number(Number::from(f))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}
