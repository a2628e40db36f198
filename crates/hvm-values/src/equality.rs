//! Lenient structural equality
//!
//! Scalars compare by canonical string form, so `80`, `"80"` and `80.0` are
//! all equal. A downstream `"8080"` over an upstream `8080` is redundant.

use crate::value::{Mapping, Value};

/// Whether two values are equal under the lenient policy
///
/// - both `null` → equal; exactly one `null` → not equal
/// - mappings → same key set and pairwise equal values
/// - sequences → same length and positionally equal items
/// - scalars → identical canonical strings
/// - any other mix of shapes → not equal
#[must_use]
pub fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Mapping(left), Value::Mapping(right)) => mappings_equal(left, right),
        (Value::Sequence(left), Value::Sequence(right)) => {
            left.len() == right.len() && left.iter().zip(right).all(|(l, r)| equal(l, r))
        }
        (left, right) if left.is_scalar() && right.is_scalar() => {
            left.canonical_string() == right.canonical_string()
        }
        _ => false,
    }
}

/// Whether two mappings are equal under the lenient policy
#[must_use]
pub fn mappings_equal(left: &Mapping, right: &Mapping) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.get(key).is_some_and(|other| equal(value, other)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Value)]) -> Value {
        Value::Mapping(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn nulls() {
        assert!(equal(&Value::Null, &Value::Null));
        assert!(!equal(&Value::Null, &Value::from("null")));
        assert!(!equal(&Value::from(0), &Value::Null));
    }

    #[test]
    fn scalars_compare_by_canonical_string() {
        assert!(equal(&Value::from(80), &Value::from("80")));
        assert!(equal(&Value::from(true), &Value::from("true")));
        assert!(equal(&Value::from(1.0), &Value::from(1)));
        assert!(!equal(&Value::from(80), &Value::from(8080)));
        assert!(!equal(&Value::from("ClusterIP"), &Value::from("NodePort")));
    }

    #[test]
    fn mappings_need_same_keys() {
        let a = map(&[("x", Value::from(1)), ("y", Value::from(2))]);
        let b = map(&[("y", Value::from("2")), ("x", Value::from(1))]);
        let c = map(&[("x", Value::from(1))]);
        let d = map(&[("x", Value::from(1)), ("z", Value::from(2))]);
        assert!(equal(&a, &b));
        assert!(!equal(&a, &c));
        assert!(!equal(&a, &d));
    }

    #[test]
    fn sequences_are_positional() {
        let a = Value::from(vec![Value::from(1), Value::from(2)]);
        let b = Value::from(vec![Value::from(2), Value::from(1)]);
        let c = Value::from(vec![Value::from(1)]);
        assert!(equal(&a, &a.clone()));
        assert!(!equal(&a, &b));
        assert!(!equal(&a, &c));
    }

    #[test]
    fn mixed_shapes_are_never_equal() {
        let empty_map = Value::Mapping(Mapping::new());
        let empty_seq = Value::Sequence(Vec::new());
        assert!(!equal(&empty_map, &empty_seq));
        assert!(!equal(&empty_map, &Value::from("{}")));
        assert!(!equal(&empty_seq, &Value::from("[]")));
    }
}
