//! Key-path addressing over nested mappings
//!
//! `set` and `delete` mutate the root in place; callers must own the tree
//! they pass (usually a fresh [`crate::deep_copy_mapping`]).

use crate::path::{KeyPath, PathError};
use crate::value::{Mapping, Value};

/// Value stored at `path`, walking successive mapping levels
///
/// Returns `None` if an intermediate segment is missing or not a mapping,
/// if the final segment is missing, or if `path` is the root.
#[must_use]
pub fn get<'a>(root: &'a Mapping, path: &KeyPath) -> Option<&'a Value> {
    let (last, parents) = path.segments().split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get(segment)?.as_mapping()?;
    }
    current.get(last)
}

/// Whether an entry exists at `path`
#[inline]
#[must_use]
pub fn exists(root: &Mapping, path: &KeyPath) -> bool {
    get(root, path).is_some()
}

/// Store `value` at `path`, creating intermediate mappings as needed
///
/// An intermediate entry that exists but is not a mapping is replaced by an
/// empty mapping. Returns the previous value at `path`, if any.
///
/// # Errors
/// Returns [`PathError::InvalidPath`] if `path` is the root
pub fn set(root: &mut Mapping, path: &KeyPath, value: Value) -> Result<Option<Value>, PathError> {
    let (last, parents) = path.segments().split_last().ok_or(PathError::InvalidPath)?;
    let mut current = root;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        current = ensure_mapping(slot);
    }
    Ok(current.insert(last.clone(), value))
}

/// Remove the entry at `path` and prune ancestors left empty
///
/// A missing or non-mapping intermediate segment makes this a no-op. After a
/// successful removal every ancestor mapping that became empty is removed
/// from its own parent, up to the first non-empty ancestor. The root itself
/// is never removed. Returns whether an entry was removed.
///
/// # Errors
/// Returns [`PathError::InvalidPath`] if `path` is the root
pub fn delete(root: &mut Mapping, path: &KeyPath) -> Result<bool, PathError> {
    if path.is_empty() {
        return Err(PathError::InvalidPath);
    }
    Ok(remove_pruning(root, path.segments()))
}

fn remove_pruning(map: &mut Mapping, segments: &[String]) -> bool {
    match segments {
        [] => false,
        [last] => map.remove(last).is_some(),
        [head, rest @ ..] => {
            let Some(Value::Mapping(child)) = map.get_mut(head) else {
                return false;
            };
            let removed = remove_pruning(child, rest);
            if removed && child.is_empty() {
                map.remove(head);
            }
            removed
        }
    }
}

fn ensure_mapping(slot: &mut Value) -> &mut Mapping {
    match slot {
        Value::Mapping(map) => map,
        other => {
            *other = Value::Mapping(Mapping::new());
            ensure_mapping(other)
        }
    }
}
