//! Path-based tree editing
//!
//! Generic get / set / delete / append over a JSON tree addressed by a sequence
//! of object-key and array-index segments. Every mutating primitive returns a
//! new tree and leaves its input untouched.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One step of a tree path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Build a path from mixed key / index segments
///
/// ```
/// use adplan_core::{path, PathSegment};
///
/// let p = path!["googleAds", "adGroups", 0, "name"];
/// assert_eq!(p[2], PathSegment::Index(0));
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        vec![$($crate::path::PathSegment::from($segment)),*]
    };
}

/// Render a path for messages, e.g. `.googleAds.adGroups[0]`
pub fn display_path(path: &[PathSegment]) -> String {
    path.iter().map(ToString::to_string).collect()
}

/// Get the value at a path, `None` if any step is missing
pub fn get_at_path<'a>(tree: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    path.iter().try_fold(tree, |current, segment| match (segment, current) {
        (PathSegment::Key(key), Value::Object(map)) => map.get(key),
        (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
        _ => None,
    })
}

/// Most null slots a single edit may pad an array with
pub const MAX_ARRAY_PADDING: usize = 64;

/// Return a new tree with `value` stored at `path`
///
/// Missing (or null) intermediate containers are created as an array when the
/// next segment is an index and as an object otherwise. Indexing past the end of
/// an array pads it with nulls, at most [`MAX_ARRAY_PADDING`] of them.
pub fn set_at_path(tree: &Value, path: &[PathSegment], value: Value) -> Result<Value> {
    let mut next = tree.clone();
    *slot_mut(&mut next, path)? = value;
    Ok(next)
}

/// Return a new tree with the element at `path` removed
///
/// Array parents are spliced (later indices shift down); object parents lose the
/// key. A missing leaf leaves the copy unchanged.
pub fn delete_at_path(tree: &Value, path: &[PathSegment]) -> Result<Value> {
    let Some((last, parent_path)) = path.split_last() else {
        return Err(CoreError::InvalidPath("cannot delete the root".to_string()));
    };

    let mut next = tree.clone();
    let parent = existing_mut(&mut next, parent_path)?;
    match (last, parent) {
        (PathSegment::Index(index), Value::Array(items)) => {
            if *index < items.len() {
                items.remove(*index);
            } else {
                tracing::debug!("Index {} out of bounds, nothing deleted", index);
            }
        }
        (PathSegment::Key(key), Value::Object(map)) => {
            map.remove(key);
        }
        (segment, other) => {
            return Err(CoreError::InvalidPath(format!(
                "cannot delete {} from {} at {}",
                segment,
                crate::types::value_type_name(other),
                display_path(parent_path)
            )))
        }
    }
    Ok(next)
}

/// Return a new tree with `value` appended to the array at `path`
///
/// A missing array is created.
pub fn append_at_path(tree: &Value, path: &[PathSegment], value: Value) -> Result<Value> {
    let mut next = tree.clone();
    let slot = slot_mut(&mut next, path)?;
    match slot {
        Value::Null => *slot = Value::Array(vec![value]),
        Value::Array(items) => items.push(value),
        other => {
            return Err(CoreError::TypeError(format!(
                "cannot append to {} at {}",
                crate::types::value_type_name(other),
                display_path(path)
            )))
        }
    }
    Ok(next)
}

fn container_for(segment: &PathSegment) -> Value {
    match segment {
        PathSegment::Index(_) => Value::Array(Vec::new()),
        PathSegment::Key(_) => Value::Object(Map::new()),
    }
}

/// Walk to `path`, creating containers, and return the slot there
fn slot_mut<'a>(tree: &'a mut Value, path: &[PathSegment]) -> Result<&'a mut Value> {
    let mut current = tree;
    for (depth, segment) in path.iter().enumerate() {
        if current.is_null() {
            *current = container_for(segment);
        }
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.entry(key.clone()).or_insert(Value::Null),
            (PathSegment::Index(index), Value::Array(items)) => {
                if *index >= items.len() {
                    if *index - items.len() > MAX_ARRAY_PADDING {
                        return Err(CoreError::InvalidPath(format!(
                            "index {} is too far past the end of {} items at {}",
                            index,
                            items.len(),
                            display_path(&path[..depth])
                        )));
                    }
                    items.resize(*index + 1, Value::Null);
                }
                &mut items[*index]
            }
            (segment, other) => {
                return Err(CoreError::InvalidPath(format!(
                    "cannot step {} into {} at {}",
                    segment,
                    crate::types::value_type_name(other),
                    display_path(&path[..depth])
                )))
            }
        };
    }
    Ok(current)
}

/// Walk to an existing value at `path` without creating anything
fn existing_mut<'a>(tree: &'a mut Value, path: &[PathSegment]) -> Result<&'a mut Value> {
    let mut current = tree;
    for (depth, segment) in path.iter().enumerate() {
        let found = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get_mut(key),
            (PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index),
            _ => None,
        };
        current = found.ok_or_else(|| CoreError::PathNotFound(display_path(&path[..=depth])))?;
    }
    Ok(current)
}
