//! # Nested Path Updater
//!
//! Copy-on-write updates of a single location inside a JSON document.
//!
//! [`set_path`] never mutates its input: every object on the path is
//! shallow-copied and unrelated sibling branches are carried over from the
//! original, so the caller owns the returned document and the input stays
//! valid to read.

use serde_json::{Map, Value};
use std::fmt;

/// An ordered, non-empty sequence of field names locating a nested value,
/// e.g. `theme.primaryColor`.
///
/// Non-emptiness is guaranteed by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    first: String,
    rest: Vec<String>,
}

impl FieldPath {
    /// Build a path from a leading segment plus any trailing segments.
    pub fn of(first: impl Into<String>, rest: &[&str]) -> FieldPath {
        FieldPath {
            first: first.into(),
            rest: rest.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a dotted path like `"theme.primaryColor"`.
    ///
    /// Returns `None` for an empty string or empty segments (`"a..b"`).
    pub fn parse(dotted: &str) -> Option<FieldPath> {
        let mut segments = dotted.split('.');
        let first = segments.next().filter(|s| !s.is_empty())?.to_string();
        let mut rest = Vec::new();
        for segment in segments {
            if segment.is_empty() {
                return None;
            }
            rest.push(segment.to_string());
        }
        Some(FieldPath { first, rest })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn rest(&self) -> &[String] {
        &self.rest
    }

    /// The final segment (the field actually being assigned).
    pub fn leaf(&self) -> &str {
        self.rest.last().map(|s| s.as_str()).unwrap_or(&self.first)
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always false; emptiness is unrepresentable.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for segment in &self.rest {
            write!(f, ".{}", segment)?;
        }
        Ok(())
    }
}

/// Read the value at `path`, if present.
pub fn get_path<'a>(document: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = document.get(path.first())?;
    for segment in path.rest() {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Produce a new document with only `path` changed to `value`.
///
/// Missing (or non-object) intermediate segments become fresh empty objects
/// before descending, so previously-absent optional branches can be written.
/// A length-1 path assigns at the document root.
pub fn set_path(document: &Value, path: &FieldPath, value: Value) -> Value {
    assign(document, path.first(), path.rest(), value)
}

fn assign(node: &Value, segment: &str, rest: &[String], value: Value) -> Value {
    // Shallow copy of this level; non-objects on the path are replaced.
    let mut object = match node {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    match rest.split_first() {
        None => {
            object.insert(segment.to_string(), value);
        }
        Some((next, tail)) => {
            let child = object.get(segment).cloned().unwrap_or(Value::Null);
            object.insert(segment.to_string(), assign(&child, next, tail, value));
        }
    }

    Value::Object(object)
}
