//! # Array Mutations
//!
//! Ordered-list operations on a document field.
//!
//! ## Operation Semantics
//!
//! ### Add
//! - Appends to the end of the list at the target path
//! - A missing or non-list location is treated as empty (first save of a
//!   legacy document creates the list)
//!
//! ### Remove
//! - Splice semantics: subsequent indices shift down by one
//! - Fails if the index is not a valid position in the current list
//!
//! ### Update
//! - In-place replacement, length unchanged
//! - Same index constraints as remove
//!
//! Operations are validated before any document work happens; on failure
//! the input document is untouched.

use crate::paths::{get_path, set_path, FieldPath};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One operation against an ordered list field (e.g. `services`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ArrayOp {
    /// Append `value` to the end of the list
    Add { value: Value },

    /// Remove the element at `index`
    Remove { index: usize },

    /// Replace the element at `index` with `value`
    Update { index: usize, value: Value },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl ArrayOp {
    /// Build an operation from an untyped request.
    ///
    /// This is the wire boundary: unknown operation kinds, missing
    /// `value`/`index`, and negative indices are all rejected here.
    pub fn from_request(
        kind: &str,
        value: Option<Value>,
        index: Option<i64>,
    ) -> Result<ArrayOp, MutationError> {
        match kind {
            "add" => {
                let value = value.ok_or_else(|| {
                    MutationError::InvalidOperation("add requires a value".to_string())
                })?;
                Ok(ArrayOp::Add { value })
            }
            "remove" => Ok(ArrayOp::Remove {
                index: request_index(index)?,
            }),
            "update" => {
                let index = request_index(index)?;
                let value = value.ok_or_else(|| {
                    MutationError::InvalidOperation("update requires a value".to_string())
                })?;
                Ok(ArrayOp::Update { index, value })
            }
            other => Err(MutationError::InvalidOperation(format!(
                "unknown array operation '{}'",
                other
            ))),
        }
    }
}

fn request_index(index: Option<i64>) -> Result<usize, MutationError> {
    match index {
        Some(i) if i >= 0 => Ok(i as usize),
        Some(i) => Err(MutationError::InvalidOperation(format!(
            "{} is not a valid array index",
            i
        ))),
        None => Err(MutationError::InvalidOperation(
            "operation requires an index".to_string(),
        )),
    }
}

/// Apply `op` to the list at `path`, producing a new document through
/// [`set_path`]. The input document is never modified.
pub fn mutate_array(
    document: &Value,
    path: &FieldPath,
    op: &ArrayOp,
) -> Result<Value, MutationError> {
    let mut items: Vec<Value> = match get_path(document, path) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };

    match op {
        ArrayOp::Add { value } => {
            items.push(value.clone());
        }
        ArrayOp::Remove { index } => {
            if *index >= items.len() {
                return Err(MutationError::InvalidOperation(format!(
                    "remove index {} out of range for {} items",
                    index,
                    items.len()
                )));
            }
            items.remove(*index);
        }
        ArrayOp::Update { index, value } => {
            if *index >= items.len() {
                return Err(MutationError::InvalidOperation(format!(
                    "update index {} out of range for {} items",
                    index,
                    items.len()
                )));
            }
            items[*index] = value.clone();
        }
    }

    Ok(set_path(document, path, Value::Array(items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn services_path() -> FieldPath {
        FieldPath::of("services", &[])
    }

    #[test]
    fn test_add_appends() {
        let doc = json!({ "services": ["Plumbing"] });

        let updated = mutate_array(
            &doc,
            &services_path(),
            &ArrayOp::Add {
                value: json!("Electrical"),
            },
        )
        .unwrap();

        assert_eq!(updated["services"], json!(["Plumbing", "Electrical"]));
    }

    #[test]
    fn test_add_creates_missing_list() {
        let doc = json!({ "businessName": "Acme" });

        let updated = mutate_array(
            &doc,
            &services_path(),
            &ArrayOp::Add {
                value: json!("Plumbing"),
            },
        )
        .unwrap();

        assert_eq!(updated["services"], json!(["Plumbing"]));
        assert_eq!(updated["businessName"], "Acme");
    }

    #[test]
    fn test_remove_shifts_indices() {
        let doc = json!({ "services": ["a", "b", "c"] });

        let updated = mutate_array(&doc, &services_path(), &ArrayOp::Remove { index: 1 }).unwrap();

        assert_eq!(updated["services"], json!(["a", "c"]));
    }

    #[test]
    fn test_update_in_place() {
        let doc = json!({ "services": ["a", "b", "c"] });

        let updated = mutate_array(
            &doc,
            &services_path(),
            &ArrayOp::Update {
                index: 1,
                value: json!("B"),
            },
        )
        .unwrap();

        assert_eq!(updated["services"], json!(["a", "B", "c"]));
    }

    #[test]
    fn test_remove_out_of_range_fails() {
        let doc = json!({ "services": ["Plumbing", "Electrical"] });

        let result = mutate_array(&doc, &services_path(), &ArrayOp::Remove { index: 5 });

        assert!(matches!(result, Err(MutationError::InvalidOperation(_))));
        // Pure function: the input is untouched
        assert_eq!(doc["services"], json!(["Plumbing", "Electrical"]));
    }

    #[test]
    fn test_update_out_of_range_fails() {
        let doc = json!({ "services": ["Plumbing"] });

        let result = mutate_array(
            &doc,
            &services_path(),
            &ArrayOp::Update {
                index: 1,
                value: json!("x"),
            },
        );

        assert!(matches!(result, Err(MutationError::InvalidOperation(_))));
    }

    #[test]
    fn test_from_request_unknown_kind() {
        let result = ArrayOp::from_request("splice", None, Some(0));
        assert!(matches!(result, Err(MutationError::InvalidOperation(_))));
    }

    #[test]
    fn test_from_request_missing_index() {
        let result = ArrayOp::from_request("remove", None, None);
        assert!(matches!(result, Err(MutationError::InvalidOperation(_))));
    }

    #[test]
    fn test_from_request_negative_index() {
        let result = ArrayOp::from_request("update", Some(json!("x")), Some(-1));
        assert!(matches!(result, Err(MutationError::InvalidOperation(_))));
    }

    #[test]
    fn test_from_request_missing_value() {
        let result = ArrayOp::from_request("add", None, None);
        assert!(matches!(result, Err(MutationError::InvalidOperation(_))));
    }

    #[test]
    fn test_from_request_well_formed() {
        let op = ArrayOp::from_request("update", Some(json!("Roofing")), Some(2)).unwrap();
        assert_eq!(
            op,
            ArrayOp::Update {
                index: 2,
                value: json!("Roofing")
            }
        );
    }

    #[test]
    fn test_op_serialization() {
        let op = ArrayOp::Add {
            value: json!("Electrical"),
        };

        let json = serde_json::to_string(&op).unwrap();
        let deserialized: ArrayOp = serde_json::from_str(&json).unwrap();

        assert_eq!(op, deserialized);
    }
}
