//! Partial updates: merging an untyped payload into a typed entity
//!
//! A [`Patch`] is an ordered key/value mapping. [`apply`] resolves every key
//! against the entity's field table and writes the values into a copy of the
//! entity. Keys that do not resolve are skipped. A value whose kind differs
//! from the field's declared kind fails the whole patch and the copy is
//! dropped, so callers never observe a half-applied update.

use crate::core::error::{CatalogError, Rule, Violation};
use crate::core::field::{FieldKind, FieldValue};
use crate::core::resolver::Patchable;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name reported when the payload as a whole is rejected
pub const PAYLOAD_FIELD: &str = "$payload";

/// Errors raised while building or applying a patch
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatchError {
    #[error("field '{field}' expects {expected}, got {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("patch payload must be an object, got {found}")]
    NotAnObject { found: &'static str },
}

impl From<PatchError> for CatalogError {
    fn from(err: PatchError) -> Self {
        let violation = match &err {
            PatchError::TypeMismatch { field, .. } => {
                Violation::new(*field, Rule::TypeMismatch, err.to_string())
            }
            PatchError::NotAnObject { .. } => {
                Violation::new(PAYLOAD_FIELD, Rule::NotAnObject, err.to_string())
            }
        };
        CatalogError::Invalid(violation)
    }
}

/// Key/value payload describing a partial update
///
/// Keys iterate in lexicographic order, which makes the reported error
/// deterministic when several values are mistyped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    values: BTreeMap<String, FieldValue>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn set(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Build a patch from a decoded JSON object
    pub fn from_json(value: Value) -> Result<Self, PatchError> {
        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from_json(value)))
                .collect()),
            other => Err(PatchError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Patch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Merge `patch` into a copy of `entity` and return the copy.
///
/// The input is never modified. On error nothing of the patch survives.
pub fn apply<T: Patchable>(entity: &T, patch: &Patch) -> Result<T, PatchError> {
    let resolver = T::field_resolver();
    let mut candidate = entity.clone();

    for (key, value) in patch.iter() {
        let Some(slot) = resolver.resolve(key) else {
            tracing::debug!(key = %key, "ignoring unresolvable patch key");
            continue;
        };

        if let Err(rejected) = slot.set(&mut candidate, value.clone()) {
            return Err(PatchError::TypeMismatch {
                field: slot.name(),
                expected: slot.kind(),
                actual: rejected.kind(),
            });
        }
    }

    Ok(candidate)
}

/// In-place variant of [`apply`] with the same all-or-nothing guarantee
pub fn apply_in_place<T: Patchable>(entity: &mut T, patch: &Patch) -> Result<(), PatchError> {
    *entity = apply(entity, patch)?;
    Ok(())
}

/// Names of the exposed fields whose value differs between two versions
pub fn changed_fields<T: Patchable>(before: &T, after: &T) -> Vec<&'static str> {
    let resolver = T::field_resolver();
    let old = resolver.snapshot(before);
    let new = resolver.snapshot(after);

    old.into_iter()
        .filter(|(name, value)| new.get(name) != Some(value))
        .map(|(name, _)| name)
        .collect()
}
