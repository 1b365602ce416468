//! Validation system
//!
//! Entities are validated as a whole right before a write reaches a store. A
//! [`RuleSet`] is an ordered list of `(field, validator)` pairs evaluated
//! against the entity's field snapshot; the first violation is returned and
//! later rules are not consulted.

pub mod validators;

use crate::core::error::Violation;
use crate::core::field::FieldValue;
use crate::core::resolver::Patchable;
use std::marker::PhantomData;
use std::sync::Arc;

/// Anything that can accept or reject a candidate entity
pub trait Validator<T>: Send + Sync {
    fn validate(&self, entity: &T) -> Result<(), Violation>;
}

/// A validator that accepts everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<T> Validator<T> for AcceptAll {
    fn validate(&self, _entity: &T) -> Result<(), Violation> {
        Ok(())
    }
}

type FieldRule = Arc<dyn Fn(&str, &FieldValue) -> Result<(), Violation> + Send + Sync>;

/// Ordered, first-failure-wins rules over a patchable entity's fields
pub struct RuleSet<T> {
    rules: Vec<(&'static str, FieldRule)>,
    _entity: PhantomData<fn(&T)>,
}

impl<T> Clone for RuleSet<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Patchable> RuleSet<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Append a rule; rules run in insertion order
    pub fn rule<F>(mut self, field: &'static str, rule: F) -> Self
    where
        F: Fn(&str, &FieldValue) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.rules.push((field, Arc::new(rule)));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: Patchable> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Patchable> Validator<T> for RuleSet<T> {
    fn validate(&self, entity: &T) -> Result<(), Violation> {
        let snapshot = T::field_resolver().snapshot(entity);

        for (field, rule) in &self.rules {
            // A rule on an undeclared field sees Null, so `required` catches it
            let value = snapshot.get(field).unwrap_or(&FieldValue::Null);
            rule(*field, value)?;
        }

        Ok(())
    }
}
