//! Typed error handling for the catalog core
//!
//! Callers match on [`CatalogError`] to translate failures into whatever their
//! transport needs. The core never maps errors to status codes itself.
//!
//! # Error Categories
//!
//! - [`CatalogError::NotFound`]: no entity under the requested id
//! - [`CatalogError::Invalid`]: a validation rule or a patch type check failed
//! - [`CatalogError::Config`]: configuration could not be turned into rules
//! - [`CatalogError::Internal`]: unexpected backend failure
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.get_by_id(42).await {
//!     Ok(product) => println!("Found: {:?}", product),
//!     Err(CatalogError::NotFound { id, .. }) => println!("Product {} not found", id),
//!     Err(CatalogError::Invalid(violation)) => println!("Rejected: {}", violation),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::entity::EntityId;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The validation rule a value broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Field must be present and non-empty
    Required,
    /// Number must be zero or greater
    NonNegative,
    /// String must match the configured pattern
    Pattern,
    /// Date must not be earlier than today
    NotInPast,
    /// Patch value kind differs from the field's declared kind
    TypeMismatch,
    /// Patch payload was not a key/value object
    NotAnObject,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::NonNegative => "non_negative",
            Rule::Pattern => "pattern",
            Rule::NotInPast => "not_in_past",
            Rule::TypeMismatch => "type_mismatch",
            Rule::NotAnObject => "not_an_object",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single broken rule on a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("field '{field}' violates {rule}: {message}")]
pub struct Violation {
    pub field: String,
    pub rule: Rule,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

/// The main error type for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: EntityId,
    },

    /// Entity or patch payload failed validation
    #[error("invalid {0}")]
    Invalid(Violation),

    /// Configuration could not be applied
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Unexpected storage failure
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl CatalogError {
    pub fn not_found(entity_type: &'static str, id: EntityId) -> Self {
        CatalogError::NotFound { entity_type, id }
    }

    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::NotFound { .. } => "ENTITY_NOT_FOUND",
            CatalogError::Invalid(_) => "VALIDATION_ERROR",
            CatalogError::Config { .. } => "CONFIG_ERROR",
            CatalogError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CatalogError::Invalid(_))
    }

    /// The violation behind an `Invalid` error
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            CatalogError::Invalid(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Violation> for CatalogError {
    fn from(violation: Violation) -> Self {
        CatalogError::Invalid(violation)
    }
}

impl From<regex::Error> for CatalogError {
    fn from(err: regex::Error) -> Self {
        CatalogError::Config {
            message: err.to_string(),
        }
    }
}

/// Convert from anyhow::Error for callers mixing in untyped backends
impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        CatalogError::Internal {
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
