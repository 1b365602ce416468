//! Core module containing fundamental traits and types for the catalog

pub mod entity;
pub mod error;
pub mod field;
pub mod patch;
pub mod query;
pub mod repository;
pub mod resolver;
pub mod validation;

pub use entity::{Data, Entity, EntityId};
pub use error::{CatalogError, CatalogResult, Rule, Violation};
pub use field::{FieldKind, FieldType, FieldValue};
pub use patch::{Patch, PatchError};
pub use query::Query;
pub use repository::{Guard, Repository};
pub use resolver::{FieldDescriptor, FieldResolver, Patchable};
pub use validation::{AcceptAll, RuleSet, Validator};
