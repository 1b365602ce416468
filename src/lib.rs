//! # Catalog
//!
//! Storage-agnostic core of a product catalog service.
//!
//! ## Features
//!
//! - **Generic Patching**: Merge partial key/value updates into any entity
//!   declared with [`impl_patchable!`], all-or-nothing and type checked
//! - **Field Resolution**: External keys map to fields by alias first, then by
//!   field name; internal fields such as `id` are never patchable
//! - **Repository Abstraction**: One async [`Repository`](core::Repository)
//!   trait for every backend, with an in-memory store out of the box
//! - **Validation Decorator**: Business rules checked before any write reaches
//!   the wrapped store
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog::prelude::*;
//!
//! # async fn run() -> CatalogResult<()> {
//! let config = CatalogConfig::default();
//! let repo = ValidatingRepository::products(InMemoryRepository::new(), &config.validation)?;
//!
//! let expiration = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap_or_default();
//! let created = repo
//!     .create(Product::new("widget", 5, "ABC-123", false, expiration, 9.99))
//!     .await?;
//!
//! let patch = Patch::new().set("isPublished", true).set("price", 12.5);
//! let updated = repo.update(created.id, &patch).await?;
//! assert!(updated.is_published);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod logging;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Data, Entity, EntityId},
        error::{CatalogError, CatalogResult, Rule, Violation},
        field::{FieldKind, FieldValue},
        patch::{Patch, PatchError},
        query::Query,
        repository::Repository,
        resolver::{FieldResolver, Patchable},
        validation::{RuleSet, Validator},
    };

    // === Macros ===
    pub use crate::impl_patchable;

    // === Entities ===
    pub use crate::entities::Product;

    // === Storage ===
    pub use crate::storage::{InMemoryRepository, ValidatingRepository};

    // === Config ===
    pub use crate::config::{CatalogConfig, LoggingConfig, ValidationConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
}
