//! Validating repository decorator
//!
//! Wraps any [`Repository`] and checks every candidate entity against a
//! [`Validator`] before a write reaches the inner store. Reads pass through.

use crate::config::ValidationConfig;
use crate::core::entity::{Data, EntityId};
use crate::core::error::{CatalogResult, Violation};
use crate::core::patch::Patch;
use crate::core::query::Query;
use crate::core::repository::{Guard, Repository};
use crate::core::resolver::Patchable;
use crate::core::validation::{RuleSet, Validator};
use crate::entities::{Product, product_rules};
use async_trait::async_trait;
use std::marker::PhantomData;

/// Repository decorator enforcing business rules on writes
///
/// `create` and `update_or_create` are rejected before the inner repository
/// is called. `update` validates the merged entity through the inner store's
/// guard, so the check and the commit happen under the same lock.
pub struct ValidatingRepository<T, R, V = RuleSet<T>> {
    inner: R,
    validator: V,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R, V> ValidatingRepository<T, R, V>
where
    T: Data + Patchable,
    R: Repository<T>,
    V: Validator<T>,
{
    pub fn new(inner: R, validator: V) -> Self {
        Self {
            inner,
            validator,
            _entity: PhantomData,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn check(&self, entity: &T) -> Result<(), Violation> {
        self.validator.validate(entity).inspect_err(|violation| {
            tracing::warn!(
                resource = T::resource_name(),
                id = entity.id(),
                field = %violation.field,
                rule = %violation.rule,
                "write rejected"
            );
        })
    }
}

impl<R> ValidatingRepository<Product, R>
where
    R: Repository<Product>,
{
    /// Decorate `inner` with the product rules from `config`
    ///
    /// The code value pattern is compiled once, here.
    pub fn products(inner: R, config: &ValidationConfig) -> CatalogResult<Self> {
        Ok(Self::new(inner, product_rules(config)?))
    }
}

#[async_trait]
impl<T, R, V> Repository<T> for ValidatingRepository<T, R, V>
where
    T: Data + Patchable,
    R: Repository<T>,
    V: Validator<T>,
{
    async fn get(&self) -> CatalogResult<Vec<T>> {
        self.inner.get().await
    }

    async fn get_by_id(&self, id: EntityId) -> CatalogResult<T> {
        self.inner.get_by_id(id).await
    }

    async fn search(&self, query: &Query) -> CatalogResult<Vec<T>> {
        self.inner.search(query).await
    }

    async fn create(&self, entity: T) -> CatalogResult<T> {
        self.check(&entity)?;
        self.inner.create(entity).await
    }

    async fn update_with(
        &self,
        id: EntityId,
        patch: &Patch,
        guard: Guard<'_, T>,
    ) -> CatalogResult<T> {
        let checked = |candidate: &T| -> Result<(), Violation> {
            self.check(candidate)?;
            guard(candidate)
        };
        self.inner.update_with(id, patch, &checked).await
    }

    async fn update_or_create(&self, entity: T) -> CatalogResult<T> {
        self.check(&entity)?;
        self.inner.update_or_create(entity).await
    }

    async fn delete(&self, id: EntityId) -> CatalogResult<()> {
        self.inner.delete(id).await
    }
}
