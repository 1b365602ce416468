//! Query predicates for repository search

use crate::core::entity::{Data, EntityId};
use serde::Deserialize;

/// Optional filters for [`Repository::search`](crate::core::repository::Repository::search)
///
/// Every set filter must match (logical AND). A zero id and an empty name
/// count as unset, so the default query matches every entity.
///
/// # Example
/// ```rust,ignore
/// // GET /products/search?id=3
/// let query = Query::by_id(3);
///
/// // GET /products/search?name=widget
/// let query = Query::default().name("widget");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Query {
    /// Exact identity
    pub id: Option<EntityId>,

    /// Exact, case-sensitive name
    pub name: Option<String>,
}

impl Query {
    /// Query matching every entity
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: EntityId) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Add an id filter
    pub fn id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    /// Add a name filter
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Id filter, if set to something other than zero
    pub fn id_filter(&self) -> Option<EntityId> {
        self.id.filter(|id| *id != 0)
    }

    /// Name filter, if set to something other than the empty string
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// True when no filter is set
    pub fn is_empty(&self) -> bool {
        self.id_filter().is_none() && self.name_filter().is_none()
    }

    /// Check an entity against every set filter
    pub fn matches<T: Data>(&self, entity: &T) -> bool {
        self.id_filter().is_none_or(|id| entity.id() == id)
            && self.name_filter().is_none_or(|name| entity.name() == name)
    }
}
