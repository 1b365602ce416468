//! The Product entity

use crate::core::entity::{Data, Entity, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A catalog product
///
/// Dates serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identity, 0 until persisted
    #[serde(default)]
    pub id: EntityId,

    pub name: String,

    /// Units in stock
    pub quantity: i64,

    /// Catalog code, e.g. `ABC-123`
    pub code_value: String,

    pub is_published: bool,

    /// Last day the product may be sold
    pub expiration: NaiveDate,

    pub price: f64,
}

impl Product {
    /// Create a product that has not been persisted yet
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        code_value: impl Into<String>,
        is_published: bool,
        expiration: NaiveDate,
        price: f64,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            quantity,
            code_value: code_value.into(),
            is_published,
            expiration,
            price,
        }
    }

    /// Same product under an explicit identity
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }
}

impl Entity for Product {
    fn resource_name() -> &'static str {
        "product"
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl Data for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

crate::impl_patchable!(Product,
    internal { id: Integer },
    exposed {
        name: String,
        quantity: i64,
        code_value: String => "codeValue",
        is_published: bool => "isPublished",
        expiration: NaiveDate,
        price: f64,
    }
);
