//! Entity traits defining the core abstraction for catalog records

/// Identity assigned by a store. Zero means "not yet persisted".
pub type EntityId = u64;

/// Base trait for all entities in the system.
///
/// All entities have:
/// - id: identity assigned by the store (0 until persisted)
/// - a resource name used in logs and error messages
pub trait Entity: Clone + Send + Sync + 'static {
    /// The singular resource name (e.g., "product")
    fn resource_name() -> &'static str;

    /// Get the identifier of this entity instance
    fn id(&self) -> EntityId;

    /// Replace the identifier. Only stores should call this.
    fn set_id(&mut self, id: EntityId);

    /// Check if the entity has been assigned an identity by a store
    fn is_persisted(&self) -> bool {
        self.id() != 0
    }
}

/// Trait for data entities that carry a human-readable name.
///
/// The name is what query predicates filter on besides the id.
pub trait Data: Entity {
    /// Get the name of this data entity
    fn name(&self) -> &str;
}
