//! Repository implementations and decorators

pub mod in_memory;
pub mod validating;

pub use in_memory::InMemoryRepository;
pub use validating::ValidatingRepository;
