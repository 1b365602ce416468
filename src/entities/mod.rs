//! Concrete catalog entities and the macros used to declare them

pub mod macros;
pub mod product;
pub mod rules;

pub use product::Product;
pub use rules::{product_rules, product_rules_with_clock};
