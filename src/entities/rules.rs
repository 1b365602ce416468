//! Business rules for products

use crate::config::ValidationConfig;
use crate::core::error::CatalogResult;
use crate::core::validation::{RuleSet, validators};
use crate::entities::Product;
use chrono::{NaiveDate, Utc};

fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Product rules built from configuration, using the UTC calendar date
pub fn product_rules(config: &ValidationConfig) -> CatalogResult<RuleSet<Product>> {
    product_rules_with_clock(config, today_utc)
}

/// Product rules with an injectable notion of "today"
///
/// Order: required name and code value, non-negative quantity, code value
/// pattern, expiration not in the past, non-negative price.
pub fn product_rules_with_clock(
    config: &ValidationConfig,
    today: fn() -> NaiveDate,
) -> CatalogResult<RuleSet<Product>> {
    let pattern = config.code_value_regex()?;

    Ok(RuleSet::new()
        .rule("name", validators::required())
        .rule("code_value", validators::required())
        .rule("quantity", validators::non_negative())
        .rule("code_value", validators::matches_pattern(pattern))
        .rule("expiration", validators::not_before(today))
        .rule("price", validators::non_negative()))
}
