//! End-to-end catalog walkthrough
//!
//! This demo:
//! - Loads configuration (from `CATALOG_CONFIG` if set, defaults otherwise)
//! - Wraps the in-memory store with the validating decorator
//! - Creates, patches, searches and deletes a product
//! - Shows how invalid writes and malformed patches are rejected

use anyhow::Context;
use catalog::logging;
use catalog::prelude::*;
use chrono::{Days, Utc};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("CATALOG_CONFIG") {
        Ok(path) => CatalogConfig::from_yaml_file(&path)?,
        Err(_) => CatalogConfig::default(),
    };
    logging::init(&config.logging)?;

    println!("🚀 Catalog Demo");
    println!("===============\n");

    let store = InMemoryRepository::<Product>::new();
    let repo = ValidatingRepository::products(store.clone(), &config.validation)?;
    println!(
        "✅ Validating store ready (code value pattern: {})\n",
        config.validation.code_value_pattern
    );

    let expiration = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(30))
        .context("expiration date out of range")?;

    // Create
    let widget = repo
        .create(Product::new("widget", 5, "ABC-123", false, expiration, 9.99))
        .await?;
    println!("📦 Created: {}", serde_json::to_string(&widget)?);

    // Patch from a JSON body, using the external aliases
    let patch = Patch::from_json(json!({ "quantity": 10, "isPublished": true, "color": "red" }))?;
    let updated = repo.update(widget.id, &patch).await?;
    println!("✏️  Patched: {}", serde_json::to_string(&updated)?);

    // Rejected writes leave the store untouched
    let invalid = Product::new("gadget", 1, "bad-code", false, expiration, 1.0);
    if let Err(e) = repo.create(invalid).await {
        println!("⛔ Rejected create [{}]: {}", e.error_code(), e);
    }

    let mismatch = Patch::new().set("price", "free");
    if let Err(e) = repo.update(widget.id, &mismatch).await {
        println!("⛔ Rejected patch [{}]: {}", e.error_code(), e);
    }

    // Search
    let found = repo.search(&Query::by_name("widget")).await?;
    println!("\n🔎 Search by name 'widget': {} result(s)", found.len());

    // Delete
    repo.delete(widget.id).await?;
    match repo.get_by_id(widget.id).await {
        Err(e) if e.is_not_found() => println!("🗑️  Deleted product {}", widget.id),
        other => anyhow::bail!("unexpected lookup result after delete: {:?}", other),
    }

    println!("\n📊 Products left in store: {}", store.len().await);
    Ok(())
}
