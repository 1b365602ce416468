//! Macro-generated test suite for `Repository<Product>` contract validation.
//!
//! The `repository_tests!` macro generates a test module that validates any
//! `Repository<Product>` implementation against the full contract: id
//! assignment, CRUD, patch semantics, search filters and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod repository_harness;
//!
//! use repository_harness::*;
//! use catalog::storage::InMemoryRepository;
//!
//! repository_tests!(InMemoryRepository::<Product>::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Scenario
//! - `test_end_to_end_scenario`: create, patch, delete, lookup fails
//!
//! ## CRUD
//! - `test_get_empty`, `test_get_in_id_order`
//! - `test_get_by_id_missing`
//! - `test_create_assigns_fresh_ids`, `test_ids_not_reused_after_delete`
//! - `test_update_or_create_*`, `test_delete_*`
//!
//! ## Patch
//! - aliases and field names, unknown keys, `id` key, type mismatch,
//!   empty patch, idempotence, missing entity
//!
//! ## Search
//! - by name, by id, combined, empty query, zero id, empty name, no match
//!
//! ## Concurrency
//! - `test_concurrent_creates_get_distinct_ids`
//! - `test_concurrent_patches_keep_one_entity`

/// Generate a full `Repository<Product>` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an empty repository
/// implementing `Repository<Product> + 'static`. It is re-evaluated for each
/// test to ensure isolation.
#[macro_export]
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use catalog::core::entity::Data;
            use catalog::core::error::Rule;
            use catalog::core::patch::Patch;
            use catalog::core::query::Query;
            use catalog::core::repository::Repository;
            use catalog::entities::Product;
            use serde_json::json;
            use std::sync::Arc;

            // ==================================================================
            // Scenario
            // ==================================================================

            #[tokio::test]
            async fn test_end_to_end_scenario() {
                let repo = $factory;

                let created = repo.create(widget()).await.unwrap();
                assert_eq!(created.id, 1);
                assert_eq!(created.name(), "widget");

                let patch = Patch::from_json(json!({ "quantity": 10 })).unwrap();
                let updated = repo.update(1, &patch).await.unwrap();

                let mut expected = created.clone();
                expected.quantity = 10;
                assert_eq!(updated, expected);

                repo.delete(1).await.unwrap();
                let err = repo.get_by_id(1).await.unwrap_err();
                assert!(err.is_not_found());
                assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_get_empty() {
                let repo = $factory;
                assert!(repo.get().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_get_in_id_order() {
                let repo = $factory;
                for product in sample_batch(5) {
                    repo.create(product).await.unwrap();
                }

                let all = repo.get().await.unwrap();
                assert_count(&all, 5);
                let ids: Vec<_> = all.iter().map(|p| p.id).collect();
                assert_eq!(ids, vec![1, 2, 3, 4, 5]);
                assert_eq!(all[0].name, "item-0");
            }

            #[tokio::test]
            async fn test_get_by_id_missing() {
                let repo = $factory;
                assert!(repo.get_by_id(42).await.unwrap_err().is_not_found());
            }

            #[tokio::test]
            async fn test_create_assigns_fresh_ids() {
                let repo = $factory;

                let first = repo.create(widget().with_id(99)).await.unwrap();
                let second = repo.create(widget().with_id(99)).await.unwrap();

                assert_eq!(first.id, 1);
                assert_eq!(second.id, 2);
                assert!(repo.get_by_id(99).await.unwrap_err().is_not_found());
                assert_eq!(repo.get_by_id(2).await.unwrap(), second);
            }

            #[tokio::test]
            async fn test_ids_not_reused_after_delete() {
                let repo = $factory;
                let a = repo.create(widget()).await.unwrap();
                let b = repo.create(widget()).await.unwrap();
                repo.delete(b.id).await.unwrap();
                repo.delete(a.id).await.unwrap();

                let c = repo.create(widget()).await.unwrap();
                assert_eq!(c.id, 3);
            }

            #[tokio::test]
            async fn test_update_or_create_replaces_existing() {
                let repo = $factory;
                let created = repo.create(widget()).await.unwrap();

                let mut replacement = sample_product("replacement", 0).with_id(created.id);
                replacement.price = 0.0;
                let stored = repo.update_or_create(replacement.clone()).await.unwrap();

                assert_eq!(stored, replacement);
                assert_eq!(repo.get_by_id(created.id).await.unwrap(), replacement);
                assert_count(&repo.get().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_update_or_create_inserts_under_given_id() {
                let repo = $factory;

                let stored = repo.update_or_create(widget().with_id(7)).await.unwrap();
                assert_eq!(stored.id, 7);
                assert_eq!(repo.get_by_id(7).await.unwrap().name, "widget");

                let next = repo.create(widget()).await.unwrap();
                assert_eq!(next.id, 8, "counter moves past upserted ids");
            }

            #[tokio::test]
            async fn test_update_or_create_without_id_creates() {
                let repo = $factory;
                let stored = repo.update_or_create(widget()).await.unwrap();
                assert_eq!(stored.id, 1);
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let repo = $factory;
                let keep = repo.create(sample_product("keep", 1)).await.unwrap();
                let gone = repo.create(sample_product("gone", 1)).await.unwrap();

                repo.delete(gone.id).await.unwrap();

                assert_eq!(repo.get().await.unwrap(), vec![keep]);
            }

            #[tokio::test]
            async fn test_delete_missing() {
                let repo = $factory;
                assert!(repo.delete(1).await.unwrap_err().is_not_found());

                repo.create(widget()).await.unwrap();
                repo.delete(1).await.unwrap();
                assert!(repo.delete(1).await.unwrap_err().is_not_found());
            }

            // ==================================================================
            // Patch
            // ==================================================================

            #[tokio::test]
            async fn test_update_by_alias_and_by_name() {
                let repo = $factory;
                let created = repo.create(widget()).await.unwrap();

                let by_alias = Patch::new().set("isPublished", true).set("codeValue", "QQQ-111");
                let updated = repo.update(created.id, &by_alias).await.unwrap();
                assert!(updated.is_published);
                assert_eq!(updated.code_value, "QQQ-111");

                let by_name = Patch::new().set("is_published", false).set("code_value", "RRR-222");
                let updated = repo.update(created.id, &by_name).await.unwrap();
                assert!(!updated.is_published);
                assert_eq!(updated.code_value, "RRR-222");
            }

            #[tokio::test]
            async fn test_update_ignores_unknown_keys() {
                let repo = $factory;
                let created = repo.create(widget()).await.unwrap();

                let patch = Patch::from_json(json!({ "color": "red", "Quantity": 1 })).unwrap();
                let updated = repo.update(created.id, &patch).await.unwrap();

                assert_eq!(updated, created);
            }

            #[tokio::test]
            async fn test_update_never_touches_id() {
                let repo = $factory;
                let created = repo.create(widget()).await.unwrap();

                let patch = Patch::new().set("id", 99i64).set("name", "renamed");
                let updated = repo.update(created.id, &patch).await.unwrap();

                assert_eq!(updated.id, created.id);
                assert_eq!(updated.name, "renamed");
                assert!(repo.get_by_id(99).await.unwrap_err().is_not_found());
            }

            #[tokio::test]
            async fn test_update_type_mismatch_changes_nothing() {
                let repo = $factory;
                let created = repo.create(widget()).await.unwrap();

                let patch = Patch::from_json(json!({
                    "name": "renamed",
                    "price": 3.5,
                    "quantity": "many",
                }))
                .unwrap();
                let err = repo.update(created.id, &patch).await.unwrap_err();

                let violation = err.violation().expect("type mismatch is a violation");
                assert_eq!(violation.rule, Rule::TypeMismatch);
                assert_eq!(violation.field, "quantity");
                assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);
            }

            #[tokio::test]
            async fn test_update_rejects_json_date_string() {
                let repo = $factory;
                let created = repo.create(widget()).await.unwrap();

                let patch = Patch::from_json(json!({ "expiration": "2999-01-01" })).unwrap();
                let err = repo.update(created.id, &patch).await.unwrap_err();

                assert_eq!(err.violation().unwrap().rule, Rule::TypeMismatch);
                assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);
            }

            #[tokio::test]
            async fn test_update_empty_patch_is_noop() {
                let repo = $factory;
                let created = repo.create(widget()).await.unwrap();

                let updated = repo.update(created.id, &Patch::new()).await.unwrap();
                assert_eq!(updated, created);
            }

            #[tokio::test]
            async fn test_update_is_idempotent() {
                let repo = $factory;
                let created = repo.create(widget()).await.unwrap();
                let patch = Patch::new().set("quantity", 3i64).set("price", 4.25);

                let once = repo.update(created.id, &patch).await.unwrap();
                let twice = repo.update(created.id, &patch).await.unwrap();

                assert_eq!(once, twice);
            }

            #[tokio::test]
            async fn test_update_only_touches_target() {
                let repo = $factory;
                let target = repo.create(sample_product("target", 1)).await.unwrap();
                let other = repo.create(sample_product("other", 1)).await.unwrap();

                repo.update(target.id, &Patch::new().set("quantity", 50i64))
                    .await
                    .unwrap();

                assert_eq!(repo.get_by_id(other.id).await.unwrap(), other);
            }

            #[tokio::test]
            async fn test_update_missing() {
                let repo = $factory;
                let patch = Patch::new().set("quantity", 1i64);
                assert!(repo.update(5, &patch).await.unwrap_err().is_not_found());
            }

            // ==================================================================
            // Search
            // ==================================================================

            async fn seeded() -> impl Repository<Product> {
                let repo = $factory;
                repo.create(sample_product("apple", 1)).await.unwrap();
                repo.create(sample_product("pear", 2)).await.unwrap();
                repo.create(sample_product("apple", 3)).await.unwrap();
                repo
            }

            #[tokio::test]
            async fn test_search_by_name() {
                let repo = seeded().await;
                let found = repo.search(&Query::by_name("apple")).await.unwrap();
                let ids: Vec<_> = found.iter().map(|p| p.id).collect();
                assert_eq!(ids, vec![1, 3]);
            }

            #[tokio::test]
            async fn test_search_name_is_exact() {
                let repo = seeded().await;
                assert!(repo.search(&Query::by_name("Apple")).await.unwrap().is_empty());
                assert!(repo.search(&Query::by_name("app")).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_search_by_id() {
                let repo = seeded().await;
                let found = repo.search(&Query::by_id(2)).await.unwrap();
                assert_count(&found, 1);
                assert_eq!(found[0].name, "pear");
            }

            #[tokio::test]
            async fn test_search_by_id_and_name() {
                let repo = seeded().await;
                let hit = repo.search(&Query::by_id(3).name("apple")).await.unwrap();
                assert_count(&hit, 1);

                let miss = repo.search(&Query::by_id(2).name("apple")).await.unwrap();
                assert!(miss.is_empty());
            }

            #[tokio::test]
            async fn test_search_empty_query_returns_all() {
                let repo = seeded().await;
                assert_count(&repo.search(&Query::all()).await.unwrap(), 3);
            }

            #[tokio::test]
            async fn test_search_zero_id_and_empty_name_do_not_filter() {
                let repo = seeded().await;
                let query = Query::by_id(0).name("");
                assert_count(&repo.search(&query).await.unwrap(), 3);
            }

            #[tokio::test]
            async fn test_search_no_results() {
                let repo = seeded().await;
                assert!(repo.search(&Query::by_id(42)).await.unwrap().is_empty());
                assert!(repo.search(&Query::by_name("plum")).await.unwrap().is_empty());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
            async fn test_concurrent_creates_get_distinct_ids() {
                let repo = Arc::new($factory);

                let handles: Vec<_> = sample_batch(32)
                    .into_iter()
                    .map(|product| {
                        let repo = Arc::clone(&repo);
                        tokio::spawn(async move { repo.create(product).await })
                    })
                    .collect();

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap().unwrap().id);
                }
                ids.sort_unstable();

                assert_eq!(ids, (1..=32).collect::<Vec<_>>());
                assert_count(&repo.get().await.unwrap(), 32);
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
            async fn test_concurrent_patches_keep_one_entity() {
                let repo = Arc::new($factory);
                let created = repo.create(widget()).await.unwrap();
                let id = created.id;

                let handles: Vec<_> = (1..=16i64)
                    .map(|quantity| {
                        let repo = Arc::clone(&repo);
                        tokio::spawn(async move {
                            let patch = Patch::new().set("quantity", quantity);
                            repo.update(id, &patch).await
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                let all = repo.get().await.unwrap();
                assert_count(&all, 1);
                assert!((1..=16).contains(&all[0].quantity));
                assert_eq!(all[0].name, created.name);
            }
        }
    };
}
