//! End-to-end record lifecycle through the application context.

use std::sync::Arc;

use hookblocks_cache::CacheManager;
use hookblocks_cache::memory::MemoryCacheProvider;
use hookblocks_core::config::AppConfig;
use hookblocks_core::config::cache::MemoryCacheConfig;
use hookblocks_core::types::actor::Actor;
use hookblocks_core::types::request::RequestKind;
use hookblocks_database::memory::MemoryRecordStore;
use hookblocks_entity::record::{CreateRecord, RecordStatus, UpdateRecord};
use hookblocks_service::{AdminSort, AppContext};

fn context() -> AppContext {
    let provider = MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 100 });
    AppContext::from_parts(
        AppConfig::default(),
        Arc::new(CacheManager::from_provider(Arc::new(provider))),
        Arc::new(MemoryRecordStore::new()),
    )
}

fn block(hook: &str, priority: i32, body: &str) -> CreateRecord {
    CreateRecord {
        title: body.to_string(),
        hook_name: hook.to_string(),
        priority: Some(priority),
        body: format!("  {body}\n"),
        order: 0,
    }
}

#[tokio::test]
async fn test_published_block_renders_at_its_hook() {
    let ctx = context();
    let admin = Actor::admin("root");

    let late = ctx.records.create(&admin, block("wp_footer", 20, "late")).await.unwrap();
    let early = ctx.records.create(&admin, block("wp_footer", 10, "early")).await.unwrap();
    ctx.records.publish(&admin, late.id).await.unwrap();
    ctx.records.publish(&admin, early.id).await.unwrap();

    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_footer").await, "earlylate");
    assert_eq!(cycle.render("wp_head").await, "");
}

#[tokio::test]
async fn test_trash_removes_block_immediately() {
    let ctx = context();
    let admin = Actor::admin("root");
    let record = ctx.records.create(&admin, block("wp_head", 10, "meta")).await.unwrap();
    ctx.records.publish(&admin, record.id).await.unwrap();

    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_head").await, "meta");

    ctx.records.trash(&admin, record.id).await.unwrap();
    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_head").await, "");
}

#[tokio::test]
async fn test_editing_published_block_refreshes_output() {
    let ctx = context();
    let admin = Actor::admin("root");
    let record = ctx.records.create(&admin, block("wp_footer", 10, "v1")).await.unwrap();
    ctx.records.publish(&admin, record.id).await.unwrap();
    ctx.begin_cycle(RequestKind::Content).await;

    ctx.records
        .update(
            &admin,
            record.id,
            UpdateRecord {
                body: Some("v2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_footer").await, "v2");
}

#[tokio::test]
async fn test_draft_edits_do_not_touch_snapshot() {
    let ctx = context();
    let admin = Actor::admin("root");
    let draft = ctx.records.create(&admin, block("wp_footer", 10, "draft")).await.unwrap();
    ctx.begin_cycle(RequestKind::Content).await;
    assert!(ctx.registry.is_cached().await.unwrap());

    ctx.records
        .update(
            &admin,
            draft.id,
            UpdateRecord {
                title: Some("renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(ctx.registry.is_cached().await.unwrap());
}

#[tokio::test]
async fn test_rejected_publish_never_renders() {
    let ctx = context();
    let admin = Actor::admin("root");
    let record = ctx.records.create(&admin, block("", 10, "orphan")).await.unwrap();

    let outcome = ctx.records.publish(&admin, record.id).await.unwrap();
    assert_eq!(outcome.record.status, RecordStatus::Draft);
    assert_eq!(ctx.records.take_notices(&admin).await.unwrap().len(), 1);

    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert!(cycle.registry().registered_hooks().await.is_empty());
}

#[tokio::test]
async fn test_admin_rows_sorted_by_priority() {
    let ctx = context();
    let admin = Actor::admin("root");
    ctx.records.create(&admin, block("wp_footer", 30, "c")).await.unwrap();
    ctx.records.create(&admin, block("wp_head", 5, "a")).await.unwrap();
    ctx.records.create(&admin, block("wp_footer", 10, "b")).await.unwrap();

    let rows = ctx
        .records
        .admin_rows(&admin, AdminSort::Priority, false)
        .await
        .unwrap();
    let priorities: Vec<i32> = rows.iter().map(|r| r.priority).collect();
    assert_eq!(priorities, vec![5, 10, 30]);
}

#[tokio::test]
async fn test_clearing_hook_on_published_record_keeps_status() {
    let ctx = context();
    let admin = Actor::admin("root");
    let record = ctx.records.create(&admin, block("wp_footer", 10, "gone")).await.unwrap();
    ctx.records.publish(&admin, record.id).await.unwrap();

    // Plain saves are not re-validated, so the record stays published but inactive.
    let updated = ctx
        .records
        .update(
            &admin,
            record.id,
            UpdateRecord {
                hook_name: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, RecordStatus::Published);
    assert!(!updated.is_active());

    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_footer").await, "");
}

#[tokio::test]
async fn test_unpublish_removes_block_immediately() {
    let ctx = context();
    let admin = Actor::admin("root");
    let record = ctx.records.create(&admin, block("wp_footer", 10, "promo")).await.unwrap();
    ctx.records.publish(&admin, record.id).await.unwrap();

    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_footer").await, "promo");

    ctx.records.unpublish(&admin, record.id).await.unwrap();
    assert!(!ctx.registry.is_cached().await.unwrap());

    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_footer").await, "");
}

#[tokio::test]
async fn test_restore_keeps_block_hidden_until_republished() {
    let ctx = context();
    let admin = Actor::admin("root");
    let record = ctx.records.create(&admin, block("wp_head", 10, "meta")).await.unwrap();
    ctx.records.publish(&admin, record.id).await.unwrap();
    ctx.records.trash(&admin, record.id).await.unwrap();

    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_head").await, "");

    // A restored record is a draft and never part of the active set.
    ctx.records.restore(&admin, record.id).await.unwrap();
    assert!(ctx.registry.is_cached().await.unwrap());
    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_head").await, "");

    ctx.records.publish(&admin, record.id).await.unwrap();
    let cycle = ctx.begin_cycle(RequestKind::Content).await;
    assert_eq!(cycle.render("wp_head").await, "meta");
}

#[tokio::test]
async fn test_flush_cache_drops_snapshot_and_notices() {
    let ctx = context();
    let admin = Actor::admin("root");
    let record = ctx.records.create(&admin, block("", 10, "orphan")).await.unwrap();
    ctx.records.publish(&admin, record.id).await.unwrap();
    ctx.begin_cycle(RequestKind::Content).await;
    assert!(ctx.registry.is_cached().await.unwrap());

    ctx.flush_cache().await.unwrap();

    assert!(!ctx.registry.is_cached().await.unwrap());
    assert!(ctx.records.take_notices(&admin).await.unwrap().is_empty());
}
