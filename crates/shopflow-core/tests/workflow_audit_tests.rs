//! Integration tests for the workflow engine + audit recorder pair.
//!
//! These exercise the contract a host application relies on: evaluate a
//! transition, apply it only when allowed, record the attempt either way,
//! and read the history back through filters, pagination, and stats.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

use shopflow_common::types::Pagination;
use shopflow_core::audit::{
    AuditAction, AuditEvent, AuditFilter, AuditRecorder, AuditStatus, EntityType,
    MemoryAuditStore, NewAuditEvent,
};
use shopflow_core::workflow::{JobOrderStatus, Role, WorkflowEngine};

fn seeded_event(name: &str, y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> AuditEvent {
    AuditEvent {
        id: Uuid::new_v4(),
        actor_id: Some(Uuid::new_v4()),
        action: AuditAction::Update,
        entity_type: EntityType::JobOrder,
        entity_id: None,
        entity_name: Some(name.to_string()),
        details: None,
        status: AuditStatus::Success,
        error_message: None,
        created_at: Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap(),
    }
}

#[tokio::test]
async fn test_transition_attempt_is_recorded_either_way() {
    let engine = WorkflowEngine::standard();
    let recorder = AuditRecorder::new(Arc::new(MemoryAuditStore::new()));
    let actor = Uuid::new_v4();

    // Allowed: service advisor sends a draft out for estimation.
    let result = engine.evaluate(
        JobOrderStatus::Draft,
        JobOrderStatus::Estimated,
        Role::ServiceAdvisor,
    );
    assert_eq!(result.new_status(), Some(JobOrderStatus::Estimated));

    recorder
        .record(
            NewAuditEvent::builder()
                .actor_id(actor)
                .action(AuditAction::Update)
                .entity_type(EntityType::JobOrder)
                .entity_name("JO-1042")
                .details(json!({"from": "DRAFT", "to": "ESTIMATED"}))
                .build(),
        )
        .await
        .unwrap();

    // Denied: mechanic tries to bill; recorded as FAILED with the reason.
    let result = engine.evaluate(
        JobOrderStatus::QualityCheck,
        JobOrderStatus::Billed,
        Role::Mechanic,
    );
    let reason = result.denial().unwrap();

    recorder
        .record(
            NewAuditEvent::builder()
                .actor_id(actor)
                .action(AuditAction::Update)
                .entity_type(EntityType::JobOrder)
                .entity_name("JO-1042")
                .failed(reason.to_string())
                .build(),
        )
        .await
        .unwrap();

    let stats = recorder.stats().await.unwrap();
    assert_eq!(stats.total_logs, 2);
    assert_eq!(stats.failed_logs, 1);
    assert_eq!(stats.action_counts[&AuditAction::Update], 2);
    assert_eq!(stats.success_rate, 50.0);

    let page = recorder
        .query(
            AuditFilter {
                status: Some(AuditStatus::Failed),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(
        page.events[0].error_message.as_deref(),
        Some("role mechanic is not permitted to set status BILLED")
    );
}

#[tokio::test]
async fn test_stats_on_empty_history() {
    let recorder = AuditRecorder::new(Arc::new(MemoryAuditStore::new()));

    let stats = recorder.stats().await.unwrap();

    assert_eq!(stats.total_logs, 0);
    assert_eq!(stats.failed_logs, 0);
    assert!(stats.action_counts.is_empty());
    assert_eq!(stats.success_rate, 100.0);
}

#[tokio::test]
async fn test_end_date_covers_its_whole_calendar_day() {
    let store = MemoryAuditStore::with_events(vec![
        seeded_event("late on the 15th", 2024, 1, 15, 23, 59, 0),
        seeded_event("just past midnight", 2024, 1, 16, 0, 0, 1),
    ]);
    let recorder = AuditRecorder::new(Arc::new(store));

    // Midnight of the 15th as the bound; normalization stretches it to
    // 23:59:59.999 of that day.
    let filter = AuditFilter {
        end_date: Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()),
        ..Default::default()
    };
    let page = recorder.query(filter, Pagination::default()).await.unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(
        page.events[0].entity_name.as_deref(),
        Some("late on the 15th")
    );
}

#[tokio::test]
async fn test_pagination_slices_and_reports_full_total() {
    let recorder = AuditRecorder::new(Arc::new(MemoryAuditStore::new()));

    for i in 0..25 {
        recorder
            .record(
                NewAuditEvent::builder()
                    .action(AuditAction::Create)
                    .entity_type(EntityType::Customer)
                    .entity_name(format!("customer-{i}"))
                    .build(),
            )
            .await
            .unwrap();
    }

    let filter = AuditFilter {
        entity_type: Some(EntityType::Customer),
        ..Default::default()
    };

    let page = recorder
        .query(filter.clone(), Pagination::new(3, 10))
        .await
        .unwrap();
    assert_eq!(page.events.len(), 5);
    assert_eq!(page.total_count, 25);

    // A page past the end is empty but still reports the full total.
    let page = recorder.query(filter, Pagination::new(4, 10)).await.unwrap();
    assert!(page.events.is_empty());
    assert_eq!(page.total_count, 25);
}

#[tokio::test]
async fn test_failed_login_has_no_actor() {
    // Pre-authentication failure: no user identity exists yet.
    let recorder = AuditRecorder::new(Arc::new(MemoryAuditStore::new()));

    let event = recorder
        .record(
            NewAuditEvent::builder()
                .action(AuditAction::Login)
                .entity_type(EntityType::Authentication)
                .failed("invalid credentials")
                .build(),
        )
        .await
        .unwrap();

    assert!(event.actor_id.is_none());
    assert_eq!(event.status, AuditStatus::Failed);
}

#[tokio::test]
async fn test_combined_filters_are_anded() {
    let recorder = AuditRecorder::new(Arc::new(MemoryAuditStore::new()));

    recorder
        .record(
            NewAuditEvent::builder()
                .action(AuditAction::Delete)
                .entity_type(EntityType::Branch)
                .entity_name("North Branch")
                .build(),
        )
        .await
        .unwrap();
    recorder
        .record(
            NewAuditEvent::builder()
                .action(AuditAction::Delete)
                .entity_type(EntityType::Branch)
                .entity_name("South Branch")
                .failed("branch has assigned mechanics")
                .build(),
        )
        .await
        .unwrap();
    recorder
        .record(
            NewAuditEvent::builder()
                .action(AuditAction::Update)
                .entity_type(EntityType::Branch)
                .entity_name("South Branch")
                .build(),
        )
        .await
        .unwrap();

    let page = recorder
        .query(
            AuditFilter {
                action: Some(AuditAction::Delete),
                entity_type: Some(EntityType::Branch),
                search: Some("south".to_string()),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.events[0].status, AuditStatus::Failed);
}
