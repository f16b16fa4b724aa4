//! In-memory audit store
//!
//! Backs the audit trail with a process-local vector. Used by the test
//! suite and by embedders that want the workflow/audit contract without a
//! database. Query semantics match [`super::PgAuditStore`].

use async_trait::async_trait;
use chrono::Utc;
use shopflow_common::types::Pagination;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::AuditStore;
use crate::audit::models::{
    AuditEvent, AuditFilter, AuditPage, AuditStats, AuditStatus, NewAuditEvent,
};
use crate::error::AuditResult;

/// Process-local audit store
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    events: RwLock<Vec<AuditEvent>>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with events, timestamps and all
    ///
    /// Intended for tests and for embedders restoring a snapshot.
    pub fn with_events(events: Vec<AuditEvent>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

fn matches(event: &AuditEvent, filter: &AuditFilter) -> bool {
    if let Some(action) = filter.action {
        if event.action != action {
            return false;
        }
    }
    if let Some(entity_type) = filter.entity_type {
        if event.entity_type != entity_type {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if event.status != status {
            return false;
        }
    }
    if let Some(ref search) = filter.search {
        let needle = search.to_lowercase();
        let name_hit = event
            .entity_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle));
        let error_hit = event
            .error_message
            .as_deref()
            .is_some_and(|msg| msg.to_lowercase().contains(&needle));
        if !name_hit && !error_hit {
            return false;
        }
    }
    if let Some(start) = filter.start_date {
        if event.created_at < start {
            return false;
        }
    }
    if let Some(end) = filter.end_date {
        if event.created_at > end {
            return false;
        }
    }
    true
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, event: NewAuditEvent) -> AuditResult<AuditEvent> {
        let record = AuditEvent {
            id: Uuid::new_v4(),
            actor_id: event.actor_id,
            action: event.action,
            entity_type: event.entity_type,
            entity_id: event.entity_id,
            entity_name: event.entity_name,
            details: event.details,
            status: event.status,
            error_message: event.error_message,
            created_at: Utc::now(),
        };

        let mut events = self.events.write().await;
        events.push(record.clone());

        debug!(
            audit_id = %record.id,
            action = %record.action,
            entity_type = %record.entity_type,
            "Appended audit event"
        );

        Ok(record)
    }

    async fn query(&self, filter: &AuditFilter, page: &Pagination) -> AuditResult<AuditPage> {
        let events = self.events.read().await;

        let mut filtered: Vec<&AuditEvent> =
            events.iter().filter(|event| matches(event, filter)).collect();
        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total_count = filtered.len() as u64;
        let offset = page.offset() as usize;
        let limit = page.limit() as usize;

        let events = filtered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(AuditPage {
            events,
            total_count,
        })
    }

    async fn stats(&self) -> AuditResult<AuditStats> {
        let events = self.events.read().await;

        let total_logs = events.len() as u64;
        let failed_logs = events
            .iter()
            .filter(|event| event.status == AuditStatus::Failed)
            .count() as u64;

        let mut action_counts = HashMap::new();
        for event in events.iter() {
            *action_counts.entry(event.action).or_insert(0) += 1;
        }

        Ok(AuditStats::from_counts(total_logs, failed_logs, action_counts))
    }
}
