//! Postgres-backed audit store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use shopflow_common::types::Pagination;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::AuditStore;
use crate::audit::models::{
    AuditAction, AuditEvent, AuditFilter, AuditPage, AuditStats, NewAuditEvent,
};
use crate::error::{AuditError, AuditResult};

/// Durable audit store over a Postgres `audit_events` table
#[derive(Debug, Clone)]
pub struct PgAuditStore {
    pool: PgPool,
}

const EVENT_COLUMNS: &str = "id, actor_id, action, entity_type, entity_id, \
                             entity_name, details, status, error_message, created_at";

impl PgAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded schema migrations
    pub async fn migrate(&self) -> AuditResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Raw row shape; enum columns are stored as TEXT and parsed on read
#[derive(Debug, sqlx::FromRow)]
struct AuditEventRow {
    id: Uuid,
    actor_id: Option<Uuid>,
    action: String,
    entity_type: String,
    entity_id: Option<String>,
    entity_name: Option<String>,
    details: Option<JsonValue>,
    status: String,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = AuditError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let action = row.action.parse().map_err(|_| AuditError::Decode {
            id: row.id,
            field: "action",
            value: row.action.clone(),
        })?;
        let entity_type = row.entity_type.parse().map_err(|_| AuditError::Decode {
            id: row.id,
            field: "entity_type",
            value: row.entity_type.clone(),
        })?;
        let status = row.status.parse().map_err(|_| AuditError::Decode {
            id: row.id,
            field: "status",
            value: row.status.clone(),
        })?;

        Ok(AuditEvent {
            id: row.id,
            actor_id: row.actor_id,
            action,
            entity_type,
            entity_id: row.entity_id,
            entity_name: row.entity_name,
            details: row.details,
            status,
            error_message: row.error_message,
            created_at: row.created_at,
        })
    }
}

/// Escape LIKE metacharacters and wrap in wildcards for a substring match
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// WHERE clause fragments for an [`AuditFilter`], `$n` placeholders
/// numbered from 1 in filter-field order
fn filter_conditions(filter: &AuditFilter) -> Vec<String> {
    let mut bind_count = 1;
    let mut conditions = Vec::new();

    if filter.action.is_some() {
        conditions.push(format!("action = ${bind_count}"));
        bind_count += 1;
    }
    if filter.entity_type.is_some() {
        conditions.push(format!("entity_type = ${bind_count}"));
        bind_count += 1;
    }
    if filter.status.is_some() {
        conditions.push(format!("status = ${bind_count}"));
        bind_count += 1;
    }
    if filter.search.is_some() {
        // One bind reused for both columns
        conditions.push(format!(
            "(entity_name ILIKE ${bind_count} OR error_message ILIKE ${bind_count})"
        ));
        bind_count += 1;
    }
    if filter.start_date.is_some() {
        conditions.push(format!("created_at >= ${bind_count}"));
        bind_count += 1;
    }
    if filter.end_date.is_some() {
        conditions.push(format!("created_at <= ${bind_count}"));
    }

    conditions
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn append(&self, event: NewAuditEvent) -> AuditResult<AuditEvent> {
        let row = sqlx::query_as::<_, AuditEventRow>(&format!(
            r#"
            INSERT INTO audit_events (
                actor_id, action, entity_type, entity_id,
                entity_name, details, status, error_message
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.actor_id)
        .bind(event.action.as_str())
        .bind(event.entity_type.as_str())
        .bind(&event.entity_id)
        .bind(&event.entity_name)
        .bind(&event.details)
        .bind(event.status.as_str())
        .bind(&event.error_message)
        .fetch_one(&self.pool)
        .await?;

        let record = AuditEvent::try_from(row)?;

        debug!(
            audit_id = %record.id,
            action = %record.action,
            entity_type = %record.entity_type,
            status = %record.status,
            "Appended audit event"
        );

        Ok(record)
    }

    async fn query(&self, filter: &AuditFilter, page: &Pagination) -> AuditResult<AuditPage> {
        let conditions = filter_conditions(filter);
        let mut where_clause = String::from("WHERE 1=1");
        for condition in &conditions {
            where_clause.push_str(" AND ");
            where_clause.push_str(condition);
        }

        let next_bind = conditions.len() + 1;
        let page_sql = format!(
            "SELECT {EVENT_COLUMNS} FROM audit_events {where_clause} \
             ORDER BY created_at DESC LIMIT ${next_bind} OFFSET ${}",
            next_bind + 1
        );
        let count_sql = format!("SELECT COUNT(*) FROM audit_events {where_clause}");

        let mut page_query = sqlx::query_as::<_, AuditEventRow>(&page_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);

        // Bind parameters in filter-field order, matching filter_conditions
        if let Some(action) = filter.action {
            page_query = page_query.bind(action.as_str());
            count_query = count_query.bind(action.as_str());
        }
        if let Some(entity_type) = filter.entity_type {
            page_query = page_query.bind(entity_type.as_str());
            count_query = count_query.bind(entity_type.as_str());
        }
        if let Some(status) = filter.status {
            page_query = page_query.bind(status.as_str());
            count_query = count_query.bind(status.as_str());
        }
        if let Some(ref search) = filter.search {
            let pattern = like_pattern(search);
            page_query = page_query.bind(pattern.clone());
            count_query = count_query.bind(pattern);
        }
        if let Some(start_date) = filter.start_date {
            page_query = page_query.bind(start_date);
            count_query = count_query.bind(start_date);
        }
        if let Some(end_date) = filter.end_date {
            page_query = page_query.bind(end_date);
            count_query = count_query.bind(end_date);
        }

        page_query = page_query
            .bind(i64::from(page.limit()))
            .bind(page.offset() as i64);

        let rows = page_query.fetch_all(&self.pool).await?;
        let total_count = count_query.fetch_one(&self.pool).await?;

        let events = rows
            .into_iter()
            .map(AuditEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = events.len(), total = total_count, "Queried audit events");

        Ok(AuditPage {
            events,
            total_count: total_count.max(0) as u64,
        })
    }

    async fn stats(&self) -> AuditResult<AuditStats> {
        let (total_logs, failed_logs): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'FAILED')
            FROM audit_events
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let action_rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT action, COUNT(*) FROM audit_events GROUP BY action",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut action_counts = HashMap::new();
        for (action, count) in action_rows {
            let action: AuditAction = action.parse()?;
            action_counts.insert(action, count.max(0) as u64);
        }

        Ok(AuditStats::from_counts(
            total_logs.max(0) as u64,
            failed_logs.max(0) as u64,
            action_counts,
        ))
    }
}
