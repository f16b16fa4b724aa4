//! Audit storage backends

use async_trait::async_trait;
use shopflow_common::types::Pagination;

use super::models::{AuditEvent, AuditFilter, AuditPage, AuditStats, NewAuditEvent};
use crate::error::AuditResult;

mod memory;
mod postgres;

pub use memory::MemoryAuditStore;
pub use postgres::PgAuditStore;

/// Durable storage for the append-only audit history
///
/// Implementations must make each `append` atomic: a call either persists
/// one complete event or reports a failure, never a partial record. Reads
/// may run concurrently with appends; they are not required to observe an
/// in-flight write.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append one immutable event and return it with its assigned `id`
    /// and `created_at`
    ///
    /// Plain insert semantics: no uniqueness constraint on any field, no
    /// upsert or merge. Every call produces a new record.
    async fn append(&self, event: NewAuditEvent) -> AuditResult<AuditEvent>;

    /// Filtered, paginated read over the history, newest first
    ///
    /// `filter.end_date` is compared as-is; callers wanting the
    /// end-of-day-inclusive behavior go through
    /// [`crate::audit::AuditRecorder::query`], which normalizes it.
    async fn query(&self, filter: &AuditFilter, page: &Pagination) -> AuditResult<AuditPage>;

    /// Aggregate statistics over the entire history, unfiltered
    async fn stats(&self) -> AuditResult<AuditStats>;
}
