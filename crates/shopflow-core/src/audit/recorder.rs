//! Audit recorder
//!
//! The write/read facade over an [`AuditStore`]. Recording is best-effort:
//! a storage failure is caught here, logged for operators, and surfaced
//! only through [`AuditRecorder::record`]'s own result. It must never
//! affect the outcome of the operation being audited — the caller's
//! primary action already happened by the time it is recorded.

use chrono::{DateTime, Utc};
use shopflow_common::types::Pagination;
use std::sync::Arc;
use tracing::error;

use super::models::{AuditEvent, AuditFilter, AuditPage, AuditStats, NewAuditEvent};
use super::store::AuditStore;
use crate::error::AuditResult;

/// Facade over the audit history
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Append one audit event, best-effort
    ///
    /// On storage failure the error is logged at `error!` and returned as
    /// the `Err` value; it is never raised past this call. Callers audit an
    /// action that has already run, so they ignore the result or at most
    /// inspect it:
    ///
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use shopflow_core::audit::*;
    /// # async fn run(recorder: AuditRecorder, event: NewAuditEvent) {
    /// let _ = recorder.record(event).await;
    /// # }
    /// ```
    pub async fn record(&self, event: NewAuditEvent) -> AuditResult<AuditEvent> {
        match self.store.append(event).await {
            Ok(record) => Ok(record),
            Err(err) => {
                error!(error = %err, "Failed to append audit event; continuing");
                Err(err)
            },
        }
    }

    /// Filtered, paginated read over the history, newest first
    ///
    /// `filter.end_date` is treated as a calendar-day bound: it is
    /// normalized to 23:59:59.999 of its day before comparison, so a bound
    /// of 2024-01-15 includes everything recorded on the 15th.
    pub async fn query(&self, filter: AuditFilter, page: Pagination) -> AuditResult<AuditPage> {
        let filter = AuditFilter {
            end_date: filter.end_date.map(end_of_day),
            ..filter
        };
        self.store.query(&filter, &page).await
    }

    /// Aggregate statistics over the entire history
    pub async fn stats(&self) -> AuditResult<AuditStats> {
        self.store.stats().await
    }
}

/// 23:59:59.999 of the timestamp's calendar day (UTC)
fn end_of_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| naive.and_utc())
        .unwrap_or(ts)
}
