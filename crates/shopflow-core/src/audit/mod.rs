//! Audit trail
//!
//! Append-only recording of every mutating action in the system, with
//! success/failure outcome, plus filtered/paginated retrieval and
//! aggregate statistics for the admin audit view.
//!
//! # Contract
//!
//! - Events are created exactly once and never mutated or deleted here;
//!   retention is an operational concern outside this crate.
//! - Recording is **best-effort**: the host calls
//!   [`AuditRecorder::record`] after its primary operation has already
//!   run, and a storage failure must never roll back or block that
//!   operation. Failures are logged and reported only through `record`'s
//!   own result.
//! - `actor_id` is nullable to cover pre-authentication failures such as a
//!   failed login.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shopflow_core::audit::{
//!     AuditAction, AuditRecorder, EntityType, MemoryAuditStore, NewAuditEvent,
//! };
//!
//! # async fn example() {
//! let recorder = AuditRecorder::new(Arc::new(MemoryAuditStore::new()));
//!
//! let event = NewAuditEvent::builder()
//!     .action(AuditAction::Login)
//!     .entity_type(EntityType::Authentication)
//!     .failed("invalid credentials")
//!     .build();
//!
//! let _ = recorder.record(event).await;
//! # }
//! ```

mod models;
mod recorder;
mod store;

pub use models::{
    AuditAction, AuditEvent, AuditFilter, AuditPage, AuditStats, AuditStatus, EntityType,
    NewAuditEvent, NewAuditEventBuilder,
};
pub use recorder::AuditRecorder;
pub use store::{AuditStore, MemoryAuditStore, PgAuditStore};
