//! Shopflow Core Library
//!
//! Embeddable core for the shopflow shop-management system: the job-order
//! status workflow and the append-only audit trail.
//!
//! # Overview
//!
//! Two cooperating components:
//!
//! - **[`workflow::WorkflowEngine`]**: a pure decision function over the
//!   job-order status state machine. Given the current status, the requested
//!   status, and the actor's role, it decides whether the transition is
//!   allowed and, if not, why. No I/O, no side effects.
//! - **[`audit::AuditRecorder`]**: durable, append-only recording of every
//!   mutating action with success/failure outcome, plus filtered/paginated
//!   retrieval and aggregate statistics. Storage is pluggable via the
//!   [`audit::AuditStore`] trait, with Postgres ([`audit::PgAuditStore`])
//!   and in-memory ([`audit::MemoryAuditStore`]) backends.
//!
//! The intended call pattern for a host application (an HTTP layer, say):
//! ask the engine whether a transition is permitted, apply the mutation only
//! on `Allowed`, then record the attempt either way. Audit recording is
//! best-effort: a storage failure is logged and surfaced through
//! [`audit::AuditRecorder::record`]'s own result, never past it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shopflow_core::audit::{AuditRecorder, MemoryAuditStore, NewAuditEvent};
//! use shopflow_core::audit::{AuditAction, AuditStatus, EntityType};
//! use shopflow_core::workflow::{JobOrderStatus, Role, WorkflowEngine};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let engine = WorkflowEngine::standard();
//! let recorder = AuditRecorder::new(Arc::new(MemoryAuditStore::new()));
//!
//! let result = engine.evaluate(
//!     JobOrderStatus::Draft,
//!     JobOrderStatus::Estimated,
//!     Role::ServiceAdvisor,
//! );
//!
//! let event = NewAuditEvent::builder()
//!     .action(AuditAction::Update)
//!     .entity_type(EntityType::JobOrder)
//!     .entity_name("JO-1042")
//!     .status(if result.is_allowed() {
//!         AuditStatus::Success
//!     } else {
//!         AuditStatus::Failed
//!     })
//!     .build();
//!
//! // Best-effort: a failure here must not affect the job order itself.
//! let _ = recorder.record(event).await;
//! # }
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod workflow;

// Re-export commonly used types
pub use error::{AuditError, AuditResult};
