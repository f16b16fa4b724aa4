//! Job-order status workflow
//!
//! A table-driven finite state machine over the job-order lifecycle
//! (`DRAFT` through `RELEASED`), gated by role permissions. The engine is a
//! pure decision function: it owns no storage and performs no I/O, so it is
//! safe to share and call from any number of tasks concurrently.
//!
//! # Permission model
//!
//! The transition table defines the universe of legal moves; a role's
//! permitted-target set is a further restriction on top. The table is
//! checked first, so a request that no role could ever make is reported as
//! [`DenialReason::UnknownTransition`] rather than
//! [`DenialReason::RoleNotPermitted`].
//!
//! # Example
//!
//! ```
//! use shopflow_core::workflow::{JobOrderStatus, Role, WorkflowEngine};
//!
//! let engine = WorkflowEngine::standard();
//! let result = engine.evaluate(
//!     JobOrderStatus::QualityCheck,
//!     JobOrderStatus::InProgress,
//!     Role::BranchManager,
//! );
//! assert!(result.is_allowed());
//! ```

mod engine;
mod types;

pub use engine::{WorkflowConfig, WorkflowEngine};
pub use types::{DenialReason, JobOrderStatus, Role, TransitionRequest, TransitionResult};
