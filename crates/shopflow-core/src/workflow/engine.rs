//! Workflow decision engine

use std::collections::HashMap;
use std::sync::Arc;

use super::types::{DenialReason, JobOrderStatus, Role, TransitionRequest, TransitionResult};

use JobOrderStatus::*;

/// Immutable workflow configuration: the transition table and the
/// role-permitted-target table
///
/// Built once at startup and shared by reference; there is no runtime
/// mutation path. [`WorkflowConfig::default`] yields the standard shopflow
/// tables.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    transitions: HashMap<JobOrderStatus, Vec<JobOrderStatus>>,
    role_targets: HashMap<Role, Vec<JobOrderStatus>>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let transitions = HashMap::from([
            (Draft, vec![Estimated]),
            (Estimated, vec![Approved, Draft]),
            (Approved, vec![InProgress]),
            (InProgress, vec![QualityCheck]),
            (QualityCheck, vec![Billed, InProgress]),
            (Billed, vec![Released]),
            // Terminal: no outgoing edges, not even for admin
            (Released, vec![]),
        ]);

        let role_targets = HashMap::from([
            (Role::Admin, JobOrderStatus::ALL.to_vec()),
            // IN_PROGRESS included so a branch manager can send a job back
            // from quality check (the QC-rejection path)
            (Role::BranchManager, vec![Approved, InProgress, QualityCheck, Billed, Released]),
            (Role::ServiceAdvisor, vec![Draft, Estimated]),
            (Role::Mechanic, vec![InProgress, QualityCheck]),
            (Role::InventoryOfficer, vec![Billed]),
            // Read-only by construction
            (Role::Executive, vec![]),
        ]);

        Self {
            transitions,
            role_targets,
        }
    }
}

impl WorkflowConfig {
    /// Statuses reachable from `status` in one transition
    pub fn targets_of(&self, status: JobOrderStatus) -> &[JobOrderStatus] {
        self.transitions.get(&status).map_or(&[], Vec::as_slice)
    }

    /// Statuses `role` is permitted to set a job order to
    pub fn permitted_targets(&self, role: Role) -> &[JobOrderStatus] {
        self.role_targets.get(&role).map_or(&[], Vec::as_slice)
    }
}

/// Pure decision function over the job-order state machine
///
/// Cheap to clone; clones share the same configuration.
#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    config: Arc<WorkflowConfig>,
}

impl WorkflowEngine {
    /// Create an engine over a shared configuration
    pub fn new(config: Arc<WorkflowConfig>) -> Self {
        Self { config }
    }

    /// Create an engine with the standard shopflow tables
    pub fn standard() -> Self {
        Self::new(Arc::new(WorkflowConfig::default()))
    }

    /// Decide whether moving a job order from `current` to `requested` is
    /// valid for an actor with `role`
    ///
    /// The transition table is consulted before the role table, so a
    /// request for an edge that does not exist is reported as
    /// [`DenialReason::UnknownTransition`] even when the role would have
    /// been permitted to set the requested status.
    pub fn evaluate(
        &self,
        current: JobOrderStatus,
        requested: JobOrderStatus,
        role: Role,
    ) -> TransitionResult {
        if !self.config.targets_of(current).contains(&requested) {
            return TransitionResult::Denied {
                reason: DenialReason::UnknownTransition {
                    from: current,
                    to: requested,
                },
            };
        }

        if !self.config.permitted_targets(role).contains(&requested) {
            return TransitionResult::Denied {
                reason: DenialReason::RoleNotPermitted {
                    role,
                    requested,
                },
            };
        }

        TransitionResult::Allowed {
            new_status: requested,
        }
    }

    /// Evaluate a [`TransitionRequest`]
    pub fn evaluate_request(&self, request: &TransitionRequest) -> TransitionResult {
        self.evaluate(
            request.current_status,
            request.requested_status,
            request.actor_role,
        )
    }

    /// Read-only view of the configured transition targets for `status`
    ///
    /// Host applications use this to populate the status choices offered
    /// for a job order in its current state.
    pub fn allowed_targets(&self, status: JobOrderStatus) -> &[JobOrderStatus] {
        self.config.targets_of(status)
    }

    /// Read-only view of the statuses `role` may set
    pub fn permitted_targets(&self, role: Role) -> &[JobOrderStatus] {
        self.config.permitted_targets(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_forward_path_for_admin() {
        let engine = WorkflowEngine::standard();
        let path = [Draft, Estimated, Approved, InProgress, QualityCheck, Billed, Released];

        for pair in path.windows(2) {
            let result = engine.evaluate(pair[0], pair[1], Role::Admin);
            assert_eq!(
                result,
                TransitionResult::Allowed { new_status: pair[1] },
                "expected {} -> {} to be allowed for admin",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_every_pair_evaluates_to_exactly_one_outcome() {
        // The decision function is total over well-formed inputs: every
        // (current, requested, role) triple yields Allowed or a Denied
        // variant, never a panic.
        let engine = WorkflowEngine::standard();

        for current in JobOrderStatus::ALL {
            for requested in JobOrderStatus::ALL {
                for role in Role::ALL {
                    let result = engine.evaluate(current, requested, role);
                    match result {
                        TransitionResult::Allowed { new_status } => {
                            assert_eq!(new_status, requested);
                        },
                        TransitionResult::Denied { .. } => {},
                    }
                }
            }
        }
    }

    #[test]
    fn test_released_is_terminal_even_for_admin() {
        let engine = WorkflowEngine::standard();

        for requested in JobOrderStatus::ALL {
            let result = engine.evaluate(Released, requested, Role::Admin);
            assert_eq!(
                result.denial(),
                Some(DenialReason::UnknownTransition {
                    from: Released,
                    to: requested,
                })
            );
        }
    }

    #[test]
    fn test_table_checked_before_role() {
        // DRAFT -> BILLED is not an edge; admin is permitted to set BILLED,
        // but the denial must still name the missing edge.
        let engine = WorkflowEngine::standard();
        let result = engine.evaluate(Draft, Billed, Role::Admin);

        assert_eq!(
            result.denial(),
            Some(DenialReason::UnknownTransition {
                from: Draft,
                to: Billed,
            })
        );
    }

    #[test]
    fn test_role_restriction_on_existing_edge() {
        let engine = WorkflowEngine::standard();
        let result = engine.evaluate(Estimated, Approved, Role::ServiceAdvisor);

        assert_eq!(
            result.denial(),
            Some(DenialReason::RoleNotPermitted {
                role: Role::ServiceAdvisor,
                requested: Approved,
            })
        );
    }

    #[test]
    fn test_backward_edges() {
        let engine = WorkflowEngine::standard();

        assert_eq!(
            engine.evaluate(QualityCheck, InProgress, Role::BranchManager),
            TransitionResult::Allowed { new_status: InProgress }
        );
        assert_eq!(
            engine.evaluate(Estimated, Draft, Role::ServiceAdvisor),
            TransitionResult::Allowed { new_status: Draft }
        );
    }

    #[test]
    fn test_executive_is_read_only() {
        let engine = WorkflowEngine::standard();
        assert!(engine.permitted_targets(Role::Executive).is_empty());

        for current in JobOrderStatus::ALL {
            for requested in JobOrderStatus::ALL {
                assert!(!engine.evaluate(current, requested, Role::Executive).is_allowed());
            }
        }
    }

    #[test]
    fn test_evaluate_request() {
        let engine = WorkflowEngine::standard();
        let request = TransitionRequest {
            job_order_id: Uuid::new_v4(),
            actor_id: Uuid::new_v4(),
            actor_role: Role::Mechanic,
            current_status: Approved,
            requested_status: InProgress,
        };

        assert_eq!(
            engine.evaluate_request(&request),
            TransitionResult::Allowed { new_status: InProgress }
        );
    }

    #[test]
    fn test_allowed_targets_view() {
        let engine = WorkflowEngine::standard();

        assert_eq!(engine.allowed_targets(Estimated), &[Approved, Draft]);
        assert!(engine.allowed_targets(Released).is_empty());
        assert_eq!(engine.permitted_targets(Role::InventoryOfficer), &[Billed]);
    }
}
