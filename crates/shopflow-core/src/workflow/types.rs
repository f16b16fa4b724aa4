//! Workflow data models

use serde::{Deserialize, Serialize};
use shopflow_common::ShopflowError;
use uuid::Uuid;

/// Lifecycle status of a job order
///
/// Storage spelling is `SCREAMING_SNAKE_CASE` (`IN_PROGRESS`), matching the
/// persisted job-order history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobOrderStatus {
    Draft,
    Estimated,
    Approved,
    InProgress,
    QualityCheck,
    Billed,
    Released,
}

impl JobOrderStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [JobOrderStatus; 7] = [
        Self::Draft,
        Self::Estimated,
        Self::Approved,
        Self::InProgress,
        Self::QualityCheck,
        Self::Billed,
        Self::Released,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Estimated => "ESTIMATED",
            Self::Approved => "APPROVED",
            Self::InProgress => "IN_PROGRESS",
            Self::QualityCheck => "QUALITY_CHECK",
            Self::Billed => "BILLED",
            Self::Released => "RELEASED",
        }
    }
}

impl std::fmt::Display for JobOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobOrderStatus {
    type Err = ShopflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "ESTIMATED" => Ok(Self::Estimated),
            "APPROVED" => Ok(Self::Approved),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "QUALITY_CHECK" => Ok(Self::QualityCheck),
            "BILLED" => Ok(Self::Billed),
            "RELEASED" => Ok(Self::Released),
            _ => Err(ShopflowError::unrecognized("job order status", s)),
        }
    }
}

/// Access-level category assigned to an actor
///
/// The role constrains which statuses the actor may set a job order to.
/// `Executive` has an empty permitted set and is read-only by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    BranchManager,
    ServiceAdvisor,
    Mechanic,
    InventoryOfficer,
    Executive,
}

impl Role {
    /// All roles
    pub const ALL: [Role; 6] = [
        Self::Admin,
        Self::BranchManager,
        Self::ServiceAdvisor,
        Self::Mechanic,
        Self::InventoryOfficer,
        Self::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::BranchManager => "branch_manager",
            Self::ServiceAdvisor => "service_advisor",
            Self::Mechanic => "mechanic",
            Self::InventoryOfficer => "inventory_officer",
            Self::Executive => "executive",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ShopflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "branch_manager" => Ok(Self::BranchManager),
            "service_advisor" => Ok(Self::ServiceAdvisor),
            "mechanic" => Ok(Self::Mechanic),
            "inventory_officer" => Ok(Self::InventoryOfficer),
            "executive" => Ok(Self::Executive),
            _ => Err(ShopflowError::unrecognized("role", s)),
        }
    }
}

/// A proposed status transition, constructed per call and never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Job order the transition applies to
    pub job_order_id: Uuid,
    /// Actor proposing the transition
    pub actor_id: Uuid,
    /// Actor's role
    pub actor_role: Role,
    /// Status the job order is currently in
    pub current_status: JobOrderStatus,
    /// Status the actor wants to move it to
    pub requested_status: JobOrderStatus,
}

/// Why a transition was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    /// No edge from the current status to the requested status in the
    /// transition table
    UnknownTransition {
        from: JobOrderStatus,
        to: JobOrderStatus,
    },
    /// The edge exists, but the actor's role may not set the requested
    /// status
    RoleNotPermitted {
        role: Role,
        requested: JobOrderStatus,
    },
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTransition { from, to } => {
                write!(f, "job orders cannot move from {from} to {to}")
            },
            Self::RoleNotPermitted { role, requested } => {
                write!(f, "role {role} is not permitted to set status {requested}")
            },
        }
    }
}

/// Outcome of a workflow evaluation
///
/// A denial is an expected business outcome, not an error; it is returned
/// as a value and never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionResult {
    /// The transition is valid; the caller may apply the new status
    Allowed { new_status: JobOrderStatus },
    /// The transition was rejected
    Denied { reason: DenialReason },
}

impl TransitionResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// The status to apply, if the transition was allowed
    pub fn new_status(&self) -> Option<JobOrderStatus> {
        match self {
            Self::Allowed { new_status } => Some(*new_status),
            Self::Denied { .. } => None,
        }
    }

    /// The denial reason, if the transition was rejected
    pub fn denial(&self) -> Option<DenialReason> {
        match self {
            Self::Allowed { .. } => None,
            Self::Denied { reason } => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(JobOrderStatus::Draft.as_str(), "DRAFT");
        assert_eq!(JobOrderStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(JobOrderStatus::QualityCheck.as_str(), "QUALITY_CHECK");
    }

    #[test]
    fn test_status_round_trip() {
        for status in JobOrderStatus::ALL {
            assert_eq!(status.as_str().parse::<JobOrderStatus>().unwrap(), status);
        }
        assert!("SCRAPPED".parse::<JobOrderStatus>().is_err());
    }

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&JobOrderStatus::QualityCheck).unwrap();
        assert_eq!(json, r#""QUALITY_CHECK""#);

        let status: JobOrderStatus = serde_json::from_str(r#""BILLED""#).unwrap();
        assert_eq!(status, JobOrderStatus::Billed);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::BranchManager).unwrap();
        assert_eq!(json, r#""branch_manager""#);

        let role: Role = serde_json::from_str(r#""inventory_officer""#).unwrap();
        assert_eq!(role, Role::InventoryOfficer);
    }

    #[test]
    fn test_denial_reason_display() {
        let reason = DenialReason::UnknownTransition {
            from: JobOrderStatus::Draft,
            to: JobOrderStatus::Billed,
        };
        assert_eq!(
            reason.to_string(),
            "job orders cannot move from DRAFT to BILLED"
        );

        let reason = DenialReason::RoleNotPermitted {
            role: Role::ServiceAdvisor,
            requested: JobOrderStatus::Approved,
        };
        assert_eq!(
            reason.to_string(),
            "role service_advisor is not permitted to set status APPROVED"
        );
    }
}
