//! Audit data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use shopflow_common::ShopflowError;
use std::collections::HashMap;
use uuid::Uuid;

/// Action recorded in an audit event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Login,
    Create,
    Update,
    Delete,
    Export,
    Import,
    PasswordChange,
}

impl AuditAction {
    /// All actions
    pub const ALL: [AuditAction; 7] = [
        Self::Login,
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::Export,
        Self::Import,
        Self::PasswordChange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Export => "EXPORT",
            Self::Import => "IMPORT",
            Self::PasswordChange => "PASSWORD_CHANGE",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuditAction {
    type Err = ShopflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOGIN" => Ok(Self::Login),
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "EXPORT" => Ok(Self::Export),
            "IMPORT" => Ok(Self::Import),
            "PASSWORD_CHANGE" => Ok(Self::PasswordChange),
            _ => Err(ShopflowError::unrecognized("audit action", s)),
        }
    }
}

/// Entity types that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Authentication,
    User,
    Branch,
    JobOrder,
    Inventory,
    Customer,
    Report,
    SystemConfig,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "AUTHENTICATION",
            Self::User => "USER",
            Self::Branch => "BRANCH",
            Self::JobOrder => "JOB_ORDER",
            Self::Inventory => "INVENTORY",
            Self::Customer => "CUSTOMER",
            Self::Report => "REPORT",
            Self::SystemConfig => "SYSTEM_CONFIG",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = ShopflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AUTHENTICATION" => Ok(Self::Authentication),
            "USER" => Ok(Self::User),
            "BRANCH" => Ok(Self::Branch),
            "JOB_ORDER" => Ok(Self::JobOrder),
            "INVENTORY" => Ok(Self::Inventory),
            "CUSTOMER" => Ok(Self::Customer),
            "REPORT" => Ok(Self::Report),
            "SYSTEM_CONFIG" => Ok(Self::SystemConfig),
            _ => Err(ShopflowError::unrecognized("entity type", s)),
        }
    }
}

/// Outcome of the audited action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Success,
    Failed,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuditStatus {
    type Err = ShopflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            _ => Err(ShopflowError::unrecognized("audit status", s)),
        }
    }
}

/// Audit event as stored
///
/// Append-only: events are created exactly once and never mutated or
/// deleted by this core. `id` and `created_at` are assigned by the store
/// at append time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique identifier for the event
    pub id: Uuid,
    /// Actor who performed the action; `None` for pre-authentication
    /// failures such as a failed login
    pub actor_id: Option<Uuid>,
    /// Action performed
    pub action: AuditAction,
    /// Type of entity affected
    pub entity_type: EntityType,
    /// Identifier of the affected entity, as issued by the host system
    pub entity_id: Option<String>,
    /// Display label for the affected entity
    pub entity_name: Option<String>,
    /// Arbitrary structured payload describing the action
    pub details: Option<JsonValue>,
    /// Whether the audited action succeeded
    pub status: AuditStatus,
    /// Failure detail; populated on FAILED events (not enforced — a FAILED
    /// event without a message is accepted, matching the recorded history)
    pub error_message: Option<String>,
    /// Timestamp assigned at append time, immutable
    pub created_at: DateTime<Utc>,
}

/// Input for recording an audit event
///
/// All [`AuditEvent`] fields except `id` and `created_at`, which the store
/// assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuditEvent {
    pub actor_id: Option<Uuid>,
    pub action: AuditAction,
    pub entity_type: EntityType,
    pub entity_id: Option<String>,
    pub entity_name: Option<String>,
    pub details: Option<JsonValue>,
    pub status: AuditStatus,
    pub error_message: Option<String>,
}

impl NewAuditEvent {
    /// Create a builder for constructing audit events
    pub fn builder() -> NewAuditEventBuilder {
        NewAuditEventBuilder::default()
    }
}

/// Builder for audit events
#[derive(Debug, Clone, Default)]
pub struct NewAuditEventBuilder {
    actor_id: Option<Uuid>,
    action: Option<AuditAction>,
    entity_type: Option<EntityType>,
    entity_id: Option<String>,
    entity_name: Option<String>,
    details: Option<JsonValue>,
    status: Option<AuditStatus>,
    error_message: Option<String>,
}

impl NewAuditEventBuilder {
    pub fn actor_id(mut self, actor_id: Uuid) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    pub fn action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn entity_name(mut self, entity_name: impl Into<String>) -> Self {
        self.entity_name = Some(entity_name.into());
        self
    }

    pub fn details(mut self, details: JsonValue) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status(mut self, status: AuditStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }

    /// Mark the event FAILED with the given failure detail
    pub fn failed(mut self, error_message: impl Into<String>) -> Self {
        self.status = Some(AuditStatus::Failed);
        self.error_message = Some(error_message.into());
        self
    }

    /// Build the event
    ///
    /// # Panics
    /// Panics if `action` or `entity_type` are not set. Use `try_build()`
    /// for fallible construction.
    pub fn build(self) -> NewAuditEvent {
        self.try_build()
            .expect("NewAuditEventBuilder: action and entity_type are required")
    }

    /// Try to build the event, returning an error if required fields are
    /// missing
    ///
    /// `status` defaults to SUCCESS when unset.
    pub fn try_build(self) -> Result<NewAuditEvent, &'static str> {
        let action = self.action.ok_or("action is required")?;
        let entity_type = self.entity_type.ok_or("entity_type is required")?;

        Ok(NewAuditEvent {
            actor_id: self.actor_id,
            action,
            entity_type,
            entity_id: self.entity_id,
            entity_name: self.entity_name,
            details: self.details,
            status: self.status.unwrap_or(AuditStatus::Success),
            error_message: self.error_message,
        })
    }
}

/// Filters for querying the audit history
///
/// All filters are optional and implicitly ANDed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditFilter {
    /// Exact match on action
    pub action: Option<AuditAction>,
    /// Exact match on entity type
    pub entity_type: Option<EntityType>,
    /// Exact match on outcome
    pub status: Option<AuditStatus>,
    /// Case-insensitive substring match against `entity_name` or
    /// `error_message`
    pub search: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`; normalized to 23:59:59.999
    /// of its calendar day before comparison
    pub end_date: Option<DateTime<Utc>>,
}

/// One page of audit history
#[derive(Debug, Clone, Serialize)]
pub struct AuditPage {
    /// Matching events, newest first
    pub events: Vec<AuditEvent>,
    /// Size of the filtered set before pagination
    pub total_count: u64,
}

/// Aggregate statistics over the entire audit history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditStats {
    pub total_logs: u64,
    pub failed_logs: u64,
    /// Count of stored events per action, unfiltered
    pub action_counts: HashMap<AuditAction, u64>,
    /// Percentage of non-failed events, rounded to 2 decimal places;
    /// exactly 100 for an empty history
    pub success_rate: f64,
}

impl AuditStats {
    /// Build statistics from raw counts
    ///
    /// An empty history reports a success rate of exactly 100, not a
    /// division error.
    pub fn from_counts(
        total_logs: u64,
        failed_logs: u64,
        action_counts: HashMap<AuditAction, u64>,
    ) -> Self {
        let success_rate = if total_logs == 0 {
            100.0
        } else {
            let rate = (total_logs - failed_logs) as f64 / total_logs as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        };

        Self {
            total_logs,
            failed_logs,
            action_counts,
            success_rate,
        }
    }
}
