use crate::error::Severity;

use super::{ActivationStatus, EntityId, OperationalStatus};

/// Operational status of one entity, as announced to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub entity: EntityId,
    pub label: String,
    pub status: OperationalStatus,
}

/// Activation status of one entity, as announced to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationSnapshot {
    pub entity: EntityId,
    pub label: String,
    pub status: ActivationStatus,
}

/// Everything an entity ever hands to its owner for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    State(StateSnapshot),
    Activation(ActivationSnapshot),
}

impl Snapshot {
    pub fn entity(&self) -> EntityId {
        match self {
            Snapshot::State(s) => s.entity,
            Snapshot::Activation(a) => a.entity,
        }
    }
}

/// The collaborator an entity reports to.
///
/// The entity never locates or constructs its owner; it is injected at
/// construction. Both calls are fire-and-forget: the entity neither waits
/// for delivery nor looks at the outcome.
pub trait EntityOwner {
    /// Broadcast a snapshot to whatever consumers exist.
    fn dispatch(&self, snapshot: Snapshot);

    /// Diagnostic log line attributed to the owning task.
    fn log(&self, severity: Severity, message: &str);
}
