use crate::error::{CoreError, Domain, Result};

/// Coarse health of an entity, independent of its activation phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum OperationalState {
    /// Still initializing.
    #[default]
    Boot,
    Normal,
    /// Degraded but still working.
    Fault,
    /// Not working, recoverable.
    Error,
    /// Not working, needs outside intervention.
    Failure,
}

/// Stable numeric ids, matching the entity-state field on the wire.
impl OperationalState {
    pub const fn id(self) -> u8 {
        match self {
            OperationalState::Boot => 0,
            OperationalState::Normal => 1,
            OperationalState::Fault => 2,
            OperationalState::Error => 3,
            OperationalState::Failure => 4,
        }
    }

    pub fn from_id(id: u8) -> Result<Self> {
        ALL_OPERATIONAL_STATES
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| CoreError::unknown_id(Domain::Entity, "operational state", id))
    }

    pub const fn label(self) -> &'static str {
        match self {
            OperationalState::Boot => "Boot",
            OperationalState::Normal => "Normal",
            OperationalState::Fault => "Fault",
            OperationalState::Error => "Error",
            OperationalState::Failure => "Failure",
        }
    }
}

pub const ALL_OPERATIONAL_STATES: [OperationalState; 5] = [
    OperationalState::Boot,
    OperationalState::Normal,
    OperationalState::Fault,
    OperationalState::Error,
    OperationalState::Failure,
];

/// Coded status reports. Each code carries a fixed human-readable description.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StatusCode {
    Init,
    Idle,
    Active,
    Activating,
    Deactivating,
    Calibrating,
    Syncing,
    WaitingGpsFix,
    WaitingConvergence,
    MissingData,
    CommunicationError,
    IoError,
    InternalError,
    PowerDown,
    PowerUp,
}

impl StatusCode {
    pub const fn description(self) -> &'static str {
        match self {
            StatusCode::Init => "initializing",
            StatusCode::Idle => "idle",
            StatusCode::Active => "active",
            StatusCode::Activating => "activating",
            StatusCode::Deactivating => "deactivating",
            StatusCode::Calibrating => "calibrating",
            StatusCode::Syncing => "synchronizing",
            StatusCode::WaitingGpsFix => "waiting for GPS fix",
            StatusCode::WaitingConvergence => "waiting for convergence",
            StatusCode::MissingData => "missing data",
            StatusCode::CommunicationError => "communication error",
            StatusCode::IoError => "input/output error",
            StatusCode::InternalError => "internal error",
            StatusCode::PowerDown => "powered down",
            StatusCode::PowerUp => "powering up",
        }
    }
}

/// Operational status record: state, the code it was last reported with
/// (`None` for free-text reports) and the description observers see.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct OperationalStatus {
    pub state: OperationalState,
    pub code: Option<StatusCode>,
    pub description: String,
}
