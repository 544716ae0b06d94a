use crate::error::{CoreError, Domain, Result};

/// Position of an entity in the activate/deactivate protocol.
///
/// Settled phases:
/// - Inactive, Active
///
/// In-progress phases:
/// - Activating, Deactivating
///
/// Outcome phases (only ever observed as the first half of a blip):
/// - ActivationDone, ActivationFailed, DeactivationDone, DeactivationFailed
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ActivationPhase {
    #[default]
    Inactive,
    Active,
    Activating,
    ActivationDone,
    ActivationFailed,
    Deactivating,
    DeactivationDone,
    DeactivationFailed,
}

/// Stable numeric ids, matching the activation-state field on the wire.
impl ActivationPhase {
    pub const fn id(self) -> u8 {
        match self {
            ActivationPhase::Inactive => 0,
            ActivationPhase::Active => 1,
            ActivationPhase::Activating => 2,
            ActivationPhase::ActivationDone => 3,
            ActivationPhase::ActivationFailed => 4,
            ActivationPhase::Deactivating => 5,
            ActivationPhase::DeactivationDone => 6,
            ActivationPhase::DeactivationFailed => 7,
        }
    }

    pub fn from_id(id: u8) -> Result<Self> {
        ALL_PHASES
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| CoreError::unknown_id(Domain::Activation, "activation phase", id))
    }

    /// True for resting phases the coordinator settles in.
    pub const fn is_settled(self) -> bool {
        matches!(self, ActivationPhase::Inactive | ActivationPhase::Active)
    }

    /// True while a request is in flight and awaiting a completion call.
    pub const fn is_in_progress(self) -> bool {
        matches!(
            self,
            ActivationPhase::Activating | ActivationPhase::Deactivating
        )
    }

    /// True for the transient success/failure phases of a blip.
    pub const fn is_outcome(self) -> bool {
        matches!(
            self,
            ActivationPhase::ActivationDone
                | ActivationPhase::ActivationFailed
                | ActivationPhase::DeactivationDone
                | ActivationPhase::DeactivationFailed
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActivationPhase::Inactive => "Inactive",
            ActivationPhase::Active => "Active",
            ActivationPhase::Activating => "Activating",
            ActivationPhase::ActivationDone => "ActivationDone",
            ActivationPhase::ActivationFailed => "ActivationFailed",
            ActivationPhase::Deactivating => "Deactivating",
            ActivationPhase::DeactivationDone => "DeactivationDone",
            ActivationPhase::DeactivationFailed => "DeactivationFailed",
        }
    }
}

/// Canonical list of all activation phases.
pub const ALL_PHASES: [ActivationPhase; 8] = [
    ActivationPhase::Inactive,
    ActivationPhase::Active,
    ActivationPhase::Activating,
    ActivationPhase::ActivationDone,
    ActivationPhase::ActivationFailed,
    ActivationPhase::Deactivating,
    ActivationPhase::DeactivationDone,
    ActivationPhase::DeactivationFailed,
];

/// Activation status record. `error` is non-empty only in a failure phase.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ActivationStatus {
    pub phase: ActivationPhase,
    pub error: String,
}

/// Single remembered request to reverse direction once the current
/// operation completes. A later request overwrites an earlier one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PendingRequest {
    #[default]
    None,
    WantActive,
    WantInactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phase_has_exactly_one_category() {
        for phase in ALL_PHASES {
            let categories = [phase.is_settled(), phase.is_in_progress(), phase.is_outcome()];
            assert_eq!(
                categories.iter().filter(|c| **c).count(),
                1,
                "{phase:?} must be in exactly one category"
            );
        }
    }

    #[test]
    fn ids_are_unique_and_map_back() {
        for phase in ALL_PHASES {
            assert_eq!(ActivationPhase::from_id(phase.id()).unwrap(), phase);
        }
        assert!(ActivationPhase::from_id(8).is_err());
    }
}
