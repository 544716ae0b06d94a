use super::{ActivationPhase, PendingRequest};

/// Caller-issued requests to change direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Request {
    Activate,
    Deactivate,
}

impl Request {
    /// The in-progress phase this request enters when granted.
    pub const fn in_progress(self) -> ActivationPhase {
        match self {
            Request::Activate => ActivationPhase::Activating,
            Request::Deactivate => ActivationPhase::Deactivating,
        }
    }
}

/// Completion reports from the capability that carried out a request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Completion {
    ActivationSucceeded,
    ActivationFailed,
    DeactivationSucceeded,
    DeactivationFailed,
}

impl Completion {
    pub const fn label(self) -> &'static str {
        match self {
            Completion::ActivationSucceeded => "succeed_activation",
            Completion::ActivationFailed => "fail_activation",
            Completion::DeactivationSucceeded => "succeed_deactivation",
            Completion::DeactivationFailed => "fail_deactivation",
        }
    }
}

/// How a request is answered from a given phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RequestOutcome {
    /// The request is granted and the entity enters this in-progress phase.
    Granted(ActivationPhase),
    /// Busy: the phase is unchanged and the request is remembered.
    Remembered(PendingRequest),
    /// Busy: the phase is unchanged and nothing is remembered.
    Ignored,
}

/// Answer `request` issued while in `current`.
///
/// Eligibility is deliberately asymmetric: activation is not remembered
/// from `Active`/`ActivationDone`, deactivation not from
/// `Inactive`/`DeactivationDone`.
pub fn begin(current: ActivationPhase, request: Request) -> RequestOutcome {
    use ActivationPhase::*;
    use Request::*;

    match (request, current) {
        (Activate, Inactive) => RequestOutcome::Granted(Activate.in_progress()),
        (Activate, Deactivating | DeactivationDone | DeactivationFailed | ActivationFailed)
        | (Activate, Activating) => RequestOutcome::Remembered(PendingRequest::WantActive),
        (Activate, Active | ActivationDone) => RequestOutcome::Ignored,

        (Deactivate, Active) => RequestOutcome::Granted(Deactivate.in_progress()),
        (Deactivate, DeactivationFailed | Activating | ActivationDone | ActivationFailed)
        | (Deactivate, Deactivating) => RequestOutcome::Remembered(PendingRequest::WantInactive),
        (Deactivate, Inactive | DeactivationDone) => RequestOutcome::Ignored,
    }
}

/// The two phases announced back-to-back for a completion:
/// `(outcome, settled)`.
///
/// Completions are not guarded by the current phase; the owning capability
/// is trusted to report only what it actually carried out.
pub const fn blip(completion: Completion) -> (ActivationPhase, ActivationPhase) {
    use ActivationPhase::*;

    match completion {
        Completion::ActivationSucceeded => (ActivationDone, Active),
        Completion::ActivationFailed => (ActivationFailed, Inactive),
        Completion::DeactivationSucceeded => (DeactivationDone, Inactive),
        Completion::DeactivationFailed => (DeactivationFailed, Active),
    }
}

/// The remembered request a completion replays once settled, if any.
pub const fn replayed_by(completion: Completion) -> Option<(PendingRequest, Request)> {
    match completion {
        Completion::ActivationSucceeded => Some((PendingRequest::WantInactive, Request::Deactivate)),
        Completion::DeactivationSucceeded => Some((PendingRequest::WantActive, Request::Activate)),
        Completion::ActivationFailed | Completion::DeactivationFailed => None,
    }
}

/// Requests granted from `phase` (empty while busy).
pub fn available_requests(phase: ActivationPhase) -> &'static [Request] {
    match phase {
        ActivationPhase::Inactive => &[Request::Activate],
        ActivationPhase::Active => &[Request::Deactivate],
        _ => &[],
    }
}

/// The in-progress phase a completion is expected to conclude.
pub const fn concludes(completion: Completion) -> ActivationPhase {
    match completion {
        Completion::ActivationSucceeded | Completion::ActivationFailed => {
            ActivationPhase::Activating
        }
        Completion::DeactivationSucceeded | Completion::DeactivationFailed => {
            ActivationPhase::Deactivating
        }
    }
}
