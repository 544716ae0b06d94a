use std::sync::Arc;

use crate::error::Severity;

use super::engine::{begin, blip, replayed_by, Completion, Request, RequestOutcome};
use super::{
    ActivationPhase, ActivationSnapshot, ActivationStatus, EntityOwner, Identity,
    OperationalState, OperationalStatus, PendingRequest, Snapshot, StateSnapshot, StatusCode,
};

/// Owner handle shared between the task and all of its entities.
pub type SharedOwner = Arc<dyn EntityOwner + Send + Sync>;

/// A named capability owned by a control task.
///
/// Responsibilities:
/// - Track operational status and announce it when the state value changes
/// - Drive the activation protocol and announce every phase write
/// - Remember at most one opposite request while busy and replay it on completion
///
/// Not internally synchronized: callers serialize access (one writer, the
/// owning task).
pub struct Entity {
    label: String,
    identity: Identity,
    owner: SharedOwner,
    status: OperationalStatus,
    activation: ActivationStatus,
    pending: PendingRequest,
}

impl Entity {
    /// Create an unassigned entity. It dispatches nothing until it is given an id.
    pub fn new(label: impl Into<String>, owner: SharedOwner) -> Self {
        Self::with_identity(label, Identity::Unassigned, owner)
    }

    pub fn with_identity(label: impl Into<String>, identity: Identity, owner: SharedOwner) -> Self {
        Self {
            label: label.into(),
            identity,
            owner,
            status: OperationalStatus::default(),
            activation: ActivationStatus::default(),
            pending: PendingRequest::None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Assign (or withdraw) the addressable id. Nothing is dispatched.
    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = identity;
    }

    pub fn status(&self) -> &OperationalStatus {
        &self.status
    }

    pub fn activation(&self) -> &ActivationStatus {
        &self.activation
    }

    pub fn phase(&self) -> ActivationPhase {
        self.activation.phase
    }

    pub fn pending_request(&self) -> PendingRequest {
        self.pending
    }

    /// True only in the settled `Active` phase.
    pub fn is_active(&self) -> bool {
        self.activation.phase == ActivationPhase::Active
    }

    // ---------------- Operational state ----------------

    /// Record a coded state report.
    ///
    /// The description is refreshed only when the code changes, and observers
    /// are notified only when the state value changes.
    pub fn set_state(&mut self, state: OperationalState, code: StatusCode) {
        let changed = state != self.status.state;

        self.status.state = state;
        if self.status.code != Some(code) {
            self.status.description = code.description().to_string();
        }
        self.status.code = Some(code);

        if changed {
            self.report_state();
        }
    }

    /// Record a free-text state report. Clears any stored status code.
    pub fn set_state_message(&mut self, state: OperationalState, message: impl Into<String>) {
        let changed = state != self.status.state;

        self.status.state = state;
        self.status.description = message.into();
        self.status.code = None;

        if changed {
            self.report_state();
        }
    }

    /// Announce the current operational status, changed or not.
    pub fn report_state(&self) {
        if let Some(entity) = self.identity.id() {
            self.owner.dispatch(Snapshot::State(StateSnapshot {
                entity,
                label: self.label.clone(),
                status: self.status.clone(),
            }));
        }
    }

    /// Announce the current activation status, changed or not.
    pub fn report_activation_state(&self) {
        if let Some(entity) = self.identity.id() {
            self.owner.dispatch(Snapshot::Activation(ActivationSnapshot {
                entity,
                label: self.label.clone(),
                status: self.activation.clone(),
            }));
        }
    }

    // ---------------- Activation protocol ----------------

    /// Ask to become active. Granted only from `Inactive`; otherwise the
    /// current phase is re-announced and the request may be remembered.
    pub fn request_activation(&mut self) {
        self.request(Request::Activate);
    }

    /// Ask to become inactive. Granted only from `Active`; otherwise the
    /// current phase is re-announced and the request may be remembered.
    pub fn request_deactivation(&mut self) {
        self.request(Request::Deactivate);
    }

    /// Blip `ActivationFailed` (carrying `reason`), then settle in `Inactive`.
    pub fn fail_activation(&mut self, reason: impl Into<String>) {
        self.fail(Completion::ActivationFailed, reason.into());
    }

    /// Blip `ActivationDone`, settle in `Active`, then honor a remembered
    /// deactivation request.
    pub fn succeed_activation(&mut self) {
        self.complete(Completion::ActivationSucceeded);
    }

    /// Blip `DeactivationFailed` (carrying `reason`), then settle back in `Active`.
    pub fn fail_deactivation(&mut self, reason: impl Into<String>) {
        self.fail(Completion::DeactivationFailed, reason.into());
    }

    /// Blip `DeactivationDone`, settle in `Inactive`, then honor a remembered
    /// activation request.
    pub fn succeed_deactivation(&mut self) {
        self.complete(Completion::DeactivationSucceeded);
    }

    fn request(&mut self, request: Request) {
        let current = self.activation.phase;

        match begin(current, request) {
            RequestOutcome::Granted(next) => {
                self.pending = PendingRequest::None;
                self.enter(next);
            }
            RequestOutcome::Remembered(pending) => {
                self.spew(busy_message(request));
                if current == request.in_progress() {
                    self.spew(in_progress_message(request));
                } else {
                    self.spew(saving_message(request));
                }
                self.pending = pending;
                self.report_activation_state();
            }
            RequestOutcome::Ignored => {
                self.spew(busy_message(request));
                self.report_activation_state();
            }
        }
    }

    fn fail(&mut self, completion: Completion, reason: String) {
        self.owner.log(
            Severity::Warn,
            &format!("{}: {reason}", completion.label()),
        );
        self.activation.error = reason;
        self.complete(completion);
    }

    fn complete(&mut self, completion: Completion) {
        let (outcome, settled) = blip(completion);

        self.enter(outcome);
        self.activation.error.clear();
        self.enter(settled);

        if let Some((wanted, request)) = replayed_by(completion) {
            if self.pending == wanted {
                self.request(request);
            }
        }
    }

    // Every phase write is followed by exactly one announcement.
    fn enter(&mut self, phase: ActivationPhase) {
        self.activation.phase = phase;
        self.report_activation_state();
    }

    fn spew(&self, message: &str) {
        self.owner.log(Severity::Trace, message);
    }
}

const fn busy_message(request: Request) -> &'static str {
    match request {
        Request::Activate => "entity is not inactive",
        Request::Deactivate => "entity is not active",
    }
}

const fn in_progress_message(request: Request) -> &'static str {
    match request {
        Request::Activate => "activation is in progress",
        Request::Deactivate => "deactivation is in progress",
    }
}

const fn saving_message(request: Request) -> &'static str {
    match request {
        Request::Activate => "saving activation request",
        Request::Deactivate => "saving deactivation request",
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("label", &self.label)
            .field("identity", &self.identity)
            .field("status", &self.status)
            .field("activation", &self.activation)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// Unit tests for the entity coordinator.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingOwner {
        snapshots: Mutex<Vec<Snapshot>>,
        logs: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingOwner {
        fn phases(&self) -> Vec<ActivationPhase> {
            self.snapshots
                .lock()
                .unwrap()
                .iter()
                .filter_map(|s| match s {
                    Snapshot::Activation(a) => Some(a.status.phase),
                    Snapshot::State(_) => None,
                })
                .collect()
        }

        fn state_count(&self) -> usize {
            self.snapshots
                .lock()
                .unwrap()
                .iter()
                .filter(|s| matches!(s, Snapshot::State(_)))
                .count()
        }

        fn clear(&self) {
            self.snapshots.lock().unwrap().clear();
            self.logs.lock().unwrap().clear();
        }

        fn logged(&self, message: &str) -> bool {
            self.logs.lock().unwrap().iter().any(|(_, m)| m == message)
        }
    }

    impl EntityOwner for RecordingOwner {
        fn dispatch(&self, snapshot: Snapshot) {
            self.snapshots.lock().unwrap().push(snapshot);
        }
        fn log(&self, severity: Severity, message: &str) {
            self.logs.lock().unwrap().push((severity, message.to_string()));
        }
    }

    fn entity() -> (Entity, Arc<RecordingOwner>) {
        let owner = Arc::new(RecordingOwner::default());
        let id = EntityId::new(3).unwrap();
        let entity = Entity::with_identity("Camera", Identity::Assigned(id), owner.clone());
        (entity, owner)
    }

    #[test]
    fn coded_state_dispatches_only_on_state_change() {
        let (mut e, owner) = entity();

        e.set_state(OperationalState::Normal, StatusCode::Active);
        e.set_state(OperationalState::Normal, StatusCode::Idle);
        assert_eq!(owner.state_count(), 1);
        assert_eq!(e.status().description, "idle");

        e.set_state(OperationalState::Error, StatusCode::Idle);
        assert_eq!(owner.state_count(), 2);
    }

    #[test]
    fn same_code_keeps_overwritten_description() {
        let (mut e, _owner) = entity();

        e.set_state(OperationalState::Normal, StatusCode::Active);
        e.status.description = "custom".to_string();
        e.set_state(OperationalState::Fault, StatusCode::Active);

        assert_eq!(e.status().description, "custom");
    }

    #[test]
    fn free_text_report_clears_code() {
        let (mut e, owner) = entity();

        e.set_state(OperationalState::Normal, StatusCode::Active);
        e.set_state_message(OperationalState::Normal, "looking at the sea");
        assert_eq!(e.status().code, None);
        assert_eq!(e.status().description, "looking at the sea");
        assert_eq!(owner.state_count(), 1);

        // A coded report after free text always refreshes the description.
        e.set_state(OperationalState::Normal, StatusCode::Active);
        assert_eq!(e.status().description, "active");
    }

    #[test]
    fn unassigned_entity_never_dispatches() {
        let owner = Arc::new(RecordingOwner::default());
        let mut e = Entity::new("Local", owner.clone());

        e.set_state(OperationalState::Normal, StatusCode::Active);
        e.request_activation();
        e.succeed_activation();
        e.report_state();
        e.report_activation_state();

        assert!(owner.snapshots.lock().unwrap().is_empty());
        assert_eq!(e.phase(), ActivationPhase::Active);
    }

    #[test]
    fn assigning_identity_enables_dispatch() {
        let owner = Arc::new(RecordingOwner::default());
        let mut e = Entity::new("Late", owner.clone());

        e.request_activation();
        assert!(owner.phases().is_empty());

        e.set_identity(Identity::from_raw(9));
        e.report_activation_state();
        assert_eq!(owner.phases(), vec![ActivationPhase::Activating]);
    }

    #[test]
    fn busy_activation_logs_and_remembers() {
        let (mut e, owner) = entity();
        e.request_activation();
        owner.clear();

        e.request_activation();

        assert!(owner.logged("entity is not inactive"));
        assert!(owner.logged("activation is in progress"));
        assert_eq!(e.pending_request(), PendingRequest::WantActive);
        assert_eq!(owner.phases(), vec![ActivationPhase::Activating]);
    }

    #[test]
    fn deactivation_request_during_deactivation_is_remembered() {
        let (mut e, owner) = entity();
        e.request_activation();
        e.succeed_activation();
        e.request_deactivation();
        owner.clear();

        e.request_deactivation();

        assert!(owner.logged("deactivation is in progress"));
        assert_eq!(e.pending_request(), PendingRequest::WantInactive);
        assert_eq!(e.phase(), ActivationPhase::Deactivating);
    }

    #[test]
    fn remembered_activation_replays_after_deactivation() {
        let (mut e, owner) = entity();
        e.request_activation();
        e.succeed_activation();
        e.request_deactivation();
        e.request_activation();
        assert_eq!(e.pending_request(), PendingRequest::WantActive);
        owner.clear();

        e.succeed_deactivation();

        assert_eq!(
            owner.phases(),
            vec![
                ActivationPhase::DeactivationDone,
                ActivationPhase::Inactive,
                ActivationPhase::Activating,
            ]
        );
        assert_eq!(e.pending_request(), PendingRequest::None);
    }

    #[test]
    fn latest_request_overwrites_pending_slot() {
        let (mut e, _owner) = entity();
        e.request_activation();

        e.request_deactivation();
        assert_eq!(e.pending_request(), PendingRequest::WantInactive);

        e.request_activation();
        assert_eq!(e.pending_request(), PendingRequest::WantActive);

        // Completion finds no deactivation intent and settles.
        e.succeed_activation();
        assert_eq!(e.phase(), ActivationPhase::Active);
    }

    #[test]
    fn failures_are_logged_as_warnings() {
        let (mut e, owner) = entity();
        e.request_activation();
        e.fail_activation("no power");

        let logs = owner.logs.lock().unwrap();
        assert!(logs
            .iter()
            .any(|(s, m)| *s == Severity::Warn && m == "fail_activation: no power"));
    }
}
