//! entityext_core::entity
//!
//! Entity status tracking and the activation coordination protocol.
//! This module contains **no** transport or logging framework code; every
//! side effect goes through the injected [`EntityOwner`].
//!
//! Key ideas:
//! - Operational state is announced only when its value changes
//! - Every activation phase write is announced
//! - Completions "blip": the outcome phase, then the settled phase
//! - One pending request slot, overwritten by the latest intent

mod coordinator;
mod engine;
mod graph;
mod identity;
mod owner;
mod phase;
mod state;

pub use coordinator::{Entity, SharedOwner};
pub use engine::{
    available_requests, begin, blip, concludes, replayed_by, Completion, Request, RequestOutcome,
};
pub use graph::{phase_graph, Operation, PhaseEdge, PhaseGraph};
pub use identity::{EntityId, Identity, UNKNOWN_ENTITY_ID};
pub use owner::{ActivationSnapshot, EntityOwner, Snapshot, StateSnapshot};
pub use phase::{ActivationPhase, ActivationStatus, PendingRequest, ALL_PHASES};
pub use state::{OperationalState, OperationalStatus, StatusCode, ALL_OPERATIONAL_STATES};
