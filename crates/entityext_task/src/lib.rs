//! entityext_task
//!
//! Task-side adapter for `entityext_core` entities.
//! Provides the owner collaborator (snapshot broadcast + logging), entity id
//! reservation, configuration and logging setup, while keeping the
//! coordination semantics in `entityext_core`.

pub mod config;
pub mod error;
pub mod logging;

mod owner;
pub use owner::TaskOwner;

// Re-export core types that task code commonly needs
pub use entityext_core::entity::{
    ActivationPhase, Entity, EntityId, Identity, OperationalState, PendingRequest, Snapshot,
    StatusCode,
};
pub use entityext_core::error::{CoreError, Result, Severity};
