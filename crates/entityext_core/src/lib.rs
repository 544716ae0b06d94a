//! entityext_core: transport-agnostic entity status tracking and activation coordination.
//!
//! Design goals:
//! - Pure, testable logic (no transport or logging framework deps).
//! - Explicit types; no macro wizardry.
//! - All side effects go through an injected owner (dispatch + logging).

pub mod error;

/// Entity identity, operational state, activation phases and the coordinator.
pub mod entity;
