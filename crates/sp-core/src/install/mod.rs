//! Install-offer domain module.
//!
//! This module defines the install lifecycle state machine types.

pub mod state_machine;

pub use state_machine::{
    InstallAction, InstallContext, InstallEvent, InstallLifecycle, InstallStateMachine,
    UnavailableReason, OFFER_DELAY_MS,
};

/// Storage key of the persisted dismissal record.
pub const DISMISSAL_KEY: &str = "install-dismissed";

/// Outcome reported by the platform after the install prompt closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallChoice {
    Accepted,
    Dismissed,
}
