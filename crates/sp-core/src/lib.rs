//! # sp-core
//!
//! Core domain models and business rules for Secure Pass.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! text normalization, pre-flight validation, strength scoring, classification
//! of remote-service replies and the install-offer state machine. Everything
//! that touches the network, the clipboard, storage or the host shell is
//! reached through the traits in [`ports`].

// Public module exports
pub mod app_dirs;
pub mod config;
pub mod install;
pub mod notice;
pub mod operation;
pub mod ports;
pub mod remote;
pub mod strength;
pub mod text;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use install::{
    InstallAction, InstallChoice, InstallEvent, InstallLifecycle, InstallStateMachine,
    UnavailableReason,
};
pub use notice::{Notice, NoticeId, Severity};
pub use operation::{OperationKind, OperationState};
pub use remote::{classify, RemoteOutcome, ServiceBody, ServiceResponse, TransportError};
pub use strength::{score, StrengthAssessment, StrengthTier};
pub use text::{normalize, text_length};
pub use validation::{check_decrypt, check_encrypt, ValidationError};
