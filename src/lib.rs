//! Secure Pass Library
//!
//! Host-facing entry point: call [`bootstrap::launch`] and drive the returned
//! controller from the view layer.

pub mod bootstrap;

pub use bootstrap::{launch, BootstrapError, WiredApp};
pub use sp_app::{FormSnapshot, SecurePassController};
pub use sp_core::{Notice, NoticeId, OperationState, Severity, StrengthAssessment};
