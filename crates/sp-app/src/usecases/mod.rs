//! Business logic use cases
//! 业务用例
//!
//! Each use case owns one user-visible flow and reports results through the
//! shared form context or the notifier, never through return values alone.

pub mod clipboard;
pub mod install;
pub mod request;

pub use clipboard::{CopyEncryptedText, COPY_FEEDBACK_MS};
pub use install::{InstallError, InstallPromptController};
pub use request::RequestOrchestrator;
