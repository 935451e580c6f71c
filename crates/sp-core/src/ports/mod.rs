//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! the remote service, the system clipboard, durable storage and the host
//! shell.

pub mod app_dirs;
pub mod clipboard;
pub mod encryption_service;
pub mod errors;
pub mod install;
pub mod key_value;
pub mod notifier;

pub use app_dirs::AppDirsPort;
pub use clipboard::ClipboardPort;
pub use encryption_service::EncryptionServicePort;
pub use errors::{AppDirsError, KeyValueStoreError};
pub use install::{InstallCapability, InstallPlatformPort, InstallSignal};
pub use key_value::KeyValueStorePort;
pub use notifier::NotifierPort;
