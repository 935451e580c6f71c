//! Infrastructure adapters for Secure Pass.
//!
//! Implements the `sp-core` ports that talk to the outside world, except for
//! the OS-level ones which live in `sp-platform`.

pub mod network;
pub mod notice;
pub mod storage;

pub use network::{HttpEncryptionService, DEFAULT_SERVICE_BASE_URL};
pub use notice::{BoardEvent, NoticeBoard, NOTICE_AUTO_CLOSE_MS};
pub use storage::FileKeyValueStore;
