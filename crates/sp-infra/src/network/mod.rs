pub mod encryption_client;

pub use encryption_client::{HttpEncryptionService, DEFAULT_SERVICE_BASE_URL};
