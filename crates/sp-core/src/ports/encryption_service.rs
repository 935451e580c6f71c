//! Remote encryption service port
//!
//! The service owns the cipher. This port only carries text there and
//! reports what came back, without interpreting it.

use async_trait::async_trait;

use crate::operation::OperationKind;
use crate::remote::{ServiceResponse, TransportError};

#[async_trait]
pub trait EncryptionServicePort: Send + Sync {
    /// Issue a single request for `kind` carrying `text`.
    ///
    /// Returns `Ok` for any reply that arrived, whatever its status;
    /// `Err` only when no reply was received.
    async fn request(
        &self,
        kind: OperationKind,
        text: &str,
    ) -> Result<ServiceResponse, TransportError>;
}
