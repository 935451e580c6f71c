//! Remote encryption service replies and their classification.
//! 远程加密服务响应及其分类
//!
//! The service port reports raw facts ([`ServiceResponse`] or
//! [`TransportError`]). [`classify`] turns those facts into a
//! [`RemoteOutcome`] that the request orchestrator consumes exhaustively.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notice::NoticeId;
use crate::operation::OperationKind;

/// `msg` the decrypt endpoint returns when the input is not a valid
/// encrypted value.
pub const INVALID_ENCRYPTED_TEXT_MSG: &str = "Encrypted text is not valid";

/// JSON body of a service reply. Both fields are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

/// A reply that made it back over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    /// `None` when the payload was not a JSON object.
    pub body: Option<ServiceBody>,
}

impl ServiceResponse {
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn msg(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.msg.as_deref())
    }
}

/// No reply was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("server responded with status {0}")]
    ServerStatus(u16),

    #[error("transport failure: {0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// The service produced a result for the opposite field.
    Success(String),
    /// The service rejected the input as not a valid encrypted value.
    DomainInvalid,
    /// A 2xx reply without the expected success marker.
    Unexpected,
    /// Network failure or a server-side error.
    Transport(TransportError),
}

impl RemoteOutcome {
    /// Notice to surface for this outcome, `None` on success.
    pub fn notice(&self, kind: OperationKind) -> Option<NoticeId> {
        match self {
            RemoteOutcome::Success(_) => None,
            RemoteOutcome::DomainInvalid => Some(NoticeId::EncryptedTextInvalid),
            RemoteOutcome::Unexpected => Some(kind.unexpected_notice()),
            RemoteOutcome::Transport(_) => Some(kind.server_error_notice()),
        }
    }
}

/// Map a raw service reply for `kind` onto a [`RemoteOutcome`].
pub fn classify(
    kind: OperationKind,
    raw: Result<ServiceResponse, TransportError>,
) -> RemoteOutcome {
    let response = match raw {
        Ok(response) => response,
        Err(err) => return RemoteOutcome::Transport(err),
    };

    if response.is_success_status() {
        let body = response.body.unwrap_or_default();
        return match (body.msg.as_deref(), body.result) {
            (Some(msg), Some(result)) if msg == kind.success_marker() => {
                RemoteOutcome::Success(result)
            }
            _ => RemoteOutcome::Unexpected,
        };
    }

    if kind == OperationKind::Decrypt && response.msg() == Some(INVALID_ENCRYPTED_TEXT_MSG) {
        return RemoteOutcome::DomainInvalid;
    }

    RemoteOutcome::Transport(TransportError::ServerStatus(response.status))
}
