//! Remote operation kinds and their lifecycle.

use serde::{Deserialize, Serialize};

use crate::notice::NoticeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Encrypt,
    Decrypt,
}

impl OperationKind {
    /// Path segment appended to the service base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            OperationKind::Encrypt => "encrypt",
            OperationKind::Decrypt => "decrypt",
        }
    }

    /// Query parameter carrying the input text.
    pub fn query_param(&self) -> &'static str {
        match self {
            OperationKind::Encrypt => "plainText",
            OperationKind::Decrypt => "encryptedText",
        }
    }

    /// `msg` value the service returns on success.
    pub fn success_marker(&self) -> &'static str {
        match self {
            OperationKind::Encrypt => "encrypted successfully",
            OperationKind::Decrypt => "decrypted successfully",
        }
    }

    pub fn unexpected_notice(&self) -> NoticeId {
        match self {
            OperationKind::Encrypt => NoticeId::EncryptUnexpected,
            OperationKind::Decrypt => NoticeId::DecryptUnexpected,
        }
    }

    pub fn server_error_notice(&self) -> NoticeId {
        match self {
            OperationKind::Encrypt => NoticeId::EncryptServerError,
            OperationKind::Decrypt => NoticeId::DecryptServerError,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Lifecycle of one operation kind.
///
/// `Pending` only while the remote call is outstanding; every call settles
/// into `Succeeded` or `Failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl OperationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, OperationState::Pending)
    }
}
