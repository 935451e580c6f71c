//! User-facing notices.
//! 面向用户的通知
//!
//! Every notice carries a stable [`NoticeId`]. The sink uses it to replace a
//! visible notice of the same condition instead of stacking a duplicate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeId {
    PlainTextTooShort,
    EncryptedTextEmpty,
    EncryptUnexpected,
    EncryptServerError,
    DecryptUnexpected,
    DecryptServerError,
    EncryptedTextInvalid,
    CopySucceeded,
    CopyFailed,
    InstallUnavailable,
    InstallAccepted,
}

impl NoticeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeId::PlainTextTooShort => "plain-text-too-short",
            NoticeId::EncryptedTextEmpty => "encrypted-text-empty",
            NoticeId::EncryptUnexpected => "encrypt-unexpected",
            NoticeId::EncryptServerError => "encrypt-server-error",
            NoticeId::DecryptUnexpected => "decrypt-unexpected",
            NoticeId::DecryptServerError => "decrypt-server-error",
            NoticeId::EncryptedTextInvalid => "encrypted-text-invalid",
            NoticeId::CopySucceeded => "copy-succeeded",
            NoticeId::CopyFailed => "copy-failed",
            NoticeId::InstallUnavailable => "install-unavailable",
            NoticeId::InstallAccepted => "install-accepted",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            NoticeId::PlainTextTooShort | NoticeId::EncryptedTextEmpty => Severity::Warning,
            NoticeId::EncryptUnexpected
            | NoticeId::EncryptServerError
            | NoticeId::DecryptUnexpected
            | NoticeId::DecryptServerError
            | NoticeId::EncryptedTextInvalid
            | NoticeId::CopyFailed => Severity::Error,
            NoticeId::CopySucceeded | NoticeId::InstallAccepted => Severity::Success,
            NoticeId::InstallUnavailable => Severity::Info,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            NoticeId::PlainTextTooShort => {
                "Please enter at least 3 characters in the plain text field"
            }
            NoticeId::EncryptedTextEmpty => "Please enter some value in the encrypted text field",
            NoticeId::EncryptUnexpected | NoticeId::DecryptUnexpected => {
                "Something went wrong. Please try again"
            }
            NoticeId::EncryptServerError | NoticeId::DecryptServerError => {
                "Server error: something went wrong. Please try again"
            }
            NoticeId::EncryptedTextInvalid => "Encrypted text is not valid. Please try again",
            NoticeId::CopySucceeded => "Text copied to clipboard!",
            NoticeId::CopyFailed => "Error copying text. Please try again.",
            NoticeId::InstallUnavailable => "Install is not available right now",
            NoticeId::InstallAccepted => "Secure Pass was installed",
        }
    }
}

impl std::fmt::Display for NoticeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub id: NoticeId,
}

impl From<NoticeId> for Notice {
    fn from(id: NoticeId) -> Self {
        Self {
            severity: id.severity(),
            message: id.message().to_string(),
            id,
        }
    }
}
