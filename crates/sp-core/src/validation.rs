//! Pre-flight checks run before any remote operation is issued.
//!
//! Both checks are synchronous and never touch network state. A failed check
//! blocks the action and maps to a warning-level notice with a fixed id, so
//! repeated attempts replace the notice instead of stacking it.

use thiserror::Error;

use crate::notice::NoticeId;
use crate::text::text_length;

/// Minimum plain text length accepted by the encrypt path.
pub const MIN_PLAIN_TEXT_LEN: usize = 3;

/// Minimum encrypted text length accepted by the decrypt path.
pub const MIN_ENCRYPTED_TEXT_LEN: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("plain text must be at least {min_len} characters, got {actual}")]
    PlainTextTooShort { min_len: usize, actual: usize },

    #[error("encrypted text must not be empty")]
    EncryptedTextEmpty,
}

impl ValidationError {
    /// Stable notice id for this violation.
    pub fn notice_id(&self) -> NoticeId {
        match self {
            ValidationError::PlainTextTooShort { .. } => NoticeId::PlainTextTooShort,
            ValidationError::EncryptedTextEmpty => NoticeId::EncryptedTextEmpty,
        }
    }
}

/// Gate for the encrypt path.
pub fn check_encrypt(plain_text: &str) -> Result<(), ValidationError> {
    let actual = text_length(plain_text);
    if actual < MIN_PLAIN_TEXT_LEN {
        return Err(ValidationError::PlainTextTooShort {
            min_len: MIN_PLAIN_TEXT_LEN,
            actual,
        });
    }
    Ok(())
}

/// Gate for the decrypt path.
pub fn check_decrypt(encrypted_text: &str) -> Result<(), ValidationError> {
    if text_length(encrypted_text) < MIN_ENCRYPTED_TEXT_LEN {
        return Err(ValidationError::EncryptedTextEmpty);
    }
    Ok(())
}
