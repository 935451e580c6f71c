//! Strength feedback for the encrypted text field.
//! 加密文本强度评估
//!
//! The assessment is derived, never stored: callers recompute it from the
//! current field value on every read.

use serde::{Deserialize, Serialize};

use crate::text::text_length;

/// Highest score a text can reach after clamping.
pub const MAX_SCORE: u8 = 5;

/// Ordered weakest to strongest; the discriminant is the table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrengthTier {
    VeryWeak = 0,
    Weak = 1,
    Fair = 2,
    Good = 3,
    Strong = 4,
    VeryStrong = 5,
}

const TIERS: [StrengthTier; 6] = [
    StrengthTier::VeryWeak,
    StrengthTier::Weak,
    StrengthTier::Fair,
    StrengthTier::Good,
    StrengthTier::Strong,
    StrengthTier::VeryStrong,
];

impl StrengthTier {
    pub fn from_score(score: u8) -> Self {
        TIERS[usize::from(score.min(MAX_SCORE))]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthTier::VeryWeak => "Very Weak",
            StrengthTier::Weak => "Weak",
            StrengthTier::Fair => "Fair",
            StrengthTier::Good => "Good",
            StrengthTier::Strong => "Strong",
            StrengthTier::VeryStrong => "Very Strong",
        }
    }

    /// Color token consumed by the view layer.
    pub fn color_token(&self) -> &'static str {
        match self {
            StrengthTier::VeryWeak => "red",
            StrengthTier::Weak => "orange",
            StrengthTier::Fair => "yellow",
            StrengthTier::Good => "lime",
            StrengthTier::Strong => "green",
            StrengthTier::VeryStrong => "emerald",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthAssessment {
    pub score: u8,
    /// `None` for empty input.
    pub tier: Option<StrengthTier>,
}

impl StrengthAssessment {
    pub fn label(&self) -> &'static str {
        self.tier.map(|t| t.label()).unwrap_or("")
    }

    pub fn color_token(&self) -> &'static str {
        self.tier.map(|t| t.color_token()).unwrap_or("")
    }
}

/// Score `text` on a 0..=5 scale.
///
/// One point each for: length >= 8, length >= 12, an uppercase letter, a
/// lowercase letter, a digit and a non-alphanumeric character. The total is
/// clamped to [`MAX_SCORE`].
pub fn score(text: &str) -> StrengthAssessment {
    if text.is_empty() {
        return StrengthAssessment {
            score: 0,
            tier: None,
        };
    }

    let len = text_length(text);
    let checks = [
        len >= 8,
        len >= 12,
        text.chars().any(char::is_uppercase),
        text.chars().any(char::is_lowercase),
        text.chars().any(|c| c.is_ascii_digit()),
        text.chars().any(|c| !c.is_alphanumeric()),
    ];
    let raw = checks.iter().filter(|passed| **passed).count() as u8;
    let score = raw.min(MAX_SCORE);

    StrengthAssessment {
        score,
        tier: Some(StrengthTier::from_score(score)),
    }
}
