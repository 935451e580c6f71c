//! Field input normalization.
//! 输入字段规范化

/// Strip every whitespace character from raw field input.
///
/// Applied to both the plain text and the encrypted text field on every
/// edit, so neither field can ever hold whitespace.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Field length in UTF-16 code units, the unit browser text fields report.
///
/// A character outside the Basic Multilingual Plane counts as two.
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}
