//! Quality Gate — decides whether extracted text is trustworthy enough to keep
//! or whether the dispatcher should fall back to OCR.

/// Minimum number of characters (after trimming) for text to count as usable.
pub const MIN_TEXT_CHARS: usize = 100;
/// Minimum share of printable-ASCII/whitespace characters for PDF text layers.
pub const MIN_ASCII_RATIO: f64 = 0.85;
/// Minimum share of `[a-z0-9]` characters applied by the final safety net.
pub const MIN_ALNUM_RATIO: f64 = 0.5;

/// Which thresholds a gate evaluation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityMode {
    /// Length only. Used for DOCX text.
    Length,
    /// Length and ASCII density. Used for PDF text layers.
    LengthAndAscii,
    /// Length and alphanumeric density. Used by the final safety net.
    LengthAndAlnum,
}

/// Fraction of characters that are printable ASCII or whitespace.
pub fn ascii_ratio(text: &str) -> f64 {
    ratio(text, |c| c.is_ascii_graphic() || c.is_ascii_whitespace())
}

/// Fraction of characters in `[a-zA-Z0-9]`.
pub fn alnum_ratio(text: &str) -> f64 {
    ratio(text, |c| c.is_ascii_alphanumeric())
}

fn ratio(text: &str, pred: impl Fn(char) -> bool) -> f64 {
    let mut total = 0usize;
    let mut hits = 0usize;
    for c in text.chars() {
        total += 1;
        if pred(c) {
            hits += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64
}

/// Returns `true` when `text` passes every threshold `mode` selects.
/// Empty and whitespace-only text is never usable.
pub fn is_usable(text: &str, mode: QualityMode) -> bool {
    let text = text.trim();
    if text.is_empty() || text.chars().count() < MIN_TEXT_CHARS {
        return false;
    }
    match mode {
        QualityMode::Length => true,
        QualityMode::LengthAndAscii => ascii_ratio(text) >= MIN_ASCII_RATIO,
        QualityMode::LengthAndAlnum => alnum_ratio(text) >= MIN_ALNUM_RATIO,
    }
}
