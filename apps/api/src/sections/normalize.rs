//! Text Normalizer — turns raw extracted text into the canonical line stream the
//! segmenter consumes.
//!
//! Steps run in a fixed order: lowercase, bullets to newlines, whitelist strip,
//! newline collapse, space collapse, per-line trim, empty-line drop. The output
//! only ever contains `[a-z0-9@.\-:/ ]` on non-empty, trimmed lines, so running
//! it twice is a no-op.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Ordered, non-empty, trimmed, lowercase lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedText {
    lines: Vec<String>,
}

impl NormalizedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len_chars(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum::<usize>()
            + self.lines.len().saturating_sub(1)
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9@.\-:/ \n]").expect("static regex"))
}

fn newline_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").expect("static regex"))
}

fn horizontal_whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\S\n]+").expect("static regex"))
}

/// Bullet and dingbat glyphs that PDF/DOCX/OCR output uses to mark list items.
/// Includes the Symbol-font private-use points Word emits for its default bullets.
fn is_bullet(c: char) -> bool {
    matches!(
        c,
        '\u{2022}' // •
            | '\u{2023}' // ‣
            | '\u{2043}' // ⁃
            | '\u{2219}' // ∙
            | '\u{00B7}' // ·
            | '\u{25A0}'..='\u{25FF}' // geometric shapes ■ □ ▪ ► ● ○ ◦ ◆
            | '\u{2605}' | '\u{2606}' // ★ ☆
            | '\u{2700}'..='\u{27BF}' // dingbats ✓ ✔ ❖ ➢ ➤
            | '\u{F0A7}' | '\u{F0B7}' | '\u{F076}' | '\u{F0D8}' | '\u{F0FC}'
    )
}

/// Normalizes raw extracted text into a [`NormalizedText`].
pub fn normalize(raw: &str) -> NormalizedText {
    let lowered = raw.to_lowercase();

    let debulleted: String = lowered
        .chars()
        .map(|c| if is_bullet(c) { '\n' } else { c })
        .collect();

    let stripped = disallowed_chars().replace_all(&debulleted, "");
    let single_newlines = newline_runs().replace_all(&stripped, "\n");
    let single_spaces = horizontal_whitespace_runs().replace_all(&single_newlines, " ");

    let lines = single_spaces
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    NormalizedText { lines }
}
