//! Section Segmenter — a single left-to-right pass that buckets normalized lines
//! into resume sections.
//!
//! Every line before the first recognised header belongs to `contact`. A header
//! line switches the current section and is itself discarded; every other line
//! is appended, newline-terminated, to the current section.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::sections::dictionary::{match_header, SectionKey};
use crate::sections::normalize::NormalizedText;

/// Section key → accumulated text. All twelve keys are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SegmentedResume {
    sections: BTreeMap<SectionKey, String>,
}

impl Default for SegmentedResume {
    fn default() -> Self {
        Self {
            sections: SectionKey::ALL
                .into_iter()
                .map(|key| (key, String::new()))
                .collect(),
        }
    }
}

impl SegmentedResume {
    pub fn get(&self, key: SectionKey) -> &str {
        self.sections.get(&key).map(String::as_str).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        self.sections.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Keys whose bucket holds any content.
    pub fn populated(&self) -> Vec<SectionKey> {
        self.iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(key, _)| key)
            .collect()
    }

    fn append_line(&mut self, key: SectionKey, line: &str) {
        let bucket = self.sections.entry(key).or_default();
        bucket.push_str(line);
        bucket.push('\n');
    }
}

/// Runs the classification pass over `text`.
pub fn segment(text: &NormalizedText) -> SegmentedResume {
    let mut resume = SegmentedResume::default();
    let mut current = SectionKey::Contact;
    let mut found_first_header = false;

    for line in text.lines() {
        if let Some(key) = match_header(line) {
            current = key;
            found_first_header = true;
            continue;
        }

        let target = if found_first_header {
            current
        } else {
            SectionKey::Contact
        };
        resume.append_line(target, line);
    }

    resume
}
