//! Section Header Dictionary — canonical section keys and the header phrasings
//! recognised for each.
//!
//! The table is scanned top to bottom and the first entry with any variant
//! contained in a line wins. A line mentioning two sections ("certifications
//! and achievements") is attributed to whichever entry comes first here, not to
//! the longest or most specific phrase.

use serde::Serialize;

/// The closed set of resume categories. Declaration order is the order keys
/// appear in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Contact,
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
    Achievements,
    Languages,
    Publications,
    Interests,
    Other,
}

impl SectionKey {
    pub const ALL: [SectionKey; 12] = [
        SectionKey::Contact,
        SectionKey::Summary,
        SectionKey::Education,
        SectionKey::Experience,
        SectionKey::Skills,
        SectionKey::Projects,
        SectionKey::Certifications,
        SectionKey::Achievements,
        SectionKey::Languages,
        SectionKey::Publications,
        SectionKey::Interests,
        SectionKey::Other,
    ];
}

/// One row of the dictionary. Variants are lowercase, matching normalized text.
#[derive(Debug)]
pub struct SectionHeaderEntry {
    pub key: SectionKey,
    pub variants: &'static [&'static str],
}

pub static SECTION_HEADERS: &[SectionHeaderEntry] = &[
    SectionHeaderEntry {
        key: SectionKey::Contact,
        variants: &[
            "contact information",
            "contact details",
            "personal details",
            "personal information",
        ],
    },
    SectionHeaderEntry {
        key: SectionKey::Summary,
        variants: &[
            "professional summary",
            "career summary",
            "summary",
            "career objective",
            "objective",
            "professional profile",
            "personal profile",
            "profile summary",
            "about me",
        ],
    },
    SectionHeaderEntry {
        key: SectionKey::Education,
        variants: &[
            "education",
            "academic background",
            "academic qualifications",
            "qualifications",
        ],
    },
    SectionHeaderEntry {
        key: SectionKey::Experience,
        variants: &[
            "work experience",
            "professional experience",
            "experience",
            "employment history",
            "work history",
            "internships",
        ],
    },
    SectionHeaderEntry {
        key: SectionKey::Skills,
        variants: &["technical skills", "key skills", "core competencies", "skills"],
    },
    SectionHeaderEntry {
        key: SectionKey::Projects,
        variants: &["personal projects", "academic projects", "projects"],
    },
    SectionHeaderEntry {
        key: SectionKey::Certifications,
        variants: &["certifications", "certificates", "licenses"],
    },
    SectionHeaderEntry {
        key: SectionKey::Achievements,
        variants: &["achievements", "accomplishments", "awards", "honors", "honours"],
    },
    SectionHeaderEntry {
        key: SectionKey::Languages,
        variants: &["languages known", "spoken languages", "language proficiency"],
    },
    SectionHeaderEntry {
        key: SectionKey::Publications,
        variants: &["publications", "research papers"],
    },
    SectionHeaderEntry {
        key: SectionKey::Interests,
        variants: &["interests", "hobbies"],
    },
    SectionHeaderEntry {
        key: SectionKey::Other,
        variants: &[
            "additional information",
            "references",
            "volunteering",
            "extracurricular",
        ],
    },
];

/// Returns the key of the first dictionary entry whose any variant is a
/// substring of `line`.
pub fn match_header(line: &str) -> Option<SectionKey> {
    SECTION_HEADERS
        .iter()
        .find(|entry| entry.variants.iter().any(|v| line.contains(v)))
        .map(|entry| entry.key)
}
