use crate::ingest::IngestError;
use crate::sections::{SectionKey, SegmentedResume};

/// Accepts a segmented resume only if its `experience` bucket has content.
/// Every other section is optional.
pub fn validate_segments(resume: &SegmentedResume) -> Result<(), IngestError> {
    if resume.get(SectionKey::Experience).trim().is_empty() {
        return Err(IngestError::MissingExperienceSection);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::normalize::normalize;
    use crate::sections::segmenter::segment;

    #[test]
    fn test_accepts_with_experience() {
        let resume = segment(&normalize("experience\nacme corp senior engineer"));
        assert!(validate_segments(&resume).is_ok());
    }

    #[test]
    fn test_rejects_contact_only() {
        let resume = segment(&normalize("john smith\n555-1234"));
        assert!(matches!(
            validate_segments(&resume),
            Err(IngestError::MissingExperienceSection)
        ));
    }

    #[test]
    fn test_rejects_header_without_body() {
        let resume = segment(&normalize("experience\nskills\nrust"));
        assert!(matches!(
            validate_segments(&resume),
            Err(IngestError::MissingExperienceSection)
        ));
    }

    #[test]
    fn test_optional_sections_may_be_empty() {
        let resume = segment(&normalize("experience\nacme"));
        assert_eq!(resume.populated(), vec![SectionKey::Experience]);
        assert!(validate_segments(&resume).is_ok());
    }
}
