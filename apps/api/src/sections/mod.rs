// Resume sectioning: normalization, header dictionary, segmentation, and the
// mandatory-content gate. Pure and synchronous; nothing here touches I/O.

pub mod dictionary;
pub mod normalize;
pub mod segmenter;
pub mod validation;

pub use dictionary::SectionKey;
pub use normalize::normalize;
pub use segmenter::{segment, SegmentedResume};
pub use validation::validate_segments;
