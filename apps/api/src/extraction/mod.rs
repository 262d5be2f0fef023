// Document → raw text. Structured extractors (PDF text layer, DOCX XML) with a
// quality-gated OCR fallback. CPU-bound parsing runs inside spawn_blocking.

pub mod dispatcher;
pub mod docx;
pub mod ocr;
pub mod pdf;
pub mod quality;

use std::path::Path;

use bytes::Bytes;

pub use dispatcher::ExtractionDispatcher;
pub use docx::DocxTextExtractor;
pub use ocr::{OcrEngine, TesseractOcr};
pub use pdf::PdfTextExtractor;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "webp"];

/// An uploaded document as received from the caller. Never mutated.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub mime_type: String,
    pub filename: String,
}

impl RawDocument {
    pub fn new(
        bytes: impl Into<Bytes>,
        mime_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            filename: filename.into(),
        }
    }

    pub fn category(&self) -> Option<MimeCategory> {
        MimeCategory::classify(&self.mime_type, &self.filename)
    }

    /// Lowercased filename extension, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.filename)
    }

    /// Whether OCR can read the bytes directly as a raster image. A generic or
    /// missing MIME type defers to the filename extension.
    pub fn is_image(&self) -> bool {
        let essence = mime_essence(&self.mime_type);
        if is_declared(&essence) {
            return essence.starts_with("image/");
        }
        self.extension()
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
    }
}

/// Text produced for one document, and whether OCR produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub text: String,
    pub used_fallback: bool,
}

/// Which branch of the fallback chain a document enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeCategory {
    Pdf,
    Docx,
    LegacyDoc,
    Other,
}

impl MimeCategory {
    /// Classifies a document from its declared MIME type, consulting the filename
    /// extension only when the declaration is missing, malformed, or generic.
    /// Returns `None` when neither yields anything to go on.
    pub fn classify(mime_type: &str, filename: &str) -> Option<Self> {
        let essence = mime_essence(mime_type);

        match essence.as_str() {
            MIME_PDF | "application/x-pdf" => return Some(Self::Pdf),
            MIME_DOCX => return Some(Self::Docx),
            MIME_DOC => return Some(Self::LegacyDoc),
            _ => {}
        }

        if is_declared(&essence) {
            return Some(Self::Other);
        }

        let extension = extension_of(filename)?;
        Some(match extension.as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "doc" => Self::LegacyDoc,
            _ => Self::Other,
        })
    }
}

fn mime_essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// A well-formed media type other than the generic `application/octet-stream`.
fn is_declared(essence: &str) -> bool {
    is_media_type(essence) && essence != "application/octet-stream"
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

fn is_media_type(essence: &str) -> bool {
    match essence.split_once('/') {
        Some((kind, subtype)) => !kind.is_empty() && !subtype.is_empty() && !subtype.contains('/'),
        None => false,
    }
}

/// A format-specific extractor that reads a document's own text layer.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> anyhow::Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_declared_types() {
        assert_eq!(MimeCategory::classify(MIME_PDF, "cv"), Some(MimeCategory::Pdf));
        assert_eq!(
            MimeCategory::classify("Application/PDF; charset=binary", "cv"),
            Some(MimeCategory::Pdf)
        );
        assert_eq!(MimeCategory::classify(MIME_DOCX, "cv"), Some(MimeCategory::Docx));
        assert_eq!(MimeCategory::classify(MIME_DOC, "cv"), Some(MimeCategory::LegacyDoc));
        assert_eq!(
            MimeCategory::classify("image/png", "cv.pdf"),
            Some(MimeCategory::Other)
        );
    }

    #[test]
    fn test_classify_generic_type_uses_extension() {
        let generic = "application/octet-stream";
        assert_eq!(MimeCategory::classify(generic, "cv.PDF"), Some(MimeCategory::Pdf));
        assert_eq!(MimeCategory::classify(generic, "cv.docx"), Some(MimeCategory::Docx));
        assert_eq!(MimeCategory::classify("", "cv.doc"), Some(MimeCategory::LegacyDoc));
        assert_eq!(MimeCategory::classify("garbage", "cv.rtf"), Some(MimeCategory::Other));
    }

    #[test]
    fn test_classify_unmappable() {
        assert_eq!(MimeCategory::classify("", ""), None);
        assert_eq!(MimeCategory::classify("application/octet-stream", "resume"), None);
        assert_eq!(MimeCategory::classify("not a mime", "noext"), None);
    }

    #[test]
    fn test_image_detection() {
        let image =
            |mime: &str, name: &str| RawDocument::new(Bytes::new(), mime, name).is_image();
        assert!(image("image/png", "scan.png"));
        assert!(image("IMAGE/PNG", "scan"));
        assert!(image("application/octet-stream", "scan.PNG"));
        assert!(image("", "photo.jpeg"));
        assert!(!image("application/pdf", "scan.png"));
        assert!(!image("application/octet-stream", "cv.doc"));
        assert!(!image("", "noext"));
    }

    #[test]
    fn test_raw_document_extension() {
        let doc = RawDocument::new(Bytes::new(), MIME_PDF, "Jane.Doe.CV.Pdf");
        assert_eq!(doc.extension().as_deref(), Some("pdf"));
        assert_eq!(doc.category(), Some(MimeCategory::Pdf));
    }
}
