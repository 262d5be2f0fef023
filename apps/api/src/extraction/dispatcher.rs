//! Extraction Dispatcher — picks a strategy by MIME category and walks the
//! fallback chain:
//!
//! | category   | structured extractor | gate on its text        |
//! |------------|----------------------|-------------------------|
//! | PDF        | pdf-extract          | length + ASCII density  |
//! | DOCX       | zip + quick-xml      | length only             |
//! | DOC, other | none                 | OCR directly            |
//!
//! A structured extractor that errors yields empty text, which fails its gate.
//! If OCR has not run yet, a final safety net checks length + alphanumeric
//! density and re-extracts with OCR once. OCR never runs twice for one document.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::extraction::quality::{is_usable, QualityMode};
use crate::extraction::{
    DocxTextExtractor, ExtractionResult, MimeCategory, OcrEngine, PdfTextExtractor, RawDocument,
    TextExtractor,
};
use crate::ingest::IngestError;

#[derive(Clone)]
pub struct ExtractionDispatcher {
    pdf: Arc<dyn TextExtractor>,
    docx: Arc<dyn TextExtractor>,
    ocr: Arc<dyn OcrEngine>,
}

impl ExtractionDispatcher {
    pub fn new(
        pdf: Arc<dyn TextExtractor>,
        docx: Arc<dyn TextExtractor>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Self {
        Self { pdf, docx, ocr }
    }

    /// Default structured extractors with the given OCR back-end.
    pub fn with_ocr(ocr: Arc<dyn OcrEngine>) -> Self {
        Self::new(Arc::new(PdfTextExtractor), Arc::new(DocxTextExtractor), ocr)
    }

    pub async fn extract(&self, doc: &RawDocument) -> Result<ExtractionResult, IngestError> {
        let category = doc.category().ok_or_else(|| {
            IngestError::UnreadableDocument(format!(
                "cannot determine document type from mime {:?} and filename {:?}",
                doc.mime_type, doc.filename
            ))
        })?;
        info!(
            "Extracting {} ({} bytes, mime {:?}) as {:?}",
            doc.filename,
            doc.bytes.len(),
            doc.mime_type,
            category
        );

        let structured = match category {
            MimeCategory::Pdf => Some((
                self.structured_text(&self.pdf, doc).await,
                QualityMode::LengthAndAscii,
            )),
            MimeCategory::Docx => Some((
                self.structured_text(&self.docx, doc).await,
                QualityMode::Length,
            )),
            MimeCategory::LegacyDoc | MimeCategory::Other => None,
        };

        let mut used_fallback = false;
        let mut text = match structured {
            Some((text, mode)) if is_usable(&text, mode) => text,
            Some((text, mode)) => {
                warn!(
                    "Structured text failed {:?} gate ({} chars), falling back to OCR",
                    mode,
                    text.chars().count()
                );
                used_fallback = true;
                self.run_ocr(doc).await?
            }
            None => {
                used_fallback = true;
                self.run_ocr(doc).await?
            }
        };

        if !used_fallback && !is_usable(&text, QualityMode::LengthAndAlnum) {
            warn!("Structured text failed alphanumeric safety net, retrying once with OCR");
            used_fallback = true;
            text = self.run_ocr(doc).await?;
        }

        Ok(ExtractionResult {
            text,
            used_fallback,
        })
    }

    /// Runs a structured extractor off the async executor. Any failure is
    /// logged and becomes empty text.
    async fn structured_text(
        &self,
        extractor: &Arc<dyn TextExtractor>,
        doc: &RawDocument,
    ) -> String {
        let extractor = Arc::clone(extractor);
        let bytes = doc.bytes.clone();
        match tokio::task::spawn_blocking(move || extractor.extract(&bytes)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Structured extraction failed for {}: {e:#}", doc.filename);
                String::new()
            }
            Err(e) => {
                warn!("Structured extraction task aborted for {}: {e}", doc.filename);
                String::new()
            }
        }
    }

    async fn run_ocr(&self, doc: &RawDocument) -> Result<String, IngestError> {
        let text = self.ocr.recognize(doc).await.map_err(|e| {
            error!("OCR failed for {}: {e}", doc.filename);
            IngestError::UnreadableDocument(format!("OCR failed: {e}"))
        })?;
        info!("OCR produced {} chars for {}", text.chars().count(), doc.filename);
        Ok(text)
    }
}
