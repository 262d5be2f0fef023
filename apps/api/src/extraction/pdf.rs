use std::panic;

use anyhow::anyhow;
use tracing::debug;

use crate::extraction::TextExtractor;

/// Reads the embedded text layer of a PDF with `pdf-extract`.
///
/// The parser panics on some malformed files; a panic is reported as an
/// ordinary error so the dispatcher can fall through to OCR.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> anyhow::Result<String> {
        if !bytes.starts_with(b"%PDF") {
            return Err(anyhow!("missing %PDF header"));
        }

        let text = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| anyhow!("pdf parser panicked"))?
            .map_err(|e| anyhow!("pdf text extraction failed: {e}"))?;

        debug!("pdf text layer: {} chars", text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A one-page PDF with a Helvetica text layer, one `Tj` per line.
    /// Object offsets in the xref table are exact.
    pub(crate) fn text_pdf(lines: &[&str]) -> Vec<u8> {
        let mut stream = String::from("BT /F1 11 Tf 72 720 Td\n");
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                stream.push_str("0 -16 Td\n");
            }
            stream.push_str(&format!("({line}) Tj\n"));
        }
        stream.push_str("ET");

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!("<< /Length {} >>\nstream\n{stream}\nendstream", stream.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
        }
        let xref_offset = pdf.len();
        pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            pdf.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%EOF\n",
            objects.len() + 1
        ));
        pdf.into_bytes()
    }

    #[test]
    fn test_reads_embedded_text_layer() {
        let bytes = text_pdf(&["Jane Doe", "Work Experience", "Acme Corp Senior Engineer"]);
        let text = PdfTextExtractor.extract(&bytes).unwrap();
        for word in ["Jane", "Doe", "Experience", "Acme", "Engineer"] {
            assert!(text.contains(word), "{word:?} missing from {text:?}");
        }
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = PdfTextExtractor.extract(b"PK\x03\x04 not a pdf").unwrap_err();
        assert!(err.to_string().contains("%PDF"));
    }

    #[test]
    fn test_truncated_pdf_is_an_error_not_a_panic() {
        assert!(PdfTextExtractor.extract(b"%PDF-1.7\n1 0 obj\n<<").is_err());
    }
}
