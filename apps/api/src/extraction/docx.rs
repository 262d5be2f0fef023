//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive; body text lives in `word/document.xml` as
//! `<w:t>` runs inside `<w:p>` paragraphs. Each paragraph becomes one line.

use std::io::{Cursor, Read};

use anyhow::Context;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::extraction::TextExtractor;

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract(&self, bytes: &[u8]) -> anyhow::Result<String> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).context("docx is not a valid zip archive")?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .with_context(|| format!("docx has no {DOCUMENT_PART}"))?
            .read_to_string(&mut xml)
            .with_context(|| format!("failed reading {DOCUMENT_PART}"))?;

        let text = document_xml_to_text(&xml)?;
        debug!("docx text: {} chars", text.chars().count());
        Ok(text)
    }
}

fn document_xml_to_text(xml: &str) -> anyhow::Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event().context("malformed document.xml")? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text = in_run,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" if in_run => text.push(' '),
                b"br" | b"cr" if in_run => text.push('\n'),
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text => {
                text.push_str(&e.unescape().context("bad xml escape in document.xml")?);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"r" => in_run = false,
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
