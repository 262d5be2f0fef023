//! OCR back-end — recognises text from rendered page images.
//!
//! `TesseractOcr` shells out to the usual toolchain inside a scratch directory:
//! - images go straight to `tesseract`
//! - PDFs are rasterised with `pdftoppm`, one PNG per page
//! - everything else is first converted to PDF with headless LibreOffice
//!
//! Each call gets its own scratch directory, including a private LibreOffice
//! profile, so concurrent conversions never share state. Tool processes are
//! killed if the request is dropped.
//!
//! `AppState` carries an `Arc<dyn OcrEngine>` so tests can swap in a stub.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::extraction::{MimeCategory, RawDocument};

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("{tool} is not available: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with status {status:?}: {stderr}")]
    ToolFailed {
        tool: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("no page images were produced")]
    NoPages,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, doc: &RawDocument) -> Result<String, OcrError>;
}

/// Commands and settings for the external OCR toolchain.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub tesseract_cmd: String,
    pub pdftoppm_cmd: String,
    pub soffice_cmd: String,
    pub language: String,
    pub dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            pdftoppm_cmd: "pdftoppm".to_string(),
            soffice_cmd: "soffice".to_string(),
            language: "eng".to_string(),
            dpi: 300,
        }
    }
}

pub struct TesseractOcr {
    config: OcrConfig,
}

impl TesseractOcr {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    async fn recognize_image(&self, image: &Path) -> Result<String, OcrError> {
        let stdout = run(
            Command::new(&self.config.tesseract_cmd)
                .arg(image)
                .arg("stdout")
                .arg("-l")
                .arg(&self.config.language)
                .arg("--psm")
                .arg("6"),
            &self.config.tesseract_cmd,
        )
        .await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    async fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
        let prefix = out_dir.join("page");
        run(
            Command::new(&self.config.pdftoppm_cmd)
                .arg("-r")
                .arg(self.config.dpi.to_string())
                .arg("-png")
                .arg(pdf)
                .arg(&prefix),
            &self.config.pdftoppm_cmd,
        )
        .await?;

        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(out_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_page = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("page") && n.ends_with(".png"));
            if is_page {
                pages.push(path);
            }
        }
        if pages.is_empty() {
            return Err(OcrError::NoPages);
        }
        pages.sort_by_key(|p| page_number(p));
        Ok(pages)
    }

    fn convert_command(&self, input: &Path, out_dir: &Path, profile: &Path) -> Command {
        let mut cmd = Command::new(&self.config.soffice_cmd);
        cmd.arg(format!("-env:UserInstallation=file://{}", profile.display()))
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(input);
        cmd
    }

    async fn convert_to_pdf(
        &self,
        input: &Path,
        out_dir: &Path,
        profile: &Path,
    ) -> Result<PathBuf, OcrError> {
        run(
            &mut self.convert_command(input, out_dir, profile),
            &self.config.soffice_cmd,
        )
        .await?;

        // soffice can exit 0 without writing anything
        let stem = input.file_stem().unwrap_or_default();
        let pdf = out_dir.join(stem).with_extension("pdf");
        if !tokio::fs::try_exists(&pdf).await? {
            return Err(OcrError::ToolFailed {
                tool: self.config.soffice_cmd.clone(),
                status: None,
                stderr: format!("no PDF written to {}", pdf.display()),
            });
        }
        Ok(pdf)
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, doc: &RawDocument) -> Result<String, OcrError> {
        let scratch = tempfile::tempdir()?;
        let extension = doc.extension().unwrap_or_else(|| "bin".to_string());
        let input = scratch.path().join(format!("input.{extension}"));
        tokio::fs::write(&input, &doc.bytes).await?;

        if doc.is_image() {
            info!("OCR: recognising image {}", doc.filename);
            return self.recognize_image(&input).await;
        }

        let pdf = if doc.category() == Some(MimeCategory::Pdf) {
            input
        } else {
            info!("OCR: converting {} to PDF before rasterising", doc.filename);
            let converted = scratch.path().join("converted");
            tokio::fs::create_dir(&converted).await?;
            let profile = scratch.path().join("lo-profile");
            self.convert_to_pdf(&input, &converted, &profile).await?
        };

        let pages_dir = scratch.path().join("pages");
        tokio::fs::create_dir(&pages_dir).await?;
        let pages = self.rasterize(&pdf, &pages_dir).await?;
        info!("OCR: recognising {} page(s) of {}", pages.len(), doc.filename);

        let mut text = String::new();
        for page in &pages {
            let page_text = self.recognize_image(page).await?;
            debug!("OCR page {:?}: {} chars", page.file_name(), page_text.len());
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(page_text.trim_end());
        }
        Ok(text)
    }
}

/// Runs `cmd`, returning stdout on success.
async fn run(cmd: &mut Command, tool: &str) -> Result<Vec<u8>, OcrError> {
    let output = cmd
        .kill_on_drop(true)
        .output()
        .await.map_err(|source| OcrError::ToolUnavailable {
        tool: tool.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(OcrError::ToolFailed {
            tool: tool.to_string(),
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output.stdout)
}

/// `page-7.png` → 7. pdftoppm zero-pads by page count, so compare numerically.
fn page_number(path: &Path) -> u32 {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.rsplit('-').next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}
