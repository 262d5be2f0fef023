use anyhow::{Context, Result};
use std::str::FromStr;

use crate::extraction::ocr::OcrConfig;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Only `PORT`-style numeric values can fail; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres sink. When unset, accepted resumes are kept in memory.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub tesseract_cmd: String,
    pub pdftoppm_cmd: String,
    pub soffice_cmd: String,
    pub ocr_language: String,
    pub ocr_dpi: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = OcrConfig::default();
        Ok(Config {
            database_url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            tesseract_cmd: env_or("TESSERACT_CMD", defaults.tesseract_cmd),
            pdftoppm_cmd: env_or("PDFTOPPM_CMD", defaults.pdftoppm_cmd),
            soffice_cmd: env_or("SOFFICE_CMD", defaults.soffice_cmd),
            ocr_language: env_or("OCR_LANGUAGE", defaults.language),
            ocr_dpi: parse_env("OCR_DPI", defaults.dpi)?,
        })
    }

    pub fn ocr(&self) -> OcrConfig {
        OcrConfig {
            tesseract_cmd: self.tesseract_cmd.clone(),
            pdftoppm_cmd: self.pdftoppm_cmd.clone(),
            soffice_cmd: self.soffice_cmd.clone(),
            language: self.ocr_language.clone(),
            dpi: self.ocr_dpi,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
