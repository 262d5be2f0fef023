mod config;
mod db;
mod errors;
mod extraction;
mod ingest;
mod models;
mod routes;
mod sections;
mod sink;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::{ExtractionDispatcher, TesseractOcr};
use crate::ingest::IngestPipeline;
use crate::routes::build_router;
use crate::sink::{MemoryResumeSink, PgResumeSink, ResumeSink};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume ingest API v{}", env!("CARGO_PKG_VERSION"));

    // Extraction chain: pdf-extract / docx XML, tesseract fallback
    let ocr_config = config.ocr();
    info!(
        "OCR: {} (lang {}, {} dpi), rasteriser {}, converter {}",
        ocr_config.tesseract_cmd,
        ocr_config.language,
        ocr_config.dpi,
        ocr_config.pdftoppm_cmd,
        ocr_config.soffice_cmd
    );
    let dispatcher = ExtractionDispatcher::with_ocr(Arc::new(TesseractOcr::new(ocr_config)));
    let pipeline = Arc::new(IngestPipeline::new(dispatcher));

    let sink: Arc<dyn ResumeSink> = match &config.database_url {
        Some(url) => Arc::new(PgResumeSink::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; accepted resumes are kept in memory only");
            Arc::new(MemoryResumeSink::new())
        }
    };

    let state = AppState { pipeline, sink };

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the upload UI host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
