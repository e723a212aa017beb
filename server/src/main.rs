use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use campus_events_server::config::Config;
use campus_events_server::ocr::{PosterScanner, TesseractRecognizer};
use campus_events_server::routes::create_routes;
use campus_events_server::state::AppState;
use campus_events_server::store::{InMemoryStore, KeyValueStore, PgKeyValueStore};

async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, Box<dyn std::error::Error>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, workspace data lives in memory only");
        return Ok(Arc::new(InMemoryStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    tracing::info!("Successfully connected to database");

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Migrations run successfully");

    Ok(Arc::new(PgKeyValueStore::new(pool)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    let store = open_store(&config).await?;

    let recognizer = TesseractRecognizer::new(&config.tesseract_bin, &config.tesseract_lang);
    let scanner = PosterScanner::new(Arc::new(recognizer), config.extraction);
    tracing::info!(strategy = %config.extraction, "Poster scanner ready");

    let addr = config.bind_addr();
    let app: Router = create_routes(AppState::new(config, store, scanner));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
