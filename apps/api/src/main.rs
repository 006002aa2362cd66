mod config;
mod db;
mod errors;
mod export;
mod models;
mod routes;
mod state;
mod storage;
mod suggestion_client;
mod tailoring;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::export::default_page_geometry;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{DualStorePersister, PgRelationalStore, S3DocumentStore};
use crate::suggestion_client::SuggestionClient;
use crate::tailoring::{SubmissionOrchestrator, TracingAudit};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!(bucket = %config.s3_bucket, "S3 client initialized");

    // Initialize suggestion service client
    let service = SuggestionClient::new(
        config.suggestion_service_url.clone(),
        Duration::from_secs(config.suggestion_service_timeout_secs),
    )?;
    info!(endpoint = %service.endpoint(), "Suggestion client initialized");

    let relational = Arc::new(PgRelationalStore::new(db));
    let documents = Arc::new(S3DocumentStore::new(s3, config.s3_bucket.clone()));
    let persister = DualStorePersister::new(documents, relational.clone());

    let orchestrator = SubmissionOrchestrator::new(
        Arc::new(service),
        persister,
        Arc::new(TracingAudit),
        config.max_job_description_chars,
    );

    // Build app state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        relational,
        config: config.clone(),
        page_geometry: default_page_geometry(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "tailor-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.s3_region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO serves buckets by path, not by virtual host.
    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
