use std::sync::Arc;

use trawl::api;
use trawl::config::CONFIG;
use trawl::db::Database;
use trawl::query_engine::QueryEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    // A dead store at startup is fatal: no pool, no server.
    let db = Database::from_config().await?;

    let result = serve(db.clone()).await;

    // Pool teardown happens on every exit path, including serve errors.
    db.close().await;
    result
}

async fn serve(db: Database) -> anyhow::Result<()> {
    let query_engine = Arc::new(QueryEngine::new(db));
    let app = api::create_router(query_engine);

    let listener = tokio::net::TcpListener::bind(&CONFIG.bind_addr).await?;
    tracing::info!("listening on {}", CONFIG.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
