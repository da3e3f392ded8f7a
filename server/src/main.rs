//! Bookmarks API server.
//!
//! Run from repo root: `cargo run -p bookmarks-server`

use bookmarks_api::{
    build_app, ensure_bookmarks_table, ensure_database_exists, AppState, BookmarkStore,
    MemoryBookmarkStore, PgBookmarkStore, ServerConfig,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "bookmarks_api=info,bookmarks_server=info,tower_http=info",
                )
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(?config, "loaded configuration");

    let store: Arc<dyn BookmarkStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            ensure_bookmarks_table(&pool).await?;
            Arc::new(PgBookmarkStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, bookmarks are kept in memory");
            Arc::new(MemoryBookmarkStore::new())
        }
    };

    let addr = format!("{}:{}", config.host, config.port);
    let app = build_app(AppState::new(store, config));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
