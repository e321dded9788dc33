//! KlikBelanja - student & product records API
//! Mission: Serve authenticated CRUD over the relational store

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::path::Path;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use klikbelanja_backend::{create_router, AppContext, Config, Database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let config = Config::parse();

    info!("🚀 KlikBelanja API starting");

    let secret = config.signing_secret();
    if secret.is_insecure_default() {
        warn!("⚠️  SECRET_KEY not set - signing tokens with the built-in default secret");
        warn!("⚠️  SET SECRET_KEY IN PRODUCTION!");
    }

    if config.product_create_requires_auth {
        info!("🔐 Product creation requires a bearer token");
    } else {
        warn!("🔓 Product creation (POST /dataproduk) is open to unauthenticated callers");
    }

    match config.max_page_limit {
        Some(max) => info!("📄 Product page size capped at {}", max),
        None => info!("📄 Product page size is caller-controlled (no cap)"),
    }

    let db = Database::open(&config.database_path)?;
    let app = create_router(AppContext::from_config(&config, db));

    // Start server
    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🎯 API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Server stopped");
    Ok(())
}

/// Initialize tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "klikbelanja_backend=debug,klikbelanja=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate directory when launched from elsewhere
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown signal received");
}
