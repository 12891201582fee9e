//! Mortgage Server Entry Point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use mortgage_server::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::parse();
    init_tracing(&settings);

    tracing::info!("Starting mortgage server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        addr = %settings.addr,
        term_policy = ?settings.term_policy(),
        cors_origins = settings.cors_origins.len(),
        "Configuration loaded"
    );
    if settings.csrf_token.is_none() {
        tracing::warn!("No CSRF token configured; POST endpoints accept any form post");
    }

    let addr = settings.addr;
    let app = create_router(AppState::new(settings));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "mortgage_server={},tower_http=debug",
            settings.log_level
        )
        .into()
    });

    let fmt_layer = if settings.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
