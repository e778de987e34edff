use cookbook::app::build_router;
use cookbook::config::Config;
use cookbook::state::AppState;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Configuration:
    let config = Config::load()?;
    let bind_addr = config.bind_addr;
    tracing::info!("Public URL: {}", config.public_url);
    match &config.data_dir {
        Some(dir) => tracing::info!("Persisting collections to {}", dir.display()),
        None => tracing::info!("No data directory set, running in memory only"),
    }

    // 2. Storage and shared state:
    let state = AppState::new(config).await?;
    tracing::info!(
        "Store ready: {} recipes, {} users",
        state.store.recipes.len(),
        state.store.users.len()
    );

    // 3. HTTP Router:
    let app = build_router(state.clone());

    // 4. Start HTTP server:
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 5. Flush and close the store:
    state.store.close().await?;
    tracing::info!("Store closed, bye");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
