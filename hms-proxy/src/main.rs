//! hms-proxy - local development proxy for the HMS back office
//!
//! Serves `{PROXY_PREFIX}/*` on `HTTP_PORT` and relays it to `BACKEND_URL`.

use hms_proxy::{ProxyConfig, ProxyState, logger, router};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = ProxyConfig::from_env();
    let _log_guard = logger::init_logger(config.log_dir.as_deref());

    tracing::info!(
        backend = %config.backend_url,
        prefix = %config.prefix,
        "Starting hms-proxy"
    );

    let addr = format!("0.0.0.0:{}", config.http_port);
    let app = router(ProxyState::new(config)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("hms-proxy listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hms-proxy stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
