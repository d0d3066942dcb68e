//! Server lifecycle: bind, serve, shut down on signal.

use issue_lib::IssueTracker;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::ServerConfig;
use crate::error::{Result, TrackerError};

/// Bind the configured address and serve until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns `Bind` if the address cannot be bound, or `Server` if the
/// server loop fails.
pub async fn serve(config: &ServerConfig, tracker: IssueTracker) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| TrackerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(addr = %listener.local_addr()?, "listening");

    let app = api::router(AppState::new(tracker));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TrackerError::Server(e.to_string()))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
