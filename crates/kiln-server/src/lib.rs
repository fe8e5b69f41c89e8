//! # kiln-server
//!
//! HTTP surface for kiln: login and password flows, the review dashboard,
//! assignments, uploads into Dropbox, downloads, and the file explorer.
//!
//! Handlers are thin. Each builds short-lived backend handles from
//! [`AppState`], calls into the storage, auth, database, and upload crates,
//! and maps failures through [`AppError`]. Pages are returned as JSON view
//! models.

pub mod body;
pub mod config_warnings;
pub mod error;
pub mod flash;
pub mod routes;
pub mod session;
pub mod state;
pub mod uploads;
pub mod views;

pub use error::AppError;
pub use routes::router;
pub use state::AppState;

use tokio::net::TcpListener;
use tokio::signal::ctrl_c;

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an I/O error if the scratch directory cannot be created or the
/// listener cannot bind.
pub async fn serve(state: AppState) -> std::io::Result<()> {
    tokio::fs::create_dir_all(state.scratch_dir()).await?;

    let address = state.config().server.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "kiln listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("kiln stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
            Err(error) => {
                tracing::error!(%error, "could not listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(error) => {
                tracing::error!(%error, "could not listen for SIGTERM");
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
}
