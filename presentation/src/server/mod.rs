//! HTTP boundary
//!
//! Accepts multipart uploads on `POST /api/`, runs one ensemble request
//! per call and maps core failures to `{error, details}` responses.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::ApiError;
pub use router::create_router;

use axum::Router;
use quorum_application::RunEnsembleUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub ensemble: Arc<RunEnsembleUseCase>,
}

impl AppState {
    pub fn new(ensemble: Arc<RunEnsembleUseCase>) -> Self {
        Self { ensemble }
    }
}

/// Serve until Ctrl-C
pub async fn serve(router: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening for ensemble requests");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Could not install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
