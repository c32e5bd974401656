//! HTTP facade for the exercise tracker.
//!
//! Translates HTTP requests into [`tracker_core::Tracker`] calls and shapes
//! the responses.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use tokio::net::TcpListener;
use tracing::info;
use tracker_core::config::ServerConfig;
use tracker_core::Tracker;

pub use crate::error::{ApiError, ApiResult};
pub use crate::routes::create_router;
pub use crate::state::AppState;

/// Bind the configured address and serve until the process is stopped
pub async fn serve(tracker: Tracker, config: ServerConfig) -> tracker_core::Result<()> {
    let listener = TcpListener::bind(config.socket_addr()).await?;
    let app = create_router(AppState::new(tracker, config));

    info!("Server is running on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
