//! HTTP surface for Weather Report.
//!
//! - `GET /` landing page
//! - `GET /api/now` server clock in UTC
//! - `GET /api/weather?city=` current conditions plus a five-day outlook

pub mod error;
pub mod page;
pub mod routes;

pub use error::{ApiError, ErrorBody};
pub use routes::{router, AppState, NowResponse};

use tokio::net::TcpListener;
use wxreport_core::{AppError, Config};

/// Bind the configured address and serve until the process stops
pub async fn run_server(config: &Config) -> Result<(), AppError> {
    let addr = config.server.socket_addr()?;
    let state = AppState::from_config(config)?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("{} listening on http://{}", config.server.app_name, listener.local_addr()?);
    tracing::info!("  Weather: http://{}/api/weather?city=London", addr);

    serve(listener, state).await
}

/// Serve the router on an already bound listener
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), AppError> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}
