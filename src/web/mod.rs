//! The Ping App web frontend

use std::num::NonZeroU16;

use axum::Router;
use tower_http::services::ServeDir;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::{error, info};

use crate::constants::SESSION_INACTIVITY_SECONDS;
use crate::ping::PingClient;

mod csrf;
mod prelude;
mod runs;
mod views;

use runs::RunRegistry;
use views::{index_handler, status_handler, submit_handler};

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    client: PingClient,
    runs: RunRegistry,
}

impl AppState {
    fn new(client: PingClient) -> Self {
        Self {
            client,
            runs: RunRegistry::default(),
        }
    }
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            axum::routing::get(index_handler).post(submit_handler),
        )
        .route("/status", axum::routing::get(status_handler))
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
}

/// The full application with sessions attached.
fn build_app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            SESSION_INACTIVITY_SECONDS,
        )));
    create_router().with_state(state).layer(session_layer)
}

/// Serve the app on `listen_addr:port`, pinging through `client`.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    client: PingClient,
) -> Result<(), anyhow::Error> {
    info!("Pinging through {}", client.endpoint());
    let app = build_app(AppState::new(client));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
    Ok(())
}
