//! Real-time planning-poker server: rooms, admin election, reveal statistics.

use axum::{http::Method, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod config;
pub mod http;
pub mod room;
pub mod telemetry;
pub mod util;
pub mod ws;

use crate::http::routes::{self, AppState};

/// Build the application router. Unknown paths fall through to the static
/// client in [`config::static_dir`].
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/ws", get(ws::connection::ws_handler))
        .fallback_service(ServeDir::new(config::static_dir()))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
