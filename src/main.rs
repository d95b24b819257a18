use std::net::SocketAddr;

use pointing_poker::{app, config, http::routes::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    let state = AppState::new();
    let app = app(state);

    let addr: SocketAddr = config::server_addr();
    tracing::info!(%addr, static_dir = %config::static_dir().display(), "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
