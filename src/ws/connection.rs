//! WebSocket connection lifecycle management.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::{extract::State, response::IntoResponse};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::http::routes::AppState;
use crate::room::{ClientEvent, ServerEvent};

pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    // channel for server -> client messages
    let (sv_tx, mut sv_rx) = mpsc::unbounded_channel::<ServerEvent>();
    let conn = state.hub.connect(sv_tx.clone());
    tracing::info!(%conn, "ws connected");

    let writer = tokio::spawn(async move {
        while let Some(event) = sv_rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(err) => {
                    tracing::error!(error = %err, "failed to encode server event");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = ws_rx.next().await {
        match msg {
            Message::Text(txt) => match serde_json::from_str::<ClientEvent>(&txt) {
                Ok(event) => {
                    let _ = state.hub.handle(&conn, event);
                }
                Err(err) => {
                    tracing::warn!(%conn, error = %err, "bad message");
                    let _ = sv_tx.send(ServerEvent::Error { message: format!("Bad message: {}", err) });
                }
            },
            Message::Close(_) => break,
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    state.hub.disconnect(&conn);
    drop(sv_tx);
    // Writer drains what is queued, then ends once every sender is gone.
    let _ = writer.await;
    tracing::info!(%conn, "ws closed");
}
