//! Feed WebSocket en vivo
//!
//! Cada conexión se suscribe al BroadcastHub y reenvía los eventos al
//! socket. Los frames entrantes se aceptan como keep-alive; cualquier
//! error de envío o cierre remoto termina solo esa conexión.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::services::broadcast_service::BroadcastHub;
use crate::state::AppState;

pub fn create_ws_router() -> Router<AppState> {
    Router::new().route("/location", get(location_ws))
}

async fn location_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.hub.clone()))
}

async fn handle_socket(socket: WebSocket, hub: BroadcastHub) {
    let mut rx = hub.subscribe();
    log::info!("✅ WebSocket conectado. Total: {}", hub.subscriber_count());

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("⚠️ WebSocket atrasado, {} eventos perdidos", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            inbound = receiver.next() => match inbound {
                // Keep-alive del cliente; el contenido no importa
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }

    drop(rx);
    log::info!(
        "❌ WebSocket desconectado. Quedan: {}",
        hub.subscriber_count()
    );
}
