use crate::{AppState, Heartbeat, Result as RelayResult, ShutdownGuard};

use axum::extract::{
    State,
    ws::{Message, WebSocket, WebSocketUpgrade},
};
use axum::response::Response;
use fanout_core::Subscription;
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};

/// GET /v1/heartbeats/stream - upgrade and stream raw heartbeats as JSON text frames
pub async fn handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let subscription = match state.broadcaster.subscribe_default().await {
        Ok(subscription) => subscription,
        Err(e) => {
            error!("Rejecting heartbeat stream: {e}");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    let id = subscription.id();
    info!("Heartbeat stream opened for client {id}");

    let result = forward(socket, subscription, state.shutdown.subscribe_guard()).await;

    // The stream owns the subscription's lifetime; the broadcaster never reaps it.
    state.broadcaster.unsubscribe(id).await;

    match result {
        Ok(()) => info!("Heartbeat stream closed for client {id}"),
        Err(e) => warn!("Heartbeat stream for client {id} ended with error: {e}"),
    }
}

/// Forward heartbeats until the peer closes, a send fails, or shutdown fires
async fn forward(
    socket: WebSocket,
    mut subscription: Subscription<Heartbeat>,
    mut shutdown: ShutdownGuard,
) -> RelayResult<()> {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    loop {
        tokio::select! {
            heartbeat = subscription.recv() => {
                let Some(heartbeat) = heartbeat else {
                    // Unsubscribed elsewhere, so no more heartbeats will arrive
                    let _ = ws_sender.send(Message::Close(None)).await;
                    return Ok(());
                };
                let text = serde_json::to_string(heartbeat.as_ref())?;
                ws_sender.send(Message::Text(text.into())).await?;
            }

            incoming = ws_receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => return Ok(()),
                Some(Ok(_)) => {
                    debug!("Ignoring client frame on heartbeat stream {}", subscription.id());
                }
                Some(Err(e)) => return Err(e.into()),
            },

            _ = shutdown.wait() => {
                let _ = ws_sender.send(Message::Close(None)).await;
                return Ok(());
            }
        }
    }
}
