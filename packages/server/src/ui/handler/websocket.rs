//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    infrastructure::connection::{WebSocketSink, WebSocketSource},
    ui::state::AppState,
};

/// How long the writer may keep flushing queued frames after the connection ended.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // axum runs each upgraded socket on its own task
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives encoded frames from the rx channel and pushes them to the WebSocket sender.
///
/// Once every sender of the channel is gone the task sends a close frame and
/// exits. If a write fails the task exits early, dropping `rx`; from then on
/// sends into the channel fail with `Disconnected`.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.into())).await {
                tracing::debug!("WebSocket write failed, stopping writer: {}", e);
                return;
            }
        }

        if let Err(e) = sender.send(Message::Close(None)).await {
            tracing::debug!("Failed to send close frame: {}", e);
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);

    let sink = Arc::new(WebSocketSink::new(tx));
    let source = WebSocketSource::new(receiver);

    // Read errors are logged by the broadcast loop
    if let Ok(relayed) = state.relay_connection_usecase.execute(sink, source).await {
        tracing::info!("Client closed the stream after {} messages", relayed);
    }

    // The sink left the registry with the connection, so the writer now
    // drains what is queued and closes the socket.
    if tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut send_task)
        .await
        .is_err()
    {
        tracing::warn!("Writer did not finish in time, aborting");
        send_task.abort();
    }
}
