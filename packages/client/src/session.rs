//! WebSocket client session management.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use relay_shared::{
    time::{format_local_clock, now_millis},
    wire::ChatFrame,
};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// How long to keep printing echoes after half-closing.
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Run one connection to the relay.
///
/// Lines from `input_rx` are sent as chat frames from `name`. When the
/// input channel closes the session half-closes the connection, prints
/// whatever the relay still sends back, and returns `Ok(())`.
///
/// # Errors
///
/// * `ClientError::InvalidUrl` - `url` is not a usable WebSocket URL
/// * `ClientError::ConnectionError` - connecting failed
/// * `ClientError::ConnectionLost` - the connection was up and then went away
pub async fn run_client_session(
    url: &str,
    name: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Url(cause) => {
            tracing::error!("Cannot use '{}': {}", url, cause);
            ClientError::InvalidUrl(url.to_string())
        }
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to relay server!");
    print!("{}", MessageFormatter::format_connected(name));

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming frames
    let name_for_read = name.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match ChatFrame::from_json(&text) {
                        Ok(frame) => MessageFormatter::format_chat_message(
                            &format_local_clock(now_millis()),
                            &frame.sender_identity,
                            &frame.body,
                        ),
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            line = input_rx.recv() => match line {
                Some(body) => {
                    let json = match ChatFrame::new(name, body).to_json() {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("Failed to serialize message: {}", e);
                            continue;
                        }
                    };

                    if let Err(e) = write.send(Message::text(json)).await {
                        read_task.abort();
                        return Err(ClientError::ConnectionLost(e.to_string()));
                    }
                }
                None => {
                    // Half-close: no more messages from this client
                    if let Err(e) = write.close().await {
                        tracing::debug!("Failed to send close frame: {}", e);
                    }
                    if tokio::time::timeout(CLOSE_GRACE, &mut read_task).await.is_err() {
                        read_task.abort();
                    }
                    return Ok(());
                }
            },
            _ = &mut read_task => {
                return Err(ClientError::ConnectionLost("server went away".to_string()));
            }
        }
    }
}
