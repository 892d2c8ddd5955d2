//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    domain::{attempts_after_failure, should_attempt_reconnect},
    session::run_client_session,
    ui::spawn_input_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the relay client with reconnection logic.
///
/// Every reconnection is a brand-new connection as far as the relay is
/// concerned; messages broadcast while disconnected are not replayed.
pub async fn run_client(url: String, name: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut input_rx = spawn_input_reader(&name);
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &name, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // The user left, don't reconnect
                break;
            }
            Err(e) => {
                reconnect_count = attempts_after_failure(&e, reconnect_count);
                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!("{}", e);
                    return Err(Box::new(e));
                }

                tracing::warn!("Session ended: {}", e);
                reconnect_count += 1;

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
