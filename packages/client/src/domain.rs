//! Domain logic for client-side operations.
//!
//! Pure functions, kept free of I/O so they are easy to test.

use crate::error::ClientError;

/// Line that ends the session.
pub const EXIT_COMMAND: &str = "exit";

/// What to do with one line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Send the line as a message body
    Send(String),
    /// Stop sending and half-close the connection
    Exit,
    /// Nothing to send
    Skip,
}

/// Classify a line read from the terminal.
pub fn parse_input(line: &str) -> InputAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        InputAction::Skip
    } else if trimmed == EXIT_COMMAND {
        InputAction::Exit
    } else {
        InputAction::Send(line.to_string())
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if retrying cannot help (e.g., InvalidUrl), `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_) | ClientError::Input(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The number of reconnection attempts already made
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

/// Reconnection attempts already spent once `error` ended a session.
///
/// A session that got connected and was then lost starts a fresh budget,
/// so only consecutive failures count toward the limit.
pub fn attempts_after_failure(error: &ClientError, current_attempt: u32) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 0,
        _ => current_attempt,
    }
}
