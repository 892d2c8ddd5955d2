//! Terminal I/O for the client.

use std::io::{BufRead, Write};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{
    domain::{InputAction, parse_input},
    error::ClientError,
};

/// Redisplay the prompt after printing a message
pub fn redisplay_prompt(name: &str) {
    print!("{}> ", name);
    std::io::stdout().flush().ok();
}

/// Ask for the sender identity on the terminal.
pub fn prompt_name() -> Result<String, ClientError> {
    print!("Enter your name: ");
    std::io::stdout()
        .flush()
        .map_err(|e| ClientError::Input(e.to_string()))?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| ClientError::Input(e.to_string()))?;

    let name = line.trim();
    if name.is_empty() {
        return Err(ClientError::Input("name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}

/// Read terminal lines on a dedicated thread.
///
/// Each line to send is forwarded on the returned channel. The channel
/// closes when the user types the exit command, presses Ctrl+C / Ctrl+D, or
/// the terminal fails. One reader serves every (re)connection of the process.
pub fn spawn_input_reader(name: &str) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let prompt = format!("{}> ", name);

    // rustyline is synchronous
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => match parse_input(&line) {
                    InputAction::Send(body) => {
                        rl.add_history_entry(body.as_str()).ok();
                        if input_tx.send(body).is_err() {
                            break;
                        }
                    }
                    InputAction::Exit => break,
                    InputAction::Skip => {}
                },
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
