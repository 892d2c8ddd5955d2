//! Terminal client for the broadcast relay.
//!
//! Sends each typed line to the relay and prints everything the relay
//! broadcasts, including this client's own messages. Type `exit` to leave.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-client -- --name Alice
//! cargo run --bin relay-client -- -n Bob -u ws://127.0.0.1:50051/ws
//! ```

use clap::Parser;

use relay_client::ui::prompt_name;
use relay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relay-client")]
#[command(about = "Terminal client for the WebSocket broadcast relay", long_about = None)]
struct Args {
    /// Name attached to every message you send (prompted when omitted)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// WebSocket URL of the relay
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:50051/ws")]
    url: String,

    /// Default log level when RUST_LOG is not set
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let name = match args.name {
        Some(name) => name,
        None => match prompt_name() {
            Ok(name) => name,
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        },
    };

    // Run the client
    if let Err(e) = relay_client::run_client(args.url, name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
