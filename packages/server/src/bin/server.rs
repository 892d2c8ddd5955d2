//! Broadcast relay server.
//!
//! Every message received from any client is sent to every connected client,
//! the sender included.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-server
//! cargo run --bin relay-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use relay_server::{
    config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig},
    domain::{ConnectionIdFactory, MembershipRegistry},
    infrastructure::registry::InMemoryMembershipRegistry,
    ui::Server,
    usecase::RelayConnectionUseCase,
};
use relay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relay-server")]
#[command(about = "WebSocket broadcast relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(short = 'l', long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::new(args.host, args.port);

    // Initialize dependencies in order:
    // 1. Registry
    // 2. UseCase
    // 3. Server

    // 1. Membership registry (process-wide, lives as long as the server)
    let registry: Arc<dyn MembershipRegistry> = Arc::new(InMemoryMembershipRegistry::new());

    // 2. Connection lifecycle
    let relay_connection_usecase = Arc::new(RelayConnectionUseCase::new(
        registry.clone(),
        Arc::new(ConnectionIdFactory::new()),
    ));

    // 3. Create and run the server
    let server = Server::new(relay_connection_usecase, registry);
    if let Err(e) = server.run(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
