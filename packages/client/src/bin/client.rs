//! CLI chat client for the Hiroba presence gateway.
//!
//! Connects to the gateway with a session token and sends messages from stdin.
//! Displays ">" prompt and waits for input, then sends with message type
//! "message-from-client". Reconnects on transport failures (max 5 attempts
//! with 5 second interval). A server-side close, such as an eviction by a
//! newer session of the same user, ends the client without reconnecting.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --token <TOKEN>
//! cargo run --bin hiroba-client -- -H 127.0.0.1 -p 8080 -t <TOKEN>
//! ```

use clap::Parser;

use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "CLI chat client for the Hiroba presence gateway", long_about = None)]
struct Args {
    /// Gateway host to connect to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Gateway port to connect to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Session token presented during the WebSocket handshake
    #[arg(short = 't', long)]
    token: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let url = format!("ws://{}:{}/ws", args.host, args.port);

    // Run the client
    if let Err(e) = hiroba_client::run_client(url, args.token).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
