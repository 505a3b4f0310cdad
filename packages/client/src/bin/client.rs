//! Terminal client for the Waypoint location sharing server.
//!
//! Prints every players snapshot the server broadcasts and sends the
//! positions typed at the prompt. Reconnects automatically on connection
//! loss (max 5 attempts, 1 second apart) and re-sends the last position.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin waypoint-client -- --name alice
//! cargo run --bin waypoint-client -- -u ws://example.com:3000/ws
//! ```

use clap::Parser;

use waypoint_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "waypoint-client")]
#[command(about = "Terminal client for real-time location sharing", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Display name shown to other players
    #[arg(short = 'n', long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = waypoint_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
