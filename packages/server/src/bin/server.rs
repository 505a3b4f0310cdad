//! Real-time location sharing server.
//!
//! Clients connect to `/ws`, report their position, and receive the full set of
//! connected players after every update or disconnect.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin waypoint-server
//! cargo run --bin waypoint-server -- --host 127.0.0.1 --port 5000
//! PORT=5000 cargo run --bin waypoint-server
//! ```

use std::{collections::HashMap, sync::Arc, time::Duration};

use clap::Parser;
use tokio::sync::Mutex;
use waypoint_server::{
    domain::PlayerRegistry,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryPlayerRepository},
    ui::{HeartbeatConfig, Server, ServerConfig},
    usecase::{
        BroadcastSequencer, ConnectPlayerUseCase, DisconnectPlayerUseCase, GetSnapshotUseCase,
        UpdatePositionUseCase,
    },
};
use waypoint_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "waypoint-server")]
#[command(about = "Real-time location sharing server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Seconds between WebSocket pings sent to each client
    #[arg(
        long,
        env = "PING_INTERVAL_SECS",
        default_value = "25",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ping_interval_secs: u64,

    /// Seconds without any frame from a client before its connection is dropped
    #[arg(
        long,
        env = "LIVENESS_TIMEOUT_SECS",
        default_value = "60",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    liveness_timeout_secs: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            heartbeat: HeartbeatConfig {
                ping_interval: Duration::from_secs(args.ping_interval_secs),
                liveness_timeout: Duration::from_secs(args.liveness_timeout_secs),
            },
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases (sharing one sequencer)
    // 4. Server

    // 1. Create Repository (in-memory registry)
    let registry = Arc::new(Mutex::new(PlayerRegistry::new()));
    let repository = Arc::new(InMemoryPlayerRepository::new(registry));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create UseCases
    let sequencer = Arc::new(BroadcastSequencer::new());
    let connect_player_usecase = Arc::new(ConnectPlayerUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        sequencer.clone(),
    ));
    let update_position_usecase = Arc::new(UpdatePositionUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        sequencer.clone(),
    ));
    let disconnect_player_usecase = Arc::new(DisconnectPlayerUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        sequencer,
    ));
    let get_snapshot_usecase = Arc::new(GetSnapshotUseCase::new(repository));

    // 4. Create and run the server
    let server = Server::new(
        connect_player_usecase,
        update_position_usecase,
        disconnect_player_usecase,
        get_snapshot_usecase,
        args.into(),
    );
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
