//! Server execution logic.

use std::sync::Arc;

use axum::{Router, http::Method, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{
    ConnectPlayerUseCase, DisconnectPlayerUseCase, GetSnapshotUseCase, UpdatePositionUseCase,
};

use super::{
    config::ServerConfig,
    handler::{debug_players, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Location sharing server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_player_usecase,
///     update_position_usecase,
///     disconnect_player_usecase,
///     get_snapshot_usecase,
///     ServerConfig::default(),
/// );
/// server.run().await?;
/// ```
pub struct Server {
    connect_player_usecase: Arc<ConnectPlayerUseCase>,
    update_position_usecase: Arc<UpdatePositionUseCase>,
    disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    get_snapshot_usecase: Arc<GetSnapshotUseCase>,
    config: ServerConfig,
}

impl Server {
    pub fn new(
        connect_player_usecase: Arc<ConnectPlayerUseCase>,
        update_position_usecase: Arc<UpdatePositionUseCase>,
        disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
        get_snapshot_usecase: Arc<GetSnapshotUseCase>,
        config: ServerConfig,
    ) -> Self {
        Self {
            connect_player_usecase,
            update_position_usecase,
            disconnect_player_usecase,
            get_snapshot_usecase,
            config,
        }
    }

    /// Build the axum router without binding a listener.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            connect_player_usecase: self.connect_player_usecase.clone(),
            update_position_usecase: self.update_position_usecase.clone(),
            disconnect_player_usecase: self.disconnect_player_usecase.clone(),
            get_snapshot_usecase: self.get_snapshot_usecase.clone(),
            heartbeat: self.config.heartbeat,
        });

        // TODO: restrict origins once the map frontend has a fixed host
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST]);

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(health_check))
            .route("/debug/players", get(debug_players))
            .with_state(app_state)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Location sharing server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
