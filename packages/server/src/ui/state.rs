//! Shared application state for handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectPlayerUseCase, DisconnectPlayerUseCase, GetSnapshotUseCase, UpdatePositionUseCase,
};

use super::HeartbeatConfig;

/// Shared application state
pub struct AppState {
    pub connect_player_usecase: Arc<ConnectPlayerUseCase>,
    pub update_position_usecase: Arc<UpdatePositionUseCase>,
    pub disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    pub get_snapshot_usecase: Arc<GetSnapshotUseCase>,
    pub heartbeat: HeartbeatConfig,
}
