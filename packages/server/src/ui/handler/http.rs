//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::{conversion::players_to_dto, websocket::PlayersDto},
    ui::state::AppState,
};

pub const HEALTH_CHECK_BODY: &str = "Server is running!";

/// Health check endpoint
pub async fn health_check() -> &'static str {
    HEALTH_CHECK_BODY
}

/// Debug endpoint to get the current players (for testing purposes)
pub async fn debug_players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PlayersDto>, StatusCode> {
    match state.get_snapshot_usecase.execute().await {
        Ok(snapshot) => Ok(Json(players_to_dto(&snapshot))),
        Err(e) => {
            tracing::error!("Failed to read players: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
