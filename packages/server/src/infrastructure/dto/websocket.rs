//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged with `type`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    /// server → new client: private full-sync
    Welcome,
    /// server → all clients: full-sync after a mutation
    PlayersUpdate,
    /// client → server: position report
    UpdatePosition,
}

/// Player record as it appears on the wire.
///
/// Absent fields are omitted; unknown fields are carried in `extra` and
/// serialized back alongside the known ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecordDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Players keyed by connection id.
pub type PlayersDto = BTreeMap<String, PlayerRecordDto>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub r#type: MessageType,
    /// Identifier the server assigned to the receiving connection
    pub connection_id: String,
    pub players: PlayersDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayersUpdateMessage {
    pub r#type: MessageType,
    pub players: PlayersDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdateMessage {
    pub r#type: MessageType,
    #[serde(flatten)]
    pub player: PlayerRecordDto,
}

impl PositionUpdateMessage {
    pub fn new(player: PlayerRecordDto) -> Self {
        Self {
            r#type: MessageType::UpdatePosition,
            player,
        }
    }
}
