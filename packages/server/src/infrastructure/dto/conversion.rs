//! Conversion logic between DTOs and domain types.

use crate::domain::{Notification, PlayerRecord, Snapshot};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::PlayerRecordDto> for PlayerRecord {
    fn from(dto: dto::PlayerRecordDto) -> Self {
        Self {
            lat: dto.lat,
            lng: dto.lng,
            name: dto.name,
            extra: dto.extra,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<PlayerRecord> for dto::PlayerRecordDto {
    fn from(model: PlayerRecord) -> Self {
        Self {
            lat: model.lat,
            lng: model.lng,
            name: model.name,
            extra: model.extra,
        }
    }
}

/// Snapshot keyed by the string form of each connection id.
pub fn players_to_dto(snapshot: &Snapshot) -> dto::PlayersDto {
    snapshot
        .iter()
        .map(|(id, record)| (id.as_str().to_string(), record.clone().into()))
        .collect()
}

/// Encode a notification as the JSON text frame sent to clients.
pub fn encode_notification(notification: &Notification) -> Result<String, serde_json::Error> {
    match notification {
        Notification::Welcome {
            connection_id,
            snapshot,
        } => serde_json::to_string(&dto::WelcomeMessage {
            r#type: dto::MessageType::Welcome,
            connection_id: connection_id.as_str().to_string(),
            players: players_to_dto(snapshot),
        }),
        Notification::PlayersUpdate(snapshot) => {
            serde_json::to_string(&dto::PlayersUpdateMessage {
                r#type: dto::MessageType::PlayersUpdate,
                players: players_to_dto(snapshot),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionId;
    use serde_json::{Value, json};

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_dto_player_record_to_domain_keeps_extra_fields() {
        // テスト項目: DTO のレコードが未知フィールドを保ったままドメインに変換される
        // given (前提条件):
        let mut extra = serde_json::Map::new();
        extra.insert("accuracy".to_string(), json!(12));
        let dto_record = dto::PlayerRecordDto {
            lat: Some(1.0),
            lng: None,
            name: None,
            extra,
        };

        // when (操作):
        let record: PlayerRecord = dto_record.into();

        // then (期待する結果):
        assert_eq!(record.lat, Some(1.0));
        assert_eq!(record.lng, None);
        assert_eq!(record.extra.get("accuracy"), Some(&json!(12)));
    }

    #[test]
    fn test_encode_welcome() {
        // テスト項目: Welcome 通知が接続 ID と全量スナップショットを含む JSON になる
        // given (前提条件):
        let snapshot: Snapshot = vec![(id("a"), PlayerRecord::new(1.0, 2.0).with_name("x"))]
            .into_iter()
            .collect();
        let notification = Notification::Welcome {
            connection_id: id("b"),
            snapshot,
        };

        // when (操作):
        let text = encode_notification(&notification).unwrap();

        // then (期待する結果):
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "welcome",
                "connection_id": "b",
                "players": {"a": {"lat": 1.0, "lng": 2.0, "name": "x"}}
            })
        );
    }

    #[test]
    fn test_encode_empty_players_update() {
        // テスト項目: 空のスナップショットは空の players として送られる
        // given (前提条件):
        let notification = Notification::PlayersUpdate(Snapshot::default());

        // when (操作):
        let text = encode_notification(&notification).unwrap();

        // then (期待する結果):
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"type": "players-update", "players": {}}));
    }
}
