//! UseCase layer
//!
//! 接続・位置更新・切断それぞれの処理を、Repository と MessagePusher を組み合わせて実装します。
//! 状態を変更してブロードキャストする処理は全て `BroadcastSequencer` を通して直列化されます。

mod connect_player;
mod disconnect_player;
mod error;
mod get_snapshot;
mod sequencer;
mod update_position;

pub use connect_player::ConnectPlayerUseCase;
pub use disconnect_player::DisconnectPlayerUseCase;
pub use error::{ConnectError, DisconnectError, GetSnapshotError, UpdatePositionError};
pub use get_snapshot::GetSnapshotUseCase;
pub use sequencer::BroadcastSequencer;
pub use update_position::UpdatePositionUseCase;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::{
        domain::ConnectionId,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryPlayerRepository,
        },
    };

    use super::BroadcastSequencer;

    pub fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    pub fn create_test_repository() -> Arc<InMemoryPlayerRepository> {
        Arc::new(InMemoryPlayerRepository::default())
    }

    pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
        Arc::new(WebSocketMessagePusher::default())
    }

    pub fn create_test_sequencer() -> Arc<BroadcastSequencer> {
        Arc::new(BroadcastSequencer::new())
    }
}
