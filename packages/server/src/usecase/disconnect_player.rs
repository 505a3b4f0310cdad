//! UseCase: プレイヤー切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPlayerUseCase::execute() メソッド
//! - レジストリからの削除と、残りのクライアントへのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 切断したクライアントのエントリが次のブロードキャストに残らないことを保証
//! - 他のエントリが変化しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：位置を送信済みのプレイヤーの切断
//! - エッジケース：一度も位置を送信していない接続の切断、最後の接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notification, PlayerRepository, Snapshot};

use super::{error::DisconnectError, sequencer::BroadcastSequencer};

/// プレイヤー切断のユースケース
pub struct DisconnectPlayerUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PlayerRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<BroadcastSequencer>,
}

impl DisconnectPlayerUseCase {
    /// 新しい DisconnectPlayerUseCase を作成
    pub fn new(
        repository: Arc<dyn PlayerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<BroadcastSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// プレイヤー切断を実行
    ///
    /// 接続を MessagePusher から外し、レジストリから削除してから、
    /// 残りの全クライアントへスナップショットをブロードキャストします。
    /// エントリが存在しない場合も削除は no-op として扱い、ブロードキャストは行います。
    ///
    /// # Returns
    ///
    /// * `Ok(Snapshot)` - ブロードキャストしたスナップショット
    /// * `Err(DisconnectError)` - 削除またはエンコードに失敗
    pub async fn execute(&self, connection_id: ConnectionId) -> Result<Snapshot, DisconnectError> {
        let _guard = self.sequencer.enter().await;

        self.message_pusher.unregister_client(&connection_id).await;
        let snapshot = self.repository.remove(&connection_id).await?;

        let delivered = self
            .message_pusher
            .broadcast(&Notification::PlayersUpdate(snapshot.clone()))
            .await?;
        tracing::debug!(
            "Players update after '{}' left sent to {} clients ({} players)",
            connection_id,
            delivered,
            snapshot.len()
        );

        Ok(snapshot)
    }
}
