//! UseCase: 位置更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdatePositionUseCase::execute() メソッド
//! - レジストリへの upsert と、送信者を含む全クライアントへのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 全ての観測者が同じ順序でスナップショットを受け取ることを保証する
//! - 同時に届いた更新が失われないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：更新とブロードキャスト
//! - エッジケース：座標のない更新、複数タスクからの同時更新
//! - 異常系：Repository のエラー（ブロードキャストされない）
//! - 異常系：切断処理の後に届いた更新（レジストリに戻らない）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PlayerRecord, PlayerRepository, Snapshot,
};

use super::{error::UpdatePositionError, sequencer::BroadcastSequencer};

/// 位置更新のユースケース
pub struct UpdatePositionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PlayerRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<BroadcastSequencer>,
}

impl UpdatePositionUseCase {
    /// 新しい UpdatePositionUseCase を作成
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

    /// 位置更新を実行
    ///
    /// `record` は検証せずにそのまま保存されます（座標の欠けたレコードも含む）。
    /// MessagePusher から登録解除済みの接続（切断処理が済んだ接続）からの更新は
    /// 保存せずに捨てます。
    ///
    /// # Returns
    ///
    /// * `Ok(Snapshot)` - ブロードキャストしたスナップショット
    /// * `Err(UpdatePositionError)` - 接続が閉じている、または保存・エンコードに失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        record: PlayerRecord,
    ) -> Result<Snapshot, UpdatePositionError> {
        let _guard = self.sequencer.enter().await;

        if !self.message_pusher.is_registered(&connection_id).await {
            return Err(UpdatePositionError::NotConnected(
                connection_id.into_string(),
            ));
        }

        let snapshot = self.repository.upsert(connection_id.clone(), record).await?;

        let delivered = self
            .message_pusher
            .broadcast(&Notification::PlayersUpdate(snapshot.clone()))
            .await?;
        tracing::debug!(
            "Players update after '{}' sent to {} clients ({} players)",
            connection_id,
            delivered,
            snapshot.len()
        );

        Ok(snapshot)
    }
}
