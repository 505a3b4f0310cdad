//! UseCase: プレイヤー接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectPlayerUseCase::execute() メソッド
//! - 接続 ID の払い出しと Welcome（全量スナップショット）の個別送信
//!
//! ### なぜこのテストが必要か
//! - 新規クライアントが最初に受け取るメッセージは接続時点のスナップショットでなければならない
//! - 接続しただけではレジストリにエントリが作られないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のレジストリ / 既存プレイヤーがいるレジストリへの接続
//! - 異常系：Welcome 送信前にクライアントの受信側が閉じている
//! - 並行：位置更新が続いている最中の多数の同時接続

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionIdFactory, MessagePusher, Notification, PlayerRepository,
    PusherChannel,
};

use super::{error::ConnectError, sequencer::BroadcastSequencer};

/// プレイヤー接続のユースケース
pub struct ConnectPlayerUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn PlayerRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<BroadcastSequencer>,
}

impl ConnectPlayerUseCase {
    /// 新しい ConnectPlayerUseCase を作成
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

    /// プレイヤー接続を実行
    ///
    /// 新しい接続 ID を払い出し、`sender` を MessagePusher に登録したうえで、
    /// 現在のスナップショットを Welcome としてこの接続だけに送ります。
    /// 登録と Welcome の送信はシーケンサの中で行われるため、Welcome より古い
    /// ブロードキャストが届くことも、以降のブロードキャストを取りこぼすこともありません。
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 接続成功（払い出した接続 ID）
    /// * `Err(ConnectError)` - Welcome を送れなかった（登録は取り消される）
    pub async fn execute(&self, sender: PusherChannel) -> Result<ConnectionId, ConnectError> {
        let connection_id = ConnectionIdFactory::generate();

        let _guard = self.sequencer.enter().await;

        let snapshot = self.repository.snapshot().await?;
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        let welcome = Notification::Welcome {
            connection_id: connection_id.clone(),
            snapshot,
        };
        if let Err(e) = self.message_pusher.push_to(&connection_id, &welcome).await {
            self.message_pusher.unregister_client(&connection_id).await;
            return Err(e.into());
        }

        Ok(connection_id)
    }
}
