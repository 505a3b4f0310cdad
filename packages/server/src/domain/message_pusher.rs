//! MessagePusher trait 定義
//!
//! 接続中のクライアントへの通知（個別送信・全体送信）を抽象化します。
//! どのようなワイヤーフォーマットで送るかは Infrastructure 層の実装が決めます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, Snapshot};

/// Outbound channel of one connection; the UI layer drains it into the socket.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Messages the server sends to clients.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Private full-sync sent once to a newly accepted connection.
    Welcome {
        connection_id: ConnectionId,
        snapshot: Snapshot,
    },
    /// Full-sync sent to every open connection after each mutation.
    PlayersUpdate(Snapshot),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, id: &ConnectionId);

    /// クライアントが登録済み（接続中）かどうか
    async fn is_registered(&self, id: &ConnectionId) -> bool;

    /// 特定のクライアントへ送信
    async fn push_to(
        &self,
        id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 登録済みの全クライアントへ送信し、送信できた件数を返す
    ///
    /// 一部のクライアントへの送信失敗は許容されます（ログのみ）。
    async fn broadcast(&self, notification: &Notification) -> Result<usize, MessagePushError>;

    /// 登録済みのクライアント数
    async fn count_clients(&self) -> usize;
}
