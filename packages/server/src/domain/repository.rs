//! Repository trait 定義
//!
//! ドメイン層が必要とするプレイヤー情報へのアクセスを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, PlayerRecord, RepositoryError, Snapshot};

/// Player Repository trait
///
/// 書き込み系の操作は、同じロックの中で取得した直後のスナップショットを返します。
/// 書き込み途中の状態が読み取られることはありません。
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// レコードを追加または置換し、直後のスナップショットを返す
    async fn upsert(
        &self,
        id: ConnectionId,
        record: PlayerRecord,
    ) -> Result<Snapshot, RepositoryError>;

    /// レコードを削除し（存在しなければ何もしない）、直後のスナップショットを返す
    async fn remove(&self, id: &ConnectionId) -> Result<Snapshot, RepositoryError>;

    /// 現在のスナップショットを取得
    async fn snapshot(&self) -> Result<Snapshot, RepositoryError>;

    /// 登録済みプレイヤー数を取得
    async fn count_players(&self) -> usize;
}
