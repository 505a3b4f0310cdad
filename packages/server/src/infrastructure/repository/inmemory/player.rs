//! InMemory Player Repository 実装
//!
//! ドメイン層が定義する PlayerRepository trait の具体的な実装。
//! PlayerRegistry を Mutex で保護し、インメモリ DB として使用します。
//! プロセスの再起動でデータは失われます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, PlayerRecord, PlayerRegistry, PlayerRepository, RepositoryError, Snapshot,
};

/// インメモリ Player Repository 実装
pub struct InMemoryPlayerRepository {
    /// 接続中プレイヤーのレジストリ
    registry: Arc<Mutex<PlayerRegistry>>,
}

impl InMemoryPlayerRepository {
    /// 新しい InMemoryPlayerRepository を作成
    pub fn new(registry: Arc<Mutex<PlayerRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(PlayerRegistry::new())))
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn upsert(
        &self,
        id: ConnectionId,
        record: PlayerRecord,
    ) -> Result<Snapshot, RepositoryError> {
        let mut registry = self.registry.lock().await;
        if registry.upsert(id.clone(), record).is_none() {
            tracing::debug!("Player '{}' added to registry", id);
        }
        Ok(registry.snapshot())
    }

    async fn remove(&self, id: &ConnectionId) -> Result<Snapshot, RepositoryError> {
        let mut registry = self.registry.lock().await;
        if registry.remove(id).is_some() {
            tracing::debug!("Player '{}' removed from registry", id);
        }
        Ok(registry.snapshot())
    }

    async fn snapshot(&self) -> Result<Snapshot, RepositoryError> {
        let registry = self.registry.lock().await;
        Ok(registry.snapshot())
    }

    async fn count_players(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryPlayerRepository の upsert / remove / snapshot
    // - 書き込み系の操作が直後のスナップショットを返すこと
    // - 並行な書き込みで更新が失われないこと
    //
    // 【どのようなシナリオをテストするか】
    // 1. upsert の成功ケース
    // 2. remove の成功ケース
    // 3. 存在しない ID の remove（冪等性）
    // 4. 複数タスクからの同時 upsert
    // ========================================

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_returns_snapshot_after_write() {
        // テスト項目: upsert は書き込み直後のスナップショットを返す
        // given (前提条件):
        let repo = InMemoryPlayerRepository::default();

        // when (操作):
        let snapshot = repo
            .upsert(id("alice"), PlayerRecord::new(1.0, 2.0))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get(&id("alice")),
            Some(&PlayerRecord::new(1.0, 2.0))
        );
        assert_eq!(repo.count_players().await, 1);
    }

    #[tokio::test]
    async fn test_remove_returns_snapshot_without_entry() {
        // テスト項目: remove は削除後のスナップショットを返す
        // given (前提条件):
        let repo = InMemoryPlayerRepository::default();
        repo.upsert(id("alice"), PlayerRecord::new(1.0, 2.0))
            .await
            .unwrap();
        repo.upsert(id("bob"), PlayerRecord::new(3.0, 4.0))
            .await
            .unwrap();

        // when (操作):
        let snapshot = repo.remove(&id("alice")).await.unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.ids(), vec![id("bob")]);
        assert_eq!(repo.count_players().await, 1);
    }

    #[tokio::test]
    async fn test_remove_nonexistent_player() {
        // テスト項目: 存在しないプレイヤーを削除してもエラーにならない（冪等性）
        // given (前提条件):
        let repo = InMemoryPlayerRepository::default();
        repo.upsert(id("alice"), PlayerRecord::new(1.0, 2.0))
            .await
            .unwrap();
        let before = repo.snapshot().await.unwrap();

        // when (操作):
        let result = repo.remove(&id("nonexistent")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(before));
    }

    #[tokio::test]
    async fn test_shared_registry_is_visible_through_repository() {
        // テスト項目: 外部から渡したレジストリの内容がリポジトリから見える
        // given (前提条件):
        let mut registry = PlayerRegistry::new();
        registry.upsert(id("alice"), PlayerRecord::new(1.0, 2.0));
        let repo = InMemoryPlayerRepository::new(Arc::new(Mutex::new(registry)));

        // when (操作):
        let snapshot = repo.snapshot().await.unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.ids(), vec![id("alice")]);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_are_not_lost() {
        // テスト項目: 複数タスクから同時に upsert しても更新が失われない
        // given (前提条件):
        let repo = Arc::new(InMemoryPlayerRepository::default());

        // when (操作):
        let handles: Vec<_> = (0..50)
            .map(|n| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.upsert(id(&format!("conn-{}", n)), PlayerRecord::new(n as f64, 0.0))
                        .await
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        assert_eq!(repo.count_players().await, 50);
    }
}
