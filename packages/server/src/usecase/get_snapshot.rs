//! UseCase: スナップショット取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{PlayerRepository, Snapshot};

use super::error::GetSnapshotError;

/// 現在のスナップショット取得のユースケース
pub struct GetSnapshotUseCase {
    repository: Arc<dyn PlayerRepository>,
}

impl GetSnapshotUseCase {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Snapshot, GetSnapshotError> {
        Ok(self.repository.snapshot().await?)
    }
}
