//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// Welcome メッセージを送れなかった
    #[error("failed to send welcome: {0}")]
    WelcomeFailed(#[from] MessagePushError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 位置更新処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdatePositionError {
    /// 切断処理が済んだ接続からの更新
    #[error("connection '{0}' is no longer open")]
    NotConnected(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to broadcast players update: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to broadcast players update: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}

/// スナップショット取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetSnapshotError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
