//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// ConnectionId が空文字列
    #[error("connection id must not be empty")]
    EmptyConnectionId,
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// ストレージが利用できない
    #[error("player store unavailable: {0}")]
    Unavailable(String),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のクライアントが登録されていない
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗した（受信側が既に閉じている）
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// 送信メッセージのエンコードに失敗した
    #[error("failed to encode message: {0}")]
    EncodeFailed(String),
}
