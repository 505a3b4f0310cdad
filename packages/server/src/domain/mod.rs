//! Domain layer
//!
//! 位置共有サービスの中核となるモデルを定義します。
//!
//! - `value_object`: ConnectionId など不変の値
//! - `entity`: PlayerRecord
//! - `registry`: 接続中プレイヤーの集合（PlayerRegistry / Snapshot）
//! - `repository` / `message_pusher`: Infrastructure 層が実装する trait

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::PlayerRecord;
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::{MessagePusher, Notification, PusherChannel};
pub use registry::{PlayerRegistry, Snapshot};
pub use repository::PlayerRepository;
pub use value_object::{ConnectionId, ConnectionIdFactory};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
