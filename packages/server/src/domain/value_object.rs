//! Value Objects

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Server-assigned identifier of one WebSocket connection.
///
/// Opaque to clients. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates fresh connection identifiers.
///
/// UUID v4 values, so an identifier is not handed out again after its
/// connection closes.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().simple().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_connection_id_rejects_empty_string() {
        // テスト項目: 空文字列からは ConnectionId を生成できない
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyConnectionId));
    }

    #[test]
    fn test_connection_id_keeps_value() {
        // テスト項目: 与えた文字列がそのまま保持される
        // given (前提条件):
        let value = "abc123".to_string();

        // when (操作):
        let id = ConnectionId::try_from(value).unwrap();

        // then (期待する結果):
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(id.into_string(), "abc123");
    }

    #[test]
    fn test_factory_generates_unique_ids() {
        // テスト項目: Factory が毎回異なる ID を生成する
        // given (前提条件):
        let count = 1000;

        // when (操作):
        let ids: HashSet<ConnectionId> =
            (0..count).map(|_| ConnectionIdFactory::generate()).collect();

        // then (期待する結果):
        assert_eq!(ids.len(), count);
        assert!(ids.iter().all(|id| !id.as_str().is_empty()));
    }
}
