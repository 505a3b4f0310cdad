//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use serde_json::Map;
use waypoint_server::infrastructure::dto::websocket::{PlayerRecordDto, PositionUpdateMessage};

use crate::error::ClientError;

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// A command typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum InputCommand {
    /// `LAT LNG` or `LAT,LNG`
    MoveTo { lat: f64, lng: f64 },
    /// `/name NEW`
    Rename(String),
    /// `/quit`
    Quit,
}

/// Parse one input line.
pub fn parse_input(line: &str) -> Result<InputCommand, ClientError> {
    let line = line.trim();

    if line == "/quit" {
        return Ok(InputCommand::Quit);
    }

    if let Some(rest) = line.strip_prefix("/name")
        && (rest.is_empty() || rest.starts_with(char::is_whitespace))
    {
        let name = rest.trim();
        if name.is_empty() {
            return Err(ClientError::InvalidInput("usage: /name NEW_NAME".to_string()));
        }
        return Ok(InputCommand::Rename(name.to_string()));
    }

    if line.starts_with('/') {
        return Err(ClientError::InvalidInput(format!(
            "unknown command '{}' (try /name or /quit)",
            line
        )));
    }

    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [lat, lng] = parts.as_slice() else {
        return Err(ClientError::InvalidInput(format!(
            "expected 'LAT LNG', got '{}'",
            line
        )));
    };

    Ok(InputCommand::MoveTo {
        lat: parse_coordinate(lat, MAX_LATITUDE)?,
        lng: parse_coordinate(lng, MAX_LONGITUDE)?,
    })
}

fn parse_coordinate(value: &str, limit: f64) -> Result<f64, ClientError> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| ClientError::InvalidInput(format!("'{}' is not a number", value)))?;

    if !parsed.is_finite() || parsed.abs() > limit {
        return Err(ClientError::InvalidInput(format!(
            "'{}' is out of range (±{})",
            value, limit
        )));
    }

    Ok(parsed)
}

/// What this client knows about itself across reconnects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub name: Option<String>,
    pub position: Option<(f64, f64)>,
    /// Id assigned by the server for the current connection
    pub connection_id: Option<String>,
}

impl ClientState {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name: name.filter(|name| !name.is_empty()),
            ..Self::default()
        }
    }

    /// Apply a command and report whether a position update should be sent.
    pub fn apply(&mut self, command: &InputCommand) -> bool {
        match command {
            InputCommand::MoveTo { lat, lng } => {
                self.position = Some((*lat, *lng));
                true
            }
            InputCommand::Rename(name) => {
                self.name = Some(name.clone());
                self.position.is_some()
            }
            InputCommand::Quit => false,
        }
    }

    /// The update-position frame for the last known position, if any.
    pub fn position_update(&self) -> Option<PositionUpdateMessage> {
        let (lat, lng) = self.position?;
        Some(PositionUpdateMessage::new(PlayerRecordDto {
            lat: Some(lat),
            lng: Some(lng),
            name: self.name.clone(),
            extra: Map::new(),
        }))
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    let recoverable = matches!(
        error,
        ClientError::ConnectFailed(_) | ClientError::ConnectionLost(_)
    );
    recoverable && current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_space_separated() {
        // テスト項目: 空白区切りの座標が MoveTo として解釈される
        // given (前提条件):
        let line = "35.6812 139.7671";

        // when (操作):
        let result = parse_input(line).unwrap();

        // then (期待する結果):
        assert_eq!(
            result,
            InputCommand::MoveTo {
                lat: 35.6812,
                lng: 139.7671
            }
        );
    }

    #[test]
    fn test_parse_input_comma_separated() {
        // テスト項目: カンマ区切り（空白混在）の座標が MoveTo として解釈される
        // given (前提条件):
        let line = " -33.86, 151.21 ";

        // when (操作):
        let result = parse_input(line).unwrap();

        // then (期待する結果):
        assert_eq!(
            result,
            InputCommand::MoveTo {
                lat: -33.86,
                lng: 151.21
            }
        );
    }

    #[test]
    fn test_parse_input_rejects_out_of_range_latitude() {
        // テスト項目: 範囲外の緯度はエラーになる
        // given (前提条件):
        let line = "91 0";

        // when (操作):
        let result = parse_input(line);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_input_rejects_non_finite() {
        // テスト項目: NaN や無限大はエラーになる
        // given (前提条件):
        let lines = ["NaN 0", "0 inf"];

        // when (操作):
        let results: Vec<_> = lines.iter().map(|line| parse_input(line)).collect();

        // then (期待する結果):
        assert!(
            results
                .iter()
                .all(|result| matches!(result, Err(ClientError::InvalidInput(_))))
        );
    }

    #[test]
    fn test_parse_input_rejects_wrong_arity() {
        // テスト項目: 値が 2 つでない入力はエラーになる
        // given (前提条件):
        let lines = ["1", "1 2 3", "hello world"];

        // when (操作):
        let results: Vec<_> = lines.iter().map(|line| parse_input(line)).collect();

        // then (期待する結果):
        assert!(
            results
                .iter()
                .all(|result| matches!(result, Err(ClientError::InvalidInput(_))))
        );
    }

    #[test]
    fn test_parse_input_commands() {
        // テスト項目: /name と /quit がコマンドとして解釈される
        // given (前提条件):

        // when (操作):
        let rename = parse_input("/name  alice smith ").unwrap();
        let quit = parse_input("/quit").unwrap();

        // then (期待する結果):
        assert_eq!(rename, InputCommand::Rename("alice smith".to_string()));
        assert_eq!(quit, InputCommand::Quit);
    }

    #[test]
    fn test_parse_input_rejects_bad_commands() {
        // テスト項目: 引数のない /name や未知のコマンドはエラーになる
        // given (前提条件):
        let lines = ["/name", "/name   ", "/nameless", "/help"];

        // when (操作):
        let results: Vec<_> = lines.iter().map(|line| parse_input(line)).collect();

        // then (期待する結果):
        assert!(
            results
                .iter()
                .all(|result| matches!(result, Err(ClientError::InvalidInput(_))))
        );
    }

    #[test]
    fn test_client_state_move_requests_update() {
        // テスト項目: 移動コマンドで位置が記録され、送信が要求される
        // given (前提条件):
        let mut state = ClientState::new(Some("alice".to_string()));

        // when (操作):
        let should_send = state.apply(&InputCommand::MoveTo { lat: 1.0, lng: 2.0 });

        // then (期待する結果):
        assert!(should_send);
        let message = state.position_update().unwrap();
        assert_eq!(message.player.lat, Some(1.0));
        assert_eq!(message.player.lng, Some(2.0));
        assert_eq!(message.player.name.as_deref(), Some("alice"));
    }

    #[test]
    fn test_client_state_rename_without_position() {
        // テスト項目: 位置が未設定のまま名前を変えても送信は要求されない
        // given (前提条件):
        let mut state = ClientState::new(None);

        // when (操作):
        let should_send = state.apply(&InputCommand::Rename("bob".to_string()));

        // then (期待する結果):
        assert!(!should_send);
        assert_eq!(state.name.as_deref(), Some("bob"));
        assert!(state.position_update().is_none());
    }

    #[test]
    fn test_client_state_rename_with_position() {
        // テスト項目: 位置がある状態で名前を変えると新しい名前で送信が要求される
        // given (前提条件):
        let mut state = ClientState::new(None);
        state.apply(&InputCommand::MoveTo { lat: 3.0, lng: 4.0 });

        // when (操作):
        let should_send = state.apply(&InputCommand::Rename("carol".to_string()));

        // then (期待する結果):
        assert!(should_send);
        assert_eq!(
            state.position_update().unwrap().player.name.as_deref(),
            Some("carol")
        );
    }

    #[test]
    fn test_client_state_ignores_empty_initial_name() {
        // テスト項目: 空の初期名は未設定として扱われる
        // given (前提条件):

        // when (操作):
        let state = ClientState::new(Some(String::new()));

        // then (期待する結果):
        assert_eq!(state.name, None);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionLost("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 3, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectFailed("refused".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_invalid_input() {
        // テスト項目: 通信以外のエラーでは再接続しない
        // given (前提条件):
        let error = ClientError::InvalidInput("bad".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }
}
