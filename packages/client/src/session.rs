//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use waypoint_server::infrastructure::dto::websocket::{
    MessageType, PlayersUpdateMessage, WelcomeMessage,
};
use waypoint_shared::time::now_millis;

use super::{
    domain::{ClientState, InputCommand, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// A frame received from the server.
enum ServerEvent {
    Welcome(WelcomeMessage),
    PlayersUpdate(PlayersUpdateMessage),
    Unknown,
}

fn parse_server_message(text: &str) -> ServerEvent {
    if let Ok(welcome) = serde_json::from_str::<WelcomeMessage>(text)
        && welcome.r#type == MessageType::Welcome
    {
        return ServerEvent::Welcome(welcome);
    }
    if let Ok(update) = serde_json::from_str::<PlayersUpdateMessage>(text)
        && update.r#type == MessageType::PlayersUpdate
    {
        return ServerEvent::PlayersUpdate(update);
    }
    ServerEvent::Unknown
}

/// Run one WebSocket session until the user quits or the connection ends.
///
/// `Ok(())` means the user asked to leave. The input channel and the client
/// state outlive the session so that a reconnect can pick up where it left off.
pub async fn run_client_session(
    url: &str,
    state: &mut ClientState,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectFailed(e.to_string()))?;

    tracing::info!("Connected to {}", url);
    println!("\nType 'LAT LNG' to move, '/name NEW' to rename, '/quit' to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            message = read.next() => {
                let text = match message {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Server closed the connection");
                        return Err(ClientError::ConnectionLost("closed by server".to_string()));
                    }
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        return Err(ClientError::ConnectionLost(e.to_string()));
                    }
                    Some(Ok(_)) => continue,
                };

                match parse_server_message(text.as_str()) {
                    ServerEvent::Welcome(welcome) => {
                        print!(
                            "{}",
                            MessageFormatter::format_welcome(
                                &welcome.connection_id,
                                &welcome.players,
                                now_millis()
                            )
                        );
                        state.connection_id = Some(welcome.connection_id);

                        // Restore our marker after a reconnect
                        if let Some(update) = state.position_update() {
                            let json = serde_json::to_string(&update)?;
                            write
                                .send(Message::Text(json.into()))
                                .await
                                .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;
                            tracing::info!("Re-sent last known position");
                        }
                    }
                    ServerEvent::PlayersUpdate(update) => {
                        print!(
                            "{}",
                            MessageFormatter::format_players(
                                &update.players,
                                state.connection_id.as_deref(),
                                now_millis()
                            )
                        );
                    }
                    ServerEvent::Unknown => {
                        print!("{}", MessageFormatter::format_raw_message(text.as_str()));
                    }
                }
                redisplay_prompt();
            }
            line = input_rx.recv() => {
                // The readline thread ended (Ctrl+C / Ctrl+D)
                let Some(line) = line else {
                    write.close().await.ok();
                    return Ok(());
                };

                let command = match parse_input(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt();
                        continue;
                    }
                };

                if command == InputCommand::Quit {
                    write.close().await.ok();
                    return Ok(());
                }

                if !state.apply(&command) {
                    println!("Name set. Send a position to appear on the map.");
                    redisplay_prompt();
                    continue;
                }

                let Some(update) = state.position_update() else {
                    continue;
                };
                let json = serde_json::to_string(&update)?;
                write
                    .send(Message::Text(json.into()))
                    .await
                    .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;

                if let Some((lat, lng)) = state.position {
                    print!(
                        "{}",
                        MessageFormatter::format_sent_confirmation(lat, lng, now_millis())
                    );
                }
                redisplay_prompt();
            }
        }
    }
}
