//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::{
    domain::{ClientState, should_attempt_reconnect},
    error::ClientError,
    session::run_client_session,
    ui::PROMPT,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 1;

/// Read lines on a blocking thread and forward them to the async side.
///
/// The thread lives for the whole process so that input typed during a
/// reconnect is not lost.
fn spawn_readline(input_tx: mpsc::UnboundedSender<String>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });
}

/// Run the terminal client with reconnection logic
pub async fn run_client(url: String, name: Option<String>) -> Result<(), ClientError> {
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    spawn_readline(input_tx);

    let mut state = ClientState::new(name);
    let mut reconnect_count = 0;

    loop {
        tracing::info!("Connecting to {}", url);

        let error = match run_client_session(&url, &mut state, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        // A session that got connected starts a fresh round of retries
        if matches!(error, ClientError::ConnectionLost(_)) {
            reconnect_count = 0;
        }
        state.connection_id = None;

        if !should_attempt_reconnect(&error, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Giving up after {} reconnect attempts: {}",
                reconnect_count,
                error
            );
            return Err(error);
        }

        reconnect_count += 1;
        tracing::warn!(
            "{}; reconnecting in {} second(s)... (attempt {}/{})",
            error,
            RECONNECT_INTERVAL_SECS,
            reconnect_count,
            MAX_RECONNECT_ATTEMPTS
        );

        tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
    }
}
