//! Message formatting utilities for client display.

use waypoint_server::{domain::PlayerRecord, infrastructure::dto::websocket::PlayersDto};
use waypoint_shared::time::timestamp_to_rfc3339;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the welcome snapshot received right after connecting.
    pub fn format_welcome(connection_id: &str, players: &PlayersDto, received_at: i64) -> String {
        format!(
            "\nConnected as {}\n{}",
            connection_id,
            Self::format_players(players, Some(connection_id), received_at)
        )
    }

    /// Format a full players snapshot.
    ///
    /// Players without both coordinates are not listed; only their count is
    /// shown.
    pub fn format_players(players: &PlayersDto, me: Option<&str>, received_at: i64) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        output.push_str(&format!(
            "Players at {}:\n",
            format_timestamp(received_at)
        ));

        let (placed, unplaced): (Vec<_>, Vec<_>) = players
            .iter()
            .map(|(connection_id, player)| (connection_id, PlayerRecord::from(player.clone())))
            .partition(|(_, record)| record.is_renderable());

        for (connection_id, record) in &placed {
            let Some((lat, lng)) = record.coordinates() else {
                continue;
            };
            let me_suffix = if me == Some(connection_id.as_str()) {
                " (me)"
            } else {
                ""
            };
            output.push_str(&format!(
                "{}{}{} @ {:.6}, {:.6}\n",
                connection_id,
                me_suffix,
                format_name(record),
                lat,
                lng
            ));
        }

        if placed.is_empty() {
            output.push_str("(No players on the map)\n");
        }
        if !unplaced.is_empty() {
            output.push_str(&format!("+{} without a position\n", unplaced.len()));
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a confirmation after sending a position
    pub fn format_sent_confirmation(lat: f64, lng: f64, sent_at: i64) -> String {
        format!(
            "sent {:.6}, {:.6} at {}\n",
            lat,
            lng,
            format_timestamp(sent_at)
        )
    }

    /// Format a server text frame that is not a known message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

fn format_name(record: &PlayerRecord) -> String {
    record
        .display_name()
        .map(|name| format!(" \"{}\"", name))
        .unwrap_or_default()
}

fn format_timestamp(timestamp_millis: i64) -> String {
    timestamp_to_rfc3339(timestamp_millis).unwrap_or_else(|| "-".to_string())
}
