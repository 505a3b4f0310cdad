//! UI utilities for the client.

use std::io::Write;

pub const PROMPT: &str = "waypoint> ";

/// Redisplay the prompt after printing server output
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}
