//! Utilities shared by the Waypoint server and client binaries.

pub mod logger;
pub mod time;
