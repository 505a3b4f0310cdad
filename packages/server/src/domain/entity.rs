//! Entities

use serde_json::{Map, Value};

/// Last reported state of one connected player.
///
/// Coordinates and label are optional on purpose: the server stores whatever
/// the client sent and leaves it to consumers to decide what is renderable.
/// Fields the server does not know about are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRecord {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub name: Option<String>,
    pub extra: Map<String, Value>,
}

impl PlayerRecord {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Coordinate pair, if both halves are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    pub fn is_renderable(&self) -> bool {
        self.coordinates().is_some()
    }

    /// Display label, treating an empty string as absent.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
