//! Player registry
//!
//! 接続中のプレイヤーを ConnectionId ごとに 1 件保持する集合です。
//! エントリは最初の位置更新で作成され、以降の更新で丸ごと置き換えられ、
//! 接続の終了で削除されます。容量制限や TTL はありません。

use std::collections::{BTreeMap, HashMap};

use super::{entity::PlayerRecord, value_object::ConnectionId};

/// Mapping from connection to the last record that connection reported.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: HashMap<ConnectionId, PlayerRecord>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or fully replace the record for `id`.
    ///
    /// The record is stored as-is, including records without coordinates.
    /// Returns the record it replaced, if any.
    pub fn upsert(&mut self, id: ConnectionId, record: PlayerRecord) -> Option<PlayerRecord> {
        self.players.insert(id, record)
    }

    /// Delete the entry for `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<PlayerRecord> {
        self.players.remove(id)
    }

    /// Owned copy of the whole registry at this instant.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            players: self
                .players
                .iter()
                .map(|(id, record)| (id.clone(), record.clone()))
                .collect(),
        }
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.players.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Point-in-time copy of the registry, ordered by connection id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    players: BTreeMap<ConnectionId, PlayerRecord>,
}

impl Snapshot {
    pub fn get(&self, id: &ConnectionId) -> Option<&PlayerRecord> {
        self.players.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConnectionId, &PlayerRecord)> {
        self.players.iter()
    }

    pub fn ids(&self) -> Vec<ConnectionId> {
        self.players.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl FromIterator<(ConnectionId, PlayerRecord)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (ConnectionId, PlayerRecord)>>(iter: T) -> Self {
        Self {
            players: iter.into_iter().collect(),
        }
    }
}
