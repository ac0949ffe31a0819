use serde::{Deserialize, Serialize};

use crate::domain::HistoricalData;

/// Append-only list of closed-period snapshots, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryStore {
    snapshots: Vec<HistoricalData>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: HistoricalData) {
        self.snapshots.push(snapshot);
    }

    /// Snapshots in closing order, oldest first.
    pub fn snapshots(&self) -> &[HistoricalData] {
        &self.snapshots
    }

    pub fn last(&self) -> Option<&HistoricalData> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drops all snapshots. Used when a demo environment is reseeded.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
