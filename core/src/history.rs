use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Record of one completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Completion time in epoch milliseconds, bumped when needed to stay unique
    pub id: i64,
    pub seed: String,
    pub difficulty: Difficulty,
    pub moves: u32,
    /// Whole seconds from start to end
    pub time: u64,
    pub date: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn stats(&self) -> GameStats {
        GameStats {
            moves: self.moves,
            time: self.time,
            difficulty: self.difficulty,
        }
    }
}

/// Append-only list of completed games, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Builds and appends the entry for a finished game, returning a copy of it.
    pub fn record(&mut self, state: &GameState, now: DateTime<Utc>) -> HistoryEntry {
        let entry = HistoryEntry {
            id: self.next_id(now),
            seed: state.seed().to_owned(),
            difficulty: state.difficulty(),
            moves: state.move_count(),
            time: state.stats().time,
            date: now,
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        match self.latest() {
            Some(last) if last.id >= candidate => last.id + 1,
            _ => candidate,
        }
    }
}
