use serde::{Deserialize, Serialize};

use crate::board::{CellId, GameMode, SavedCell};
use crate::history::HistoryEntry;

/// Everything needed to bring a session back: cells without links, the
/// undo log, the id counter and the powerup pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub cells: Vec<SavedCell>,
    /// Elapsed play time in seconds.
    pub time: u64,
    pub mode: GameMode,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    pub next_id: CellId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_id: Option<String>,
    pub powerups: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellStatus;

    #[test]
    fn test_yaml_shape() {
        let saved = SavedGame {
            cells: vec![SavedCell {
                id: 0,
                value: 7,
                status: CellStatus::Active,
            }],
            time: 42,
            mode: GameMode::Easy,
            history: vec![HistoryEntry::Add { ids: vec![0] }],
            next_id: 1,
            level_id: None,
            powerups: 2,
        };

        let yaml = serde_yaml_ng::to_string(&saved).unwrap();

        assert!(yaml.contains("mode: easy"));
        assert!(yaml.contains("type: add"));
        assert!(!yaml.contains("level_id"));
        assert_eq!(serde_yaml_ng::from_str::<SavedGame>(&yaml).unwrap(), saved);
    }

    #[test]
    fn test_missing_history_defaults_to_empty() {
        let yaml = "cells: []\ntime: 0\nmode: classic\nnext_id: 0\npowerups: 3\n";

        let saved: SavedGame = serde_yaml_ng::from_str(yaml).unwrap();

        assert!(saved.history.is_empty());
        assert_eq!(saved.level_id, None);
    }
}
