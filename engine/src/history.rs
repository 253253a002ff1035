use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::{Board, CellId, CellStatus, SavedCell};
use crate::powerups::{PowerupKind, Powerups};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub index: usize,
    pub previous_status: CellStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedRow {
    /// Cell index of the first cell of the row before it was removed.
    pub original_index: usize,
    pub cells: Vec<SavedCell>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HistoryEntry {
    Match { changes: Vec<StatusChange> },
    Add { ids: Vec<CellId> },
    Clean { removed_rows: Vec<RemovedRow> },
    Shuffle { values: Vec<u8> },
    PowerupUsage { kind: PowerupKind },
}

/// Bounded undo log. Once `capacity` entries are stored the oldest one is
/// dropped, so undo depth is limited to that window. A match that clears no
/// row still pushes a speculative clean entry before popping it, so at
/// capacity that push costs one real entry and the depth settles at
/// `capacity - 1`.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(128)),
            capacity: capacity.max(1),
        }
    }

    /// Call right before the cells change status.
    pub fn record_match(&mut self, board: &Board, indices: &[usize]) {
        let changes = indices
            .iter()
            .filter_map(|&index| {
                board.get(index).map(|cell| StatusChange {
                    index,
                    previous_status: cell.status,
                })
            })
            .collect();
        self.push(HistoryEntry::Match { changes });
    }

    pub fn record_add(&mut self, ids: Vec<CellId>) {
        self.push(HistoryEntry::Add { ids });
    }

    /// Call right before compaction. When compaction then removes nothing the
    /// caller pops this entry again.
    pub fn record_clean(&mut self, board: &Board) {
        let width = board.row_width();
        let removed_rows = board
            .empty_rows()
            .into_iter()
            .map(|row| {
                let original_index = row * width;
                let cells = board.cells()[original_index..original_index + width]
                    .iter()
                    .map(|c| c.to_saved())
                    .collect();
                RemovedRow {
                    original_index,
                    cells,
                }
            })
            .collect();
        self.push(HistoryEntry::Clean { removed_rows });
    }

    pub fn record_shuffle(&mut self, board: &Board) {
        self.push(HistoryEntry::Shuffle {
            values: board.values(),
        });
    }

    /// Pushed after the entries of the action the powerup paid for.
    pub fn record_powerup_usage(&mut self, kind: PowerupKind) {
        self.push(HistoryEntry::PowerupUsage { kind });
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    /// Reverts the most recent step. Returns false when there is nothing to
    /// undo.
    pub fn undo(&mut self, board: &mut Board, powerups: &mut Powerups) -> bool {
        match self.entries.pop_back() {
            Some(entry) => {
                self.revert(entry, board, powerups);
                true
            }
            None => false,
        }
    }

    fn revert(&mut self, entry: HistoryEntry, board: &mut Board, powerups: &mut Powerups) {
        match entry {
            HistoryEntry::Match { changes } => {
                for change in changes {
                    // selection is transient and never comes back
                    let status = match change.previous_status {
                        CellStatus::Selected => CellStatus::Active,
                        status => status,
                    };
                    board.set_status(change.index, status);
                }
                board.rebuild_links();
            }
            HistoryEntry::Add { ids } => {
                board.remove_ids(&ids);
                board.rebuild_links();
            }
            HistoryEntry::Clean { mut removed_rows } => {
                removed_rows.sort_by_key(|row| row.original_index);
                for row in &removed_rows {
                    board.insert_cells(row.original_index, &row.cells);
                }
                board.rebuild_links();
            }
            HistoryEntry::Shuffle { values } => {
                board.set_values(&values);
            }
            HistoryEntry::PowerupUsage { kind } => {
                powerups.refund(kind);
                self.revert_paid_action(board, powerups);
            }
        }
    }

    /// Unwinds the action a powerup paid for, including the rows it cleared.
    fn revert_paid_action(&mut self, board: &mut Board, powerups: &mut Powerups) {
        while let Some(entry) = self.entries.pop_back() {
            let is_clean = matches!(entry, HistoryEntry::Clean { .. });
            self.revert(entry, board, powerups);
            if !is_clean {
                break;
            }
        }
    }

    fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Replaces the log with persisted entries, keeping the newest ones that
    /// fit.
    pub fn restore(&mut self, entries: Vec<HistoryEntry>) {
        self.entries.clear();
        let skip = entries.len().saturating_sub(self.capacity);
        self.entries.extend(entries.into_iter().skip(skip));
    }
}
