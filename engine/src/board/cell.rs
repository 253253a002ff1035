use serde::{Deserialize, Serialize};

/// Stable identity of a cell; survives compaction and reordering.
pub type CellId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellStatus {
    Active,
    Selected,
    Crossed,
}

/// Index links to the nearest cells still in play. Stale for crossed cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Links {
    pub prev: Option<usize>,
    pub next: Option<usize>,
    pub up: Option<usize>,
    pub down: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub id: CellId,
    pub value: u8,
    pub status: CellStatus,
    pub links: Links,
}

impl Cell {
    pub fn new(id: CellId, value: u8) -> Self {
        // value 0 is an inert placeholder and never enters play
        let status = if value == 0 {
            CellStatus::Crossed
        } else {
            CellStatus::Active
        };
        Self {
            id,
            value,
            status,
            links: Links::default(),
        }
    }

    /// Active or selected.
    pub fn is_in_play(&self) -> bool {
        self.status != CellStatus::Crossed
    }

    pub fn is_crossed(&self) -> bool {
        self.status == CellStatus::Crossed
    }

    pub fn to_saved(&self) -> SavedCell {
        SavedCell {
            id: self.id,
            value: self.value,
            status: self.status,
        }
    }

    pub fn to_snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            id: self.id,
            value: self.value,
            status: self.status,
            prev: self.links.prev,
            next: self.links.next,
            up: self.links.up,
            down: self.links.down,
        }
    }
}

/// Minimized persisted form: identity, value and status only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCell {
    pub id: CellId,
    pub value: u8,
    pub status: CellStatus,
}

impl From<SavedCell> for Cell {
    fn from(saved: SavedCell) -> Self {
        Self {
            id: saved.id,
            value: saved.value,
            status: saved.status,
            links: Links::default(),
        }
    }
}

/// Plain-data copy of a cell including its links, sent to the bot worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub id: CellId,
    pub value: u8,
    pub status: CellStatus,
    pub prev: Option<usize>,
    pub next: Option<usize>,
    pub up: Option<usize>,
    pub down: Option<usize>,
}

impl From<CellSnapshot> for Cell {
    fn from(snapshot: CellSnapshot) -> Self {
        Self {
            id: snapshot.id,
            value: snapshot.value,
            status: snapshot.status,
            links: Links {
                prev: snapshot.prev,
                next: snapshot.next,
                up: snapshot.up,
                down: snapshot.down,
            },
        }
    }
}
