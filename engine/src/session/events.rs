use serde::{Deserialize, Serialize};

use crate::board::CellId;
use crate::powerups::PowerupKind;

/// Things that happened since the last `take_events`, for the UI to animate.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PairRemoved { first: usize, second: usize },
    RowsCleared { count: usize },
    NumbersAdded { ids: Vec<CellId> },
    Shuffled,
    HammerUsed { index: usize },
    Undone,
    HintShown { first: usize, second: usize },
    PowerupSpent { kind: PowerupKind, charges_left: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}
