mod arena;
mod cell;
mod generate;
mod levels;
pub mod rules;

pub use arena::Board;
pub use cell::{Cell, CellId, CellSnapshot, CellStatus, Links, SavedCell};
pub use generate::{CLASSIC_SEQUENCE, GameMode, parse_level_pattern};
pub use levels::{Level, LevelCatalog};
pub use rules::{can_match, find_hint, find_neighbors, values_match};
