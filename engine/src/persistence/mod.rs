mod save_store;
mod saved_game;
mod statistics;

pub use save_store::SaveStore;
pub use saved_game::SavedGame;
pub use statistics::{ModeStatistics, Statistics, StatisticsStore};
