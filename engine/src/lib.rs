pub mod board;
pub mod bot;
pub mod config;
pub mod history;
pub mod logger;
pub mod persistence;
pub mod powerups;
pub mod rng;
pub mod session;

pub use board::{Board, Cell, CellId, CellStatus, GameMode};
pub use bot::{BotRequest, BotResponse, BotWorker};
pub use config::EngineConfig;
pub use history::{History, HistoryEntry};
pub use powerups::{PowerupKind, Powerups};
pub use rng::SessionRng;
pub use session::{AutoplayControl, AutoplayOutcome, GameSession, GameStatus};
