mod autoplay;
mod events;
mod game_session;

pub use autoplay::{AutoplayControl, AutoplayOutcome, choose_fallback, run_autoplay};
pub use events::{GameEvent, GameStatus};
pub use game_session::{BotAction, ClickOutcome, GameSession, TurnState};
