mod hammer;
mod protocol;
mod score;
mod search;
mod worker;

pub use hammer::find_hammer_target;
pub use protocol::{BotRequest, BotResponse, handle_request};
pub use score::{Move, score_move};
pub use search::{find_all_moves, find_best_move};
pub use worker::BotWorker;
