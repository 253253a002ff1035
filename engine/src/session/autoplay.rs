use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

use super::events::GameStatus;
use super::game_session::{BotAction, GameSession};
use crate::bot::{BotResponse, BotWorker};

/// Shared on/off switch for autoplay. Cloned handles see the same flag.
#[derive(Clone, Debug, Default)]
pub struct AutoplayControl {
    active: Arc<AtomicBool>,
}

impl AutoplayControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Returns the new state.
    pub fn toggle(&self) -> bool {
        !self.active.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayOutcome {
    Stopped,
    Finished(GameStatus),
    GaveUp,
}

/// What to do when the search found no pair: break a blocker, shuffle,
/// add numbers below the size ceiling, or give up.
pub fn choose_fallback(session: &GameSession, hammer_target: Option<usize>) -> Option<BotAction> {
    let board = session.board();
    let in_play = board.in_play_count();

    if session.powerups().has_charges() {
        if let Some(target) = hammer_target {
            return Some(BotAction::Hammer(target));
        }
        if in_play >= 2 {
            return Some(BotAction::Shuffle);
        }
    }

    let config = session.config();
    let ceiling = config.autoplay.max_cells.min(config.board.max_cells);
    if in_play > 0 && board.len() < ceiling {
        return Some(BotAction::AddNumbers);
    }
    None
}

/// Plays until the game ends, the bot gives up or `control` is switched off.
/// The control is checked again after every await, and the session is only
/// touched while the bot holds the turn.
pub async fn run_autoplay(
    session: Arc<Mutex<GameSession>>,
    worker: &BotWorker,
    control: &AutoplayControl,
) -> AutoplayOutcome {
    session.lock().await.set_bot_active(true);
    let outcome = play(&session, worker, control).await;
    session.lock().await.set_bot_active(false);
    control.stop();

    crate::log!("Autoplay ended: {:?}", outcome);
    outcome
}

async fn play(
    session: &Mutex<GameSession>,
    worker: &BotWorker,
    control: &AutoplayControl,
) -> AutoplayOutcome {
    let pacing = session.lock().await.config().autoplay.clone();

    loop {
        if !control.is_active() {
            return AutoplayOutcome::Stopped;
        }

        let request = {
            let session = session.lock().await;
            if session.status() != GameStatus::InProgress {
                return AutoplayOutcome::Finished(session.status());
            }
            session.bot_request()
        };

        pause(pacing.think_delay_ms).await;
        if !control.is_active() {
            return AutoplayOutcome::Stopped;
        }

        let response = match worker.find(request).await {
            Ok(response) => response,
            Err(e) => {
                crate::log!("Autoplay lost the bot: {}", e);
                return AutoplayOutcome::Stopped;
            }
        };
        if !control.is_active() {
            return AutoplayOutcome::Stopped;
        }

        let BotResponse::MoveFound {
            best_move,
            hammer_target,
        } = response;

        let delay = {
            let mut session = session.lock().await;
            let action = match best_move {
                Some((idx1, idx2)) => BotAction::Match(idx1, idx2),
                None => match choose_fallback(&session, hammer_target) {
                    Some(action) => action,
                    None => {
                        crate::log!("Bot gives up at {} cells", session.board().len());
                        return AutoplayOutcome::GaveUp;
                    }
                },
            };

            if let Err(e) = session.apply_bot_action(action) {
                crate::log!("Bot action {:?} rejected: {}", action, e);
                return AutoplayOutcome::GaveUp;
            }

            match action {
                BotAction::AddNumbers => pacing.add_lines_delay_ms,
                _ => pacing.action_delay_ms,
            }
        };

        pause(delay).await;
    }
}

async fn pause(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
