use super::events::{GameEvent, GameStatus};
use crate::board::rules::{can_match, find_hint, find_neighbors};
use crate::board::{Board, CellStatus, GameMode, LevelCatalog};
use crate::bot::BotRequest;
use crate::config::EngineConfig;
use crate::history::History;
use crate::persistence::SavedGame;
use crate::powerups::{PowerupKind, Powerups};
use crate::rng::SessionRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingSecondSelection { selected: usize },
    /// The bot owns the board; human input is refused.
    Resolving,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// `neighbors` are the cells worth highlighting as partners.
    Selected { index: usize, neighbors: Vec<usize> },
    Deselected { index: usize },
    Matched { first: usize, second: usize },
}

/// What the bot decided to do with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotAction {
    Match(usize, usize),
    Hammer(usize),
    Shuffle,
    AddNumbers,
}

/// Owns the board, its history and the powerup pool, and is the only place
/// where any of them change.
pub struct GameSession {
    config: EngineConfig,
    board: Board,
    history: History,
    powerups: Powerups,
    rng: SessionRng,
    mode: GameMode,
    level_id: Option<String>,
    turn: TurnState,
    status: GameStatus,
    elapsed_seconds: u64,
    hint_cursor: usize,
    pairs_removed: u32,
    additions: u32,
    powerups_used: u32,
    pending_events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(
        config: EngineConfig,
        mode: GameMode,
        level_id: Option<&str>,
        mut rng: SessionRng,
    ) -> Result<Self, String> {
        let level = match mode {
            GameMode::Levels => {
                let id = level_id.ok_or_else(|| "Levels mode needs a level id".to_string())?;
                let level =
                    LevelCatalog::find(id).ok_or_else(|| format!("Unknown level: {}", id))?;
                Some(level)
            }
            _ => None,
        };

        let mut board = Board::new(config.board.row_width);
        board.generate(mode, level.map(|l| l.pattern), &config.board, &mut rng);
        crate::log!(
            "New {} game with {} cells (seed {})",
            mode.as_str(),
            board.len(),
            rng.seed()
        );

        let history = History::new(config.history_capacity);
        let powerups = Powerups::new(config.initial_powerup_charges);
        let level_id = level.map(|l| l.id.to_string());
        Ok(Self::from_parts(
            config,
            board,
            history,
            powerups,
            rng,
            mode,
            level_id,
            0,
        ))
    }

    /// Rebuilds a session from persisted state. Links are always recomputed.
    pub fn restore(config: EngineConfig, saved: SavedGame, rng: SessionRng) -> Self {
        let mut board = Board::new(config.board.row_width);
        board.restore(saved.cells, saved.next_id);
        for idx in 0..board.len() {
            if board.get(idx).is_some_and(|c| c.status == CellStatus::Selected) {
                board.set_status(idx, CellStatus::Active);
            }
        }

        let mut history = History::new(config.history_capacity);
        history.restore(saved.history);

        crate::log!(
            "Restored {} game with {} cells, {} undo steps",
            saved.mode.as_str(),
            board.len(),
            history.len()
        );
        Self::from_parts(
            config,
            board,
            history,
            Powerups::new(saved.powerups),
            rng,
            saved.mode,
            saved.level_id,
            saved.time,
        )
    }

    fn from_parts(
        config: EngineConfig,
        board: Board,
        history: History,
        powerups: Powerups,
        rng: SessionRng,
        mode: GameMode,
        level_id: Option<String>,
        elapsed_seconds: u64,
    ) -> Self {
        let mut session = Self {
            config,
            board,
            history,
            powerups,
            rng,
            mode,
            level_id,
            turn: TurnState::Idle,
            status: GameStatus::InProgress,
            elapsed_seconds,
            hint_cursor: 0,
            pairs_removed: 0,
            additions: 0,
            powerups_used: 0,
            pending_events: Vec::new(),
        };
        session.refresh_status();
        session
    }

    pub fn serialize(&self) -> SavedGame {
        let cells = self
            .board
            .saved_cells()
            .into_iter()
            .map(|mut cell| {
                if cell.status == CellStatus::Selected {
                    cell.status = CellStatus::Active;
                }
                cell
            })
            .collect();

        SavedGame {
            cells,
            time: self.elapsed_seconds,
            mode: self.mode,
            history: self.history.to_vec(),
            next_id: self.board.next_id(),
            level_id: self.level_id.clone(),
            powerups: self.powerups.charges(),
        }
    }

    pub fn click(&mut self, idx: usize) -> Result<ClickOutcome, String> {
        self.ensure_human_turn()?;
        self.ensure_in_progress()?;
        if !self.board.get(idx).is_some_and(|c| c.is_in_play()) {
            return Err(format!("Cell {} is not in play", idx));
        }

        match self.turn {
            TurnState::AwaitingSecondSelection { selected } if selected == idx => {
                self.clear_selection();
                Ok(ClickOutcome::Deselected { index: idx })
            }
            TurnState::AwaitingSecondSelection { selected }
                if can_match(&self.board, selected, idx) =>
            {
                self.commit_match(selected, idx)?;
                Ok(ClickOutcome::Matched {
                    first: selected,
                    second: idx,
                })
            }
            _ => {
                self.clear_selection();
                Ok(self.select(idx))
            }
        }
    }

    pub fn add_numbers(&mut self) -> Result<(), String> {
        self.ensure_human_turn()?;
        self.do_add_numbers()
    }

    pub fn use_hammer(&mut self, idx: usize) -> Result<(), String> {
        self.ensure_human_turn()?;
        self.do_hammer(idx)
    }

    pub fn use_shuffle(&mut self) -> Result<(), String> {
        self.ensure_human_turn()?;
        self.do_shuffle()
    }

    pub fn undo(&mut self) -> Result<(), String> {
        self.ensure_human_turn()?;
        self.clear_selection();

        if !self.history.undo(&mut self.board, &mut self.powerups) {
            return Err("Nothing to undo".to_string());
        }

        self.pending_events.push(GameEvent::Undone);
        self.after_board_change();
        Ok(())
    }

    /// Next matchable pair after the previous hint, wrapping around once.
    pub fn next_hint(&mut self) -> Result<Option<(usize, usize)>, String> {
        self.ensure_human_turn()?;
        self.ensure_in_progress()?;

        let hint = find_hint(&self.board, self.hint_cursor).or_else(|| {
            if self.hint_cursor > 0 {
                find_hint(&self.board, 0)
            } else {
                None
            }
        });

        match hint {
            Some((first, second)) => {
                self.hint_cursor = first + 1;
                self.pending_events
                    .push(GameEvent::HintShown { first, second });
            }
            None => self.hint_cursor = 0,
        }
        Ok(hint)
    }

    /// Hands the board to the bot or takes it back. Any human selection is
    /// dropped when the bot takes over.
    pub fn set_bot_active(&mut self, active: bool) {
        if active {
            self.clear_selection();
            self.turn = TurnState::Resolving;
        } else if self.turn == TurnState::Resolving {
            self.turn = TurnState::Idle;
        }
    }

    pub fn is_bot_active(&self) -> bool {
        self.turn == TurnState::Resolving
    }

    pub fn bot_request(&self) -> BotRequest {
        BotRequest::find(&self.board, self.powerups.has_charges())
    }

    /// Applies a bot decision through the same paths as human input.
    pub fn apply_bot_action(&mut self, action: BotAction) -> Result<(), String> {
        if self.turn != TurnState::Resolving {
            return Err("Bot is not active".to_string());
        }

        match action {
            BotAction::Match(idx1, idx2) => {
                self.ensure_in_progress()?;
                self.commit_match(idx1, idx2)
            }
            BotAction::Hammer(idx) => self.do_hammer(idx),
            BotAction::Shuffle => self.do_shuffle(),
            BotAction::AddNumbers => self.do_add_numbers(),
        }
    }

    pub fn add_elapsed(&mut self, seconds: u64) {
        if self.status == GameStatus::InProgress {
            self.elapsed_seconds += seconds;
        }
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn select(&mut self, idx: usize) -> ClickOutcome {
        self.board.set_status(idx, CellStatus::Selected);
        self.turn = TurnState::AwaitingSecondSelection { selected: idx };
        ClickOutcome::Selected {
            index: idx,
            neighbors: find_neighbors(&self.board, idx),
        }
    }

    fn clear_selection(&mut self) {
        if let TurnState::AwaitingSecondSelection { selected } = self.turn {
            if self.board.get(selected).is_some_and(|c| c.status == CellStatus::Selected) {
                self.board.set_status(selected, CellStatus::Active);
            }
            self.turn = TurnState::Idle;
        }
    }

    fn commit_match(&mut self, idx1: usize, idx2: usize) -> Result<(), String> {
        if !can_match(&self.board, idx1, idx2) {
            return Err(format!("Cells {} and {} do not match", idx1, idx2));
        }

        self.history.record_match(&self.board, &[idx1, idx2]);
        self.board.set_status(idx1, CellStatus::Crossed);
        self.board.set_status(idx2, CellStatus::Crossed);
        self.board.update_links_after_removal(idx1, idx2);

        self.pairs_removed += 1;
        self.pending_events.push(GameEvent::PairRemoved {
            first: idx1,
            second: idx2,
        });

        self.compact_rows();
        self.after_board_change();
        Ok(())
    }

    fn do_add_numbers(&mut self) -> Result<(), String> {
        self.ensure_in_progress()?;

        let room = self.config.board.max_cells.saturating_sub(self.board.len());
        if room == 0 {
            return Err("The board is full".to_string());
        }

        self.clear_selection();
        let mut values = self.board.active_values();
        if values.is_empty() {
            return Err("Nothing left to copy".to_string());
        }
        values.truncate(room);

        let ids = self.board.add_row(&values);
        self.history.record_add(ids.clone());
        self.additions += 1;
        crate::log!("Added {} numbers, board has {} cells", ids.len(), self.board.len());

        self.pending_events.push(GameEvent::NumbersAdded { ids });
        self.after_board_change();
        Ok(())
    }

    fn do_hammer(&mut self, idx: usize) -> Result<(), String> {
        self.ensure_in_progress()?;
        if !self.board.get(idx).is_some_and(|c| c.is_in_play()) {
            return Err(format!("Cell {} is not in play", idx));
        }
        if !self.powerups.try_spend(PowerupKind::Hammer) {
            return Err("No powerup charges left".to_string());
        }

        self.clear_selection();
        self.history.record_match(&self.board, &[idx]);
        self.board.set_status(idx, CellStatus::Crossed);
        self.board.update_links_after_removal(idx, idx);
        self.compact_rows();
        self.history.record_powerup_usage(PowerupKind::Hammer);

        crate::log!("Hammer on cell {}", idx);
        self.pending_events.push(GameEvent::HammerUsed { index: idx });
        self.powerup_spent(PowerupKind::Hammer);
        self.after_board_change();
        Ok(())
    }

    fn do_shuffle(&mut self) -> Result<(), String> {
        self.ensure_in_progress()?;
        if self.board.in_play_count() < 2 {
            return Err("Nothing to shuffle".to_string());
        }
        if !self.powerups.try_spend(PowerupKind::Shuffle) {
            return Err("No powerup charges left".to_string());
        }

        self.clear_selection();
        self.history.record_shuffle(&self.board);
        self.board.shuffle_active_values(&mut self.rng);
        self.history.record_powerup_usage(PowerupKind::Shuffle);

        crate::log!("Shuffled {} values", self.board.in_play_count());
        self.pending_events.push(GameEvent::Shuffled);
        self.powerup_spent(PowerupKind::Shuffle);
        self.after_board_change();
        Ok(())
    }

    fn powerup_spent(&mut self, kind: PowerupKind) {
        self.powerups_used += 1;
        self.pending_events.push(GameEvent::PowerupSpent {
            kind,
            charges_left: self.powerups.charges(),
        });
    }

    /// Records a clean entry only when rows actually go away.
    fn compact_rows(&mut self) {
        self.history.record_clean(&self.board);
        let count = self.board.compact_empty_rows();
        if count == 0 {
            self.history.pop();
            return;
        }

        crate::log!("Cleared {} empty rows", count);
        self.pending_events.push(GameEvent::RowsCleared { count });
    }

    fn after_board_change(&mut self) {
        self.hint_cursor = 0;
        if self.turn != TurnState::Resolving {
            self.turn = TurnState::Idle;
        }
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        let previous = self.status;
        self.status = if self.board.in_play_count() == 0 {
            GameStatus::Won
        } else if !self.powerups.has_charges()
            && self.board.len() >= self.config.board.max_cells
            && find_hint(&self.board, 0).is_none()
        {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };

        if self.status != previous {
            crate::log!("Game status changed to {:?}", self.status);
        }
    }

    fn ensure_in_progress(&self) -> Result<(), String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is not in progress".to_string());
        }
        Ok(())
    }

    fn ensure_human_turn(&self) -> Result<(), String> {
        if self.turn == TurnState::Resolving {
            return Err("The bot is playing".to_string());
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn powerups(&self) -> &Powerups {
        &self.powerups
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn level_id(&self) -> Option<&str> {
        self.level_id.as_deref()
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn pairs_removed(&self) -> u32 {
        self.pairs_removed
    }

    pub fn additions(&self) -> u32 {
        self.additions
    }

    pub fn powerups_used(&self) -> u32 {
        self.powerups_used
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

#[cfg(test)]
pub(crate) fn session_with_values(
    config: EngineConfig,
    values: &[u8],
    charges: u32,
) -> GameSession {
    let board = Board::from_values(config.board.row_width, values);
    let saved = SavedGame {
        cells: board.saved_cells(),
        time: 0,
        mode: GameMode::Random,
        history: Vec::new(),
        next_id: board.next_id(),
        level_id: None,
        powerups: charges,
    };
    GameSession::restore(config, saved, SessionRng::new(7))
}
