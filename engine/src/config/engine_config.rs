use serde::{Deserialize, Serialize};

use super::Validate;

/// All tunables of the engine. Passed into the board, the bot and the
/// session at construction so tests can vary them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board: BoardConfig,
    pub history_capacity: usize,
    pub initial_powerup_charges: u32,
    pub search: SearchConfig,
    pub autoplay: AutoplayConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            history_capacity: 100,
            initial_powerup_charges: 3,
            search: SearchConfig::default(),
            autoplay: AutoplayConfig::default(),
        }
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), String> {
        self.board.validate()?;
        self.search.validate()?;
        self.autoplay.validate()?;
        if self.history_capacity == 0 {
            return Err("history_capacity must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub row_width: usize,
    /// Hard ceiling for the cell count; adding numbers is refused beyond it.
    pub max_cells: usize,
    pub random_cells: usize,
    pub easy_cells: usize,
    pub easy_pair_bias: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            row_width: 9,
            max_cells: 40_000,
            random_cells: 36,
            easy_cells: 36,
            easy_pair_bias: 0.35,
        }
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<(), String> {
        if self.row_width < 2 {
            return Err(format!("row_width must be at least 2, got {}", self.row_width));
        }
        if self.max_cells < self.row_width {
            return Err(format!(
                "max_cells ({}) must hold at least one row ({})",
                self.max_cells, self.row_width
            ));
        }
        if !(0.0..=1.0).contains(&self.easy_pair_bias) {
            return Err(format!(
                "easy_pair_bias must be within 0..=1, got {}",
                self.easy_pair_bias
            ));
        }
        Ok(())
    }
}

/// Weights and limits of the move search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base: f64,
    pub vertical_bonus: f64,
    pub same_value_bonus: f64,
    pub chain_bonus: f64,
    pub position_penalty: f64,
    /// Number of cells considered as move origins on large boards.
    pub origin_limit: usize,
    /// Boards up to this size are scanned completely.
    pub large_board_threshold: usize,
    pub beam_width: usize,
    pub lookahead_discount: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base: 10.0,
            vertical_bonus: 150.0,
            same_value_bonus: 20.0,
            chain_bonus: 500.0,
            position_penalty: 0.001,
            origin_limit: 2500,
            large_board_threshold: 3000,
            beam_width: 8,
            lookahead_discount: 0.6,
        }
    }
}

impl SearchConfig {
    pub fn origin_scan_len(&self, board_len: usize) -> usize {
        if board_len > self.large_board_threshold {
            self.origin_limit.min(board_len)
        } else {
            board_len
        }
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.beam_width == 0 {
            return Err("beam_width must be positive".to_string());
        }
        if self.origin_limit == 0 {
            return Err("origin_limit must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.lookahead_discount) {
            return Err(format!(
                "lookahead_discount must be within 0..=1, got {}",
                self.lookahead_discount
            ));
        }
        if self.position_penalty < 0.0 {
            return Err("position_penalty must not be negative".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub think_delay_ms: u64,
    pub action_delay_ms: u64,
    pub add_lines_delay_ms: u64,
    /// The bot gives up instead of adding numbers past this many cells.
    pub max_cells: usize,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            think_delay_ms: 250,
            action_delay_ms: 50,
            add_lines_delay_ms: 800,
            max_cells: 4500,
        }
    }
}

impl AutoplayConfig {
    pub fn instant() -> Self {
        Self {
            think_delay_ms: 0,
            action_delay_ms: 0,
            add_lines_delay_ms: 0,
            ..Self::default()
        }
    }
}

impl Validate for AutoplayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_cells == 0 {
            return Err("autoplay max_cells must be positive".to_string());
        }
        Ok(())
    }
}
