use crate::board::rules::{is_vertical_pair, values_match};
use crate::board::Board;
use crate::config::SearchConfig;

/// A candidate pair ranked by the bot. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Move {
    pub idx1: usize,
    pub idx2: usize,
    pub score: f64,
}

impl Move {
    pub fn pair(&self) -> (usize, usize) {
        (self.idx1, self.idx2)
    }
}

/// Heuristic value of crossing `idx1` and `idx2` (`idx1` is the origin).
pub fn score_move(board: &Board, idx1: usize, idx2: usize, weights: &SearchConfig) -> f64 {
    let (Some(first), Some(second)) = (board.get(idx1), board.get(idx2)) else {
        return f64::MIN;
    };

    let mut score = weights.base;

    let vertical = is_vertical_pair(board, idx1, idx2);
    if vertical {
        score += weights.vertical_bonus;
    }
    if first.value == second.value {
        score += weights.same_value_bonus;
    }

    if !vertical && chain_follows(board, idx1, idx2) {
        score += weights.chain_bonus;
    }

    score - weights.position_penalty * idx1 as f64
}

/// The cells around a horizontal pair become neighbors once it is gone.
fn chain_follows(board: &Board, idx1: usize, idx2: usize) -> bool {
    let (left, right) = (idx1.min(idx2), idx1.max(idx2));
    let before = board.get(left).and_then(|c| c.links.prev);
    let after = board.get(right).and_then(|c| c.links.next);

    match (before.and_then(|i| board.get(i)), after.and_then(|i| board.get(i))) {
        (Some(a), Some(b)) => values_match(a.value, b.value),
        _ => false,
    }
}
