use super::score::{Move, score_move};
use crate::board::rules::{can_match, find_neighbors};
use crate::board::{Board, CellStatus};
use crate::config::SearchConfig;

/// Every legal pair among the scanned origins, best first. Each pair appears
/// once, with the lower index as origin. Ties keep board order.
pub fn find_all_moves(board: &Board, config: &SearchConfig) -> Vec<Move> {
    let mut moves = Vec::new();
    for_each_move(board, config, |m| moves.push(m));
    moves.sort_by(|a, b| b.score.total_cmp(&a.score));
    moves
}

/// Beam search with one ply of look-ahead. The top `beam_width` candidates
/// are applied to `board` in turn, scored by the best reply they leave, and
/// unwound again, so the board is unchanged on return.
pub fn find_best_move(board: &mut Board, config: &SearchConfig) -> Option<Move> {
    let mut candidates = find_all_moves(board, config);
    candidates.truncate(config.beam_width.max(1));

    let mut best: Option<(f64, Move)> = None;
    for candidate in candidates {
        let future = best_reply_score(board, candidate, config).unwrap_or(0.0);
        let total = candidate.score + config.lookahead_discount * future;
        if best.is_none_or(|(score, _)| total > score) {
            best = Some((total, candidate));
        }
    }
    best.map(|(_, m)| m)
}

fn for_each_move(board: &Board, config: &SearchConfig, mut visit: impl FnMut(Move)) {
    let scan_len = config.origin_scan_len(board.len());
    for idx in 0..scan_len {
        for other in find_neighbors(board, idx) {
            if other > idx && can_match(board, idx, other) {
                visit(Move {
                    idx1: idx,
                    idx2: other,
                    score: score_move(board, idx, other, config),
                });
            }
        }
    }
}

fn best_reply_score(board: &mut Board, candidate: Move, config: &SearchConfig) -> Option<f64> {
    let (idx1, idx2) = candidate.pair();
    let status1 = board.get(idx1)?.status;
    let status2 = board.get(idx2)?.status;

    board.set_status(idx1, CellStatus::Crossed);
    board.set_status(idx2, CellStatus::Crossed);
    board.update_links_after_removal(idx1, idx2);

    let mut best: Option<f64> = None;
    for_each_move(board, config, |m| {
        if best.is_none_or(|score| m.score > score) {
            best = Some(m.score);
        }
    });

    board.relink_after_removal(idx1, idx2);
    board.set_status(idx1, status1);
    board.set_status(idx2, status2);
    best
}
