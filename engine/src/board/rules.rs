//! Matching rules on top of the board links. Every check is O(1) per pair.

use super::arena::Board;

pub fn values_match(a: u8, b: u8) -> bool {
    a == b || u16::from(a) + u16::from(b) == 10
}

pub fn can_match(board: &Board, idx1: usize, idx2: usize) -> bool {
    if idx1 == idx2 {
        return false;
    }

    let (Some(cell1), Some(cell2)) = (board.get(idx1), board.get(idx2)) else {
        return false;
    };
    if !cell1.is_in_play() || !cell2.is_in_play() {
        return false;
    }
    if !values_match(cell1.value, cell2.value) {
        return false;
    }

    let links = cell1.links;
    links.next == Some(idx2)
        || links.prev == Some(idx2)
        || links.down == Some(idx2)
        || links.up == Some(idx2)
}

pub fn is_vertical_pair(board: &Board, idx1: usize, idx2: usize) -> bool {
    board
        .get(idx1)
        .is_some_and(|c| c.links.down == Some(idx2) || c.links.up == Some(idx2))
}

/// Prev, next, up and down of a cell in play, without duplicates.
pub fn find_neighbors(board: &Board, idx: usize) -> Vec<usize> {
    let Some(cell) = board.get(idx) else {
        return Vec::new();
    };
    if !cell.is_in_play() {
        return Vec::new();
    }

    let links = cell.links;
    let mut neighbors = Vec::with_capacity(4);
    for candidate in [links.prev, links.next, links.up, links.down].into_iter().flatten() {
        if !neighbors.contains(&candidate) {
            neighbors.push(candidate);
        }
    }
    neighbors
}

/// First matchable pair whose scanned cell is at or after `start`. All four
/// neighbors are checked, so partners at lower indices are found too.
pub fn find_hint(board: &Board, start: usize) -> Option<(usize, usize)> {
    (start..board.len()).find_map(|idx| {
        find_neighbors(board, idx)
            .into_iter()
            .find(|&other| can_match(board, idx, other))
            .map(|other| (idx, other))
    })
}

/// Link-free reference: walks the raw cells between the pair.
#[cfg(test)]
pub(crate) fn can_match_by_scan(board: &Board, idx1: usize, idx2: usize) -> bool {
    if idx1 == idx2 {
        return false;
    }
    let (Some(cell1), Some(cell2)) = (board.get(idx1), board.get(idx2)) else {
        return false;
    };
    if !cell1.is_in_play() || !cell2.is_in_play() || !values_match(cell1.value, cell2.value) {
        return false;
    }

    let (start, end) = (idx1.min(idx2), idx1.max(idx2));
    let is_open = |i: usize| board.get(i).is_some_and(|c| c.is_in_play());

    let sequential = ((start + 1)..end).all(|i| !is_open(i));
    let width = board.row_width();
    let vertical = start % width == end % width
        && ((start + width)..end).step_by(width).all(|i| !is_open(i));

    sequential || vertical
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellStatus;
    use crate::rng::SessionRng;

    fn board_with_crossed(width: usize, values: &[u8], crossed: &[usize]) -> Board {
        let mut board = Board::from_values(width, values);
        for &idx in crossed {
            board.set_status(idx, CellStatus::Crossed);
        }
        board.rebuild_links();
        board
    }

    #[test]
    fn test_values_match() {
        assert!(values_match(5, 5));
        assert!(values_match(3, 7));
        assert!(!values_match(1, 2));
        assert!(!values_match(5, 6));
        assert!(!values_match(200, 100));
        assert!(values_match(255, 255));
    }

    #[test]
    fn test_can_match_horizontal_neighbors() {
        let board = Board::from_values(9, &[3, 7, 1]);

        assert!(can_match(&board, 0, 1));
        assert!(can_match(&board, 1, 0));
    }

    #[test]
    fn test_can_match_across_crossed_cells() {
        let board = board_with_crossed(9, &[5, 1, 2, 5], &[1, 2]);

        assert!(can_match(&board, 0, 3));
    }

    #[test]
    fn test_can_match_blocked_by_active_cell() {
        let board = Board::from_values(9, &[5, 1, 5]);

        assert!(!can_match(&board, 0, 2));
    }

    #[test]
    fn test_can_match_wraps_row_end() {
        #[rustfmt::skip]
        let board = board_with_crossed(3, &[
            1, 2, 4,
            6, 8, 9,
        ], &[]);

        assert!(can_match(&board, 2, 3));
    }

    #[test]
    fn test_can_match_vertical() {
        #[rustfmt::skip]
        let board = board_with_crossed(3, &[
            2, 1, 3,
            4, 5, 6,
            8, 1, 9,
        ], &[3]);

        assert!(can_match(&board, 0, 6));
        assert!(is_vertical_pair(&board, 0, 6));
        assert!(!can_match(&board, 1, 7));
    }

    #[test]
    fn test_can_match_rejects_crossed_and_missing() {
        let board = board_with_crossed(9, &[5, 5], &[1]);

        assert!(!can_match(&board, 0, 1));
        assert!(!can_match(&board, 0, 40));
        assert!(!can_match(&board, 0, 0));
    }

    #[test]
    fn test_classic_first_row_scenario() {
        let board = Board::from_values(9, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 5, 5, 3, 7]);

        assert!(!can_match(&board, 0, 8));
        assert!(!can_match(&board, 0, 1));
    }

    #[test]
    fn test_find_neighbors_dedupes() {
        let board = board_with_crossed(3, &[1, 9, 9, 9, 9], &[1, 2]);

        let neighbors = find_neighbors(&board, 0);

        assert_eq!(neighbors, vec![3]);
    }

    #[test]
    fn test_find_neighbors_of_crossed_cell_is_empty() {
        let board = board_with_crossed(9, &[1, 2, 3], &[1]);

        assert!(find_neighbors(&board, 1).is_empty());
        assert!(find_neighbors(&board, 99).is_empty());
    }

    #[test]
    fn test_find_hint_sees_lower_partner() {
        let board = Board::from_values(9, &[4, 6, 1, 2]);

        assert_eq!(find_hint(&board, 0), Some((0, 1)));
        assert_eq!(find_hint(&board, 1), Some((1, 0)));
        assert_eq!(find_hint(&board, 2), None);
    }

    #[test]
    fn test_find_hint_none_without_moves() {
        let board = Board::from_values(9, &[1, 2, 3, 4]);

        assert_eq!(find_hint(&board, 0), None);
    }

    #[test]
    fn test_fuzz_can_match_agrees_with_scan() {
        for seed in 0..300u64 {
            let mut rng = SessionRng::new(seed);
            let len = rng.random_range(1..60);
            let values: Vec<u8> = (0..len).map(|_| rng.digit()).collect();
            let mut board = Board::from_values(9, &values);

            for _ in 0..len / 2 {
                let idx = rng.random_range(0..len);
                let in_play = board.get(idx).is_some_and(|c| c.is_in_play());
                if in_play && board.set_status(idx, CellStatus::Crossed) {
                    board.update_links_after_removal(idx, idx);
                }
            }

            for i in 0..len {
                for j in 0..len {
                    assert_eq!(
                        can_match(&board, i, j),
                        can_match_by_scan(&board, i, j),
                        "seed {}: pair ({}, {})",
                        seed,
                        i,
                        j
                    );
                }
            }
        }
    }
}
