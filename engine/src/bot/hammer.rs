use crate::board::rules::values_match;
use crate::board::Board;

/// Finds a single cell whose removal would open a pair: two matching cells
/// with exactly one cell in play between them, along the sequence or down a
/// column. Returns the blocking cell.
pub fn find_hammer_target(board: &Board) -> Option<usize> {
    for (idx, cell) in board.cells().iter().enumerate() {
        if !cell.is_in_play() {
            continue;
        }

        let sequential = cell.links.next.map(|b| (b, board.get(b).and_then(|c| c.links.next)));
        let vertical = cell.links.down.map(|b| (b, board.get(b).and_then(|c| c.links.down)));

        for (blocker, partner) in [sequential, vertical].into_iter().flatten() {
            let Some(partner) = partner.and_then(|p| board.get(p)) else {
                continue;
            };
            if values_match(cell.value, partner.value) {
                crate::log!("Hammer target {} opens {}", blocker, idx);
                return Some(blocker);
            }
        }
    }
    None
}
