use super::cell::{Cell, CellId, CellSnapshot, CellStatus, Links, SavedCell};
use super::generate::{GameMode, initial_values};
use crate::config::BoardConfig;
use crate::rng::SessionRng;

/// Flat arena of cells laid out in rows of `row_width`.
///
/// Links are plain indices into `cells`. Anything that shifts indices
/// (generation, restore, compaction, undoing an add or a clean) must be
/// followed by [`Board::rebuild_links`]; a single removal on the hot path is
/// handled by [`Board::update_links_after_removal`].
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<Cell>,
    row_width: usize,
    next_id: CellId,
}

impl Board {
    pub fn new(row_width: usize) -> Self {
        Self {
            cells: Vec::new(),
            row_width: row_width.max(1),
            next_id: 0,
        }
    }

    pub fn from_values(row_width: usize, values: &[u8]) -> Self {
        let mut board = Self::new(row_width);
        board.install_values(values);
        board
    }

    /// Installs snapshot cells with their links as given. The worker side
    /// trusts the links it receives and never rebuilds them.
    pub fn from_snapshot(row_width: usize, cells: Vec<CellSnapshot>) -> Self {
        let next_id = cells.iter().map(|c| c.id.saturating_add(1)).max().unwrap_or(0);
        Self {
            cells: cells.into_iter().map(Cell::from).collect(),
            row_width: row_width.max(1),
            next_id,
        }
    }

    pub fn generate(
        &mut self,
        mode: GameMode,
        pattern: Option<&[&str]>,
        config: &BoardConfig,
        rng: &mut SessionRng,
    ) {
        self.row_width = config.row_width.max(1);
        let values = initial_values(mode, pattern, config, rng);
        self.install_values(&values);
    }

    fn install_values(&mut self, values: &[u8]) {
        self.next_id = 0;
        self.cells = values
            .iter()
            .map(|&value| {
                let id = self.next_id;
                self.next_id = self.next_id.saturating_add(1);
                Cell::new(id, value)
            })
            .collect();
        self.rebuild_links();
    }

    /// Installs persisted cells and id counter verbatim.
    pub fn restore(&mut self, cells: Vec<SavedCell>, next_id: CellId) {
        self.cells = cells.into_iter().map(Cell::from).collect();
        self.next_id = next_id;
        self.rebuild_links();
    }

    pub fn rebuild_links(&mut self) {
        let width = self.row_width;
        let mut last: Option<usize> = None;
        let mut last_in_column: Vec<Option<usize>> = vec![None; width];

        for idx in 0..self.cells.len() {
            self.cells[idx].links = Links::default();
            if !self.cells[idx].is_in_play() {
                continue;
            }

            if let Some(prev) = last {
                self.cells[prev].links.next = Some(idx);
                self.cells[idx].links.prev = Some(prev);
            }
            last = Some(idx);

            let col = idx % width;
            if let Some(up) = last_in_column[col] {
                self.cells[up].links.down = Some(idx);
                self.cells[idx].links.up = Some(up);
            }
            last_in_column[col] = Some(idx);
        }
    }

    /// Splices two freshly crossed cells out of their chains.
    pub fn update_links_after_removal(&mut self, idx1: usize, idx2: usize) {
        self.unlink(idx1);
        if idx2 != idx1 {
            self.unlink(idx2);
        }
    }

    /// Reverses [`Board::update_links_after_removal`] for the same pair. Only
    /// valid while nothing else has touched the links in between.
    pub(crate) fn relink_after_removal(&mut self, idx1: usize, idx2: usize) {
        if idx2 != idx1 {
            self.relink(idx2);
        }
        self.relink(idx1);
    }

    fn unlink(&mut self, idx: usize) {
        let Some(links) = self.cells.get(idx).map(|c| c.links) else {
            return;
        };
        if let Some(cell) = links.prev.and_then(|i| self.cells.get_mut(i)) {
            cell.links.next = links.next;
        }
        if let Some(cell) = links.next.and_then(|i| self.cells.get_mut(i)) {
            cell.links.prev = links.prev;
        }
        if let Some(cell) = links.up.and_then(|i| self.cells.get_mut(i)) {
            cell.links.down = links.down;
        }
        if let Some(cell) = links.down.and_then(|i| self.cells.get_mut(i)) {
            cell.links.up = links.up;
        }
    }

    fn relink(&mut self, idx: usize) {
        let Some(links) = self.cells.get(idx).map(|c| c.links) else {
            return;
        };
        if let Some(cell) = links.prev.and_then(|i| self.cells.get_mut(i)) {
            cell.links.next = Some(idx);
        }
        if let Some(cell) = links.next.and_then(|i| self.cells.get_mut(i)) {
            cell.links.prev = Some(idx);
        }
        if let Some(cell) = links.up.and_then(|i| self.cells.get_mut(i)) {
            cell.links.down = Some(idx);
        }
        if let Some(cell) = links.down.and_then(|i| self.cells.get_mut(i)) {
            cell.links.up = Some(idx);
        }
    }

    /// Appends `values` as new cells after the last one and returns their ids.
    pub fn add_row(&mut self, values: &[u8]) -> Vec<CellId> {
        let mut ids = Vec::with_capacity(values.len());
        for &value in values {
            let id = self.next_id;
            self.next_id = self.next_id.saturating_add(1);
            self.cells.push(Cell::new(id, value));
            ids.push(id);
        }
        self.rebuild_links();
        ids
    }

    /// Row numbers of complete rows with every cell crossed.
    pub fn empty_rows(&self) -> Vec<usize> {
        self.cells
            .chunks(self.row_width)
            .enumerate()
            .filter(|(_, row)| row.len() == self.row_width && row.iter().all(Cell::is_crossed))
            .map(|(row, _)| row)
            .collect()
    }

    pub fn compact_empty_rows(&mut self) -> usize {
        let empty_rows = self.empty_rows();
        if empty_rows.is_empty() {
            return 0;
        }

        let mut drop_row = vec![false; self.row_count()];
        for &row in &empty_rows {
            drop_row[row] = true;
        }

        let width = self.row_width;
        let cells = std::mem::take(&mut self.cells);
        self.cells = cells
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| !drop_row[idx / width])
            .map(|(_, cell)| cell)
            .collect();

        self.rebuild_links();
        empty_rows.len()
    }

    /// Permutes values among cells in play. Ids, statuses and links stay.
    pub fn shuffle_active_values(&mut self, rng: &mut SessionRng) {
        let mut values = self.active_values();
        rng.shuffle(&mut values);

        let in_play = self.cells.iter_mut().filter(|c| c.is_in_play());
        for (cell, value) in in_play.zip(values) {
            cell.value = value;
        }
    }

    pub fn set_status(&mut self, idx: usize, status: CellStatus) -> bool {
        match self.cells.get_mut(idx) {
            Some(cell) if cell.value > 0 => {
                cell.status = status;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_values(&mut self, values: &[u8]) {
        for (cell, &value) in self.cells.iter_mut().zip(values) {
            cell.value = value;
        }
    }

    /// Drops the cells with the given ids. Links must be rebuilt afterwards.
    pub(crate) fn remove_ids(&mut self, ids: &[CellId]) -> usize {
        let before = self.cells.len();
        let ids: std::collections::HashSet<CellId> = ids.iter().copied().collect();
        self.cells.retain(|cell| !ids.contains(&cell.id));
        before - self.cells.len()
    }

    /// Splices cells back in at `at`. Links must be rebuilt afterwards.
    pub(crate) fn insert_cells(&mut self, at: usize, cells: &[SavedCell]) {
        let at = at.min(self.cells.len());
        let tail = self.cells.split_off(at);
        self.cells.extend(cells.iter().copied().map(Cell::from));
        self.cells.extend(tail);
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.cells.len().div_ceil(self.row_width)
    }

    pub fn next_id(&self) -> CellId {
        self.next_id
    }

    pub fn get(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_play_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_in_play()).count()
    }

    pub fn active_values(&self) -> Vec<u8> {
        self.cells
            .iter()
            .filter(|c| c.is_in_play())
            .map(|c| c.value)
            .collect()
    }

    pub fn values(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.value).collect()
    }

    pub fn snapshot(&self) -> Vec<CellSnapshot> {
        self.cells.iter().map(Cell::to_snapshot).collect()
    }

    pub fn saved_cells(&self) -> Vec<SavedCell> {
        self.cells.iter().map(Cell::to_saved).collect()
    }

    /// Links of every cell in play are symmetric and equal to a fresh rebuild.
    #[cfg(test)]
    pub(crate) fn assert_links_consistent(&self) {
        let mut rebuilt = self.clone();
        rebuilt.rebuild_links();

        for (idx, cell) in self.cells.iter().enumerate() {
            if !cell.is_in_play() {
                continue;
            }
            assert_eq!(cell.links, rebuilt.cells[idx].links, "links of cell {} are stale", idx);
            if let Some(next) = cell.links.next {
                assert_eq!(self.cells[next].links.prev, Some(idx));
            }
            if let Some(down) = cell.links.down {
                assert_eq!(self.cells[down].links.up, Some(idx));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::rules::{can_match, find_neighbors};

    fn cross(board: &mut Board, idx1: usize, idx2: usize) {
        board.set_status(idx1, CellStatus::Crossed);
        board.set_status(idx2, CellStatus::Crossed);
        board.update_links_after_removal(idx1, idx2);
    }

    #[test]
    fn test_generate_classic_resets_ids() {
        let mut board = Board::new(9);
        let mut rng = SessionRng::new(1);
        board.add_row(&[1, 2, 3]);

        board.generate(GameMode::Classic, None, &BoardConfig::default(), &mut rng);

        assert_eq!(board.len(), 27);
        assert_eq!(board.next_id(), 27);
        assert_eq!(board.get(0).unwrap().id, 0);
        board.assert_links_consistent();
    }

    #[test]
    fn test_generate_level_placeholders_are_crossed() {
        let mut board = Board::new(9);
        let mut rng = SessionRng::new(1);

        board.generate(GameMode::Levels, Some(&["1.1"]), &BoardConfig::default(), &mut rng);

        assert_eq!(board.len(), 9);
        assert_eq!(board.get(1).unwrap().status, CellStatus::Crossed);
        assert_eq!(board.get(1).unwrap().value, 0);
        assert_eq!(board.get(0).unwrap().links.next, Some(2));
    }

    #[test]
    fn test_rebuild_links_skip_crossed() {
        #[rustfmt::skip]
        let mut board = Board::from_values(3, &[
            1, 2, 3,
            0, 0, 4,
            5, 6, 7,
        ]);
        board.rebuild_links();

        let first = board.get(0).unwrap().links;
        assert_eq!(first.prev, None);
        assert_eq!(first.next, Some(1));
        assert_eq!(first.down, Some(6));

        let corner = board.get(2).unwrap().links;
        assert_eq!(corner.next, Some(5));
        assert_eq!(corner.down, Some(5));
        assert_eq!(board.get(5).unwrap().links.next, Some(6));
        assert_eq!(board.get(8).unwrap().links.next, None);
    }

    #[test]
    fn test_update_links_after_removal_matches_rebuild() {
        #[rustfmt::skip]
        let mut board = Board::from_values(3, &[
            1, 9, 3,
            4, 5, 6,
            7, 8, 9,
        ]);

        cross(&mut board, 0, 1);
        board.assert_links_consistent();
        assert_eq!(board.get(2).unwrap().links.prev, None);
        assert_eq!(board.get(3).unwrap().links.up, None);

        cross(&mut board, 4, 7);
        board.assert_links_consistent();
        assert_eq!(board.get(3).unwrap().links.next, Some(5));
    }

    #[test]
    fn test_relink_after_removal_restores_links() {
        let mut board = Board::from_values(4, &[1, 1, 2, 8, 3, 3, 7, 4, 5, 5]);
        let before = board.clone();

        cross(&mut board, 1, 2);
        board.set_status(1, CellStatus::Active);
        board.set_status(2, CellStatus::Active);
        board.relink_after_removal(1, 2);

        for idx in 0..board.len() {
            assert_eq!(board.get(idx).unwrap().links, before.get(idx).unwrap().links);
        }
    }

    #[test]
    fn test_update_links_single_cell() {
        let mut board = Board::from_values(9, &[1, 2, 3]);
        board.set_status(1, CellStatus::Crossed);
        board.update_links_after_removal(1, 1);

        board.assert_links_consistent();
        assert_eq!(board.get(0).unwrap().links.next, Some(2));
    }

    #[test]
    fn test_update_links_out_of_range_is_noop() {
        let mut board = Board::from_values(9, &[1, 2, 3]);
        board.update_links_after_removal(10, 20);

        board.assert_links_consistent();
    }

    #[test]
    fn test_add_row_returns_fresh_ids() {
        let mut board = Board::from_values(9, &[1, 2, 3]);

        let ids = board.add_row(&[4, 5]);

        assert_eq!(ids, vec![3, 4]);
        assert_eq!(board.len(), 5);
        assert_eq!(board.get(2).unwrap().links.next, Some(3));
        board.assert_links_consistent();
    }

    #[test]
    fn test_compact_removes_only_full_crossed_rows() {
        #[rustfmt::skip]
        let mut board = Board::from_values(3, &[
            1, 2, 3,
            4, 5, 6,
            7, 8, 9,
            1, 2,
        ]);
        for idx in [3, 4, 5, 9, 10] {
            board.set_status(idx, CellStatus::Crossed);
        }
        board.rebuild_links();

        let removed = board.compact_empty_rows();

        assert_eq!(removed, 1);
        assert_eq!(board.values(), vec![1, 2, 3, 7, 8, 9, 1, 2]);
        assert_eq!(board.get(0).unwrap().links.down, Some(3));
        board.assert_links_consistent();
    }

    #[test]
    fn test_compact_nothing_to_remove() {
        let mut board = Board::from_values(9, &[4, 6]);
        board.set_status(0, CellStatus::Crossed);
        board.set_status(1, CellStatus::Crossed);

        assert_eq!(board.compact_empty_rows(), 0);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_basic_pair_removal_on_two_wide_board() {
        let mut board = Board::from_values(2, &[4, 6]);

        assert!(can_match(&board, 0, 1));
        cross(&mut board, 0, 1);

        assert_eq!(board.get(0).unwrap().status, CellStatus::Crossed);
        assert_eq!(board.get(1).unwrap().status, CellStatus::Crossed);
        assert_eq!(board.compact_empty_rows(), 1);
        assert!(board.is_empty());
    }

    #[test]
    fn test_shuffle_keeps_ids_statuses_and_multiset() {
        let mut board = Board::from_values(9, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 1, 1]);
        board.set_status(4, CellStatus::Crossed);
        board.rebuild_links();
        let ids: Vec<CellId> = board.cells().iter().map(|c| c.id).collect();
        let mut rng = SessionRng::new(42);

        board.shuffle_active_values(&mut rng);

        let after_ids: Vec<CellId> = board.cells().iter().map(|c| c.id).collect();
        assert_eq!(ids, after_ids);
        assert_eq!(board.get(4).unwrap().value, 5);
        assert_eq!(board.get(4).unwrap().status, CellStatus::Crossed);
        let mut values = board.active_values();
        values.sort();
        assert_eq!(values, vec![1, 1, 1, 2, 3, 4, 6, 7, 8, 9]);
        board.assert_links_consistent();
    }

    #[test]
    fn test_restore_rebuilds_links() {
        let saved = vec![
            SavedCell { id: 10, value: 3, status: CellStatus::Active },
            SavedCell { id: 11, value: 5, status: CellStatus::Crossed },
            SavedCell { id: 12, value: 7, status: CellStatus::Active },
        ];
        let mut board = Board::new(9);

        board.restore(saved, 13);

        assert_eq!(board.next_id(), 13);
        assert_eq!(board.get(0).unwrap().links.next, Some(2));
        board.assert_links_consistent();
    }

    #[test]
    fn test_from_snapshot_keeps_links_verbatim() {
        let board = Board::from_values(9, &[1, 2, 3]);
        let mut snapshot = board.snapshot();
        snapshot[0].next = Some(2);

        let copy = Board::from_snapshot(9, snapshot);

        assert_eq!(copy.get(0).unwrap().links.next, Some(2));
        assert_eq!(copy.next_id(), 3);
    }

    #[test]
    fn test_exhausted_id_counter_does_not_overflow() {
        let saved = vec![SavedCell { id: CellId::MAX, value: 3, status: CellStatus::Active }];
        let mut board = Board::new(9);
        board.restore(saved, CellId::MAX);

        let ids = board.add_row(&[4, 5]);

        assert_eq!(ids, vec![CellId::MAX, CellId::MAX]);
        assert_eq!(board.len(), 3);
        let copy = Board::from_snapshot(9, board.snapshot());
        assert_eq!(copy.next_id(), CellId::MAX);
    }

    #[test]
    fn test_fuzz_link_symmetry_under_matches_and_compaction() {
        for seed in 0..200u64 {
            let mut rng = SessionRng::new(seed);
            let values: Vec<u8> = (0..45).map(|_| rng.digit()).collect();
            let mut board = Board::from_values(9, &values);

            for _ in 0..40 {
                let mut pairs = Vec::new();
                for i in 0..board.len() {
                    for j in find_neighbors(&board, i) {
                        if j > i && can_match(&board, i, j) {
                            pairs.push((i, j));
                        }
                    }
                }
                if pairs.is_empty() {
                    let values = board.active_values();
                    board.add_row(&values);
                    board.assert_links_consistent();
                    continue;
                }

                let (i, j) = pairs[rng.random_range(0..pairs.len())];
                cross(&mut board, i, j);
                board.assert_links_consistent();

                let before = board.row_count();
                let removed = board.compact_empty_rows();
                assert_eq!(board.row_count(), before - removed, "seed {}", seed);
                assert!(board.empty_rows().is_empty(), "seed {}", seed);
                board.assert_links_consistent();
            }
        }
    }
}
