use alloc::vec::Vec;

use ndarray::Array2;

use super::*;

/// Generation strategy that can optionally try to make the starting cell zero or at least safe,
/// but other than that is purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    start: Coord2,
    start_cell: StartCell,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, start: Coord2, start_cell: StartCell) -> Self {
        Self {
            seed,
            start,
            start_cell,
        }
    }

    /// Downgrades the start guarantee when the board is too crowded to honor it.
    fn effective_start_cell(&self, config: GameConfig) -> StartCell {
        use StartCell::*;

        let total_cells = config.total_cells();
        let protected = 1 + NeighborIter::new(self.start, config.size).count() as CellCount;
        match self.start_cell {
            Random => Random,
            SimpleSafe | AlwaysZero if config.mines + 1 > total_cells => {
                log::warn!("Cannot make start cell safe, fallback to random");
                Random
            }
            SimpleSafe => SimpleSafe,
            AlwaysZero if config.mines + protected > total_cells => {
                log::warn!("Cannot make start cell zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let size = config.size;
        let start_cell = if in_bounds(self.start, size) {
            self.effective_start_cell(config)
        } else {
            StartCell::Random
        };

        let is_protected = |coords: Coord2| match start_cell {
            StartCell::Random => false,
            StartCell::SimpleSafe => coords == self.start,
            StartCell::AlwaysZero => {
                coords == self.start || NeighborIter::new(self.start, size).any(|pos| pos == coords)
            }
        };
        let mut free_cells: Vec<Coord2> =
            iter_cells(size).filter(|&pos| !is_protected(pos)).collect();

        let wanted = usize::from(config.mines);
        if wanted > free_cells.len() {
            log::warn!(
                "Minefield already full, generated anyway, requested {} but only fits {}",
                wanted,
                free_cells.len()
            );
        }
        let placed = wanted.min(free_cells.len());

        // partial Fisher-Yates: the first `placed` cells become mines
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..placed {
            let j = rng.random_range(i..free_cells.len());
            free_cells.swap(i, j);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in &free_cells[..placed] {
            mine_mask[coords.to_nd_index()] = true;
        }

        log::trace!(
            "generated {placed} mines on {}x{} with seed {}",
            size.0,
            size.1,
            self.seed
        );
        // bounded by `config.mines`
        MineLayout::from_counted_mask(mine_mask, placed as CellCount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::beginner();
        let first = RandomLayoutGenerator::new(7, (4, 4), StartCell::Random).generate(config);
        let second = RandomLayoutGenerator::new(7, (4, 4), StartCell::Random).generate(config);

        assert_eq!(first, second);
        assert_eq!(first.mine_count(), 10);
    }

    #[test]
    fn zero_start_keeps_neighborhood_clear() {
        let config = GameConfig::intermediate();
        for seed in 0..16 {
            let layout =
                RandomLayoutGenerator::new(seed, (5, 5), StartCell::AlwaysZero).generate(config);

            assert_eq!(layout.mine_count(), 40);
            assert!(!layout.contains_mine((5, 5)));
            assert_eq!(layout.adjacent_mine_count((5, 5)), 0);
        }
    }

    #[test]
    fn crowded_board_downgrades_zero_start() {
        let config = GameConfig::new((3, 3), 8);
        let layout = RandomLayoutGenerator::new(1, (1, 1), StartCell::AlwaysZero).generate(config);

        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 1)));
    }
}
