use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ground truth of a simulated game: which cells hold a mine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mines: Array2<bool>,
    count: CellCount,
}

impl MineLayout {
    /// Wraps a mask whose mines were already counted by the caller.
    pub(crate) fn from_counted_mask(mines: Array2<bool>, count: CellCount) -> Self {
        Self { mines, count }
    }

    pub fn from_mine_mask(mines: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mines.dim();
        if Coord::try_from(rows).is_err() || Coord::try_from(cols).is_err() {
            return Err(GameError::InvalidBoardShape);
        }

        let count = mines.iter().filter(|&&is_mine| is_mine).count();
        let count = CellCount::try_from(count).map_err(|_| GameError::TooManyMines)?;
        Ok(Self::from_counted_mask(mines, count))
    }

    /// Layout of `size` with a mine on each of `positions`; duplicates collapse.
    pub fn from_mine_coords(size: Coord2, positions: &[Coord2]) -> Result<Self> {
        let mut mines = Array2::from_elem(size.to_nd_index(), false);
        for &pos in positions {
            if !in_bounds(pos, size) {
                return Err(GameError::InvalidCoords);
            }
            mines[pos.to_nd_index()] = true;
        }
        Self::from_mine_mask(mines)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mines.dim();
        // checked against `Coord` on construction
        (rows as Coord, cols as Coord)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        in_bounds(coords, self.size())
            .then_some(coords)
            .ok_or(GameError::InvalidCoords)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols) - self.count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// The clue a board shows when `coords` is opened.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let mut count = 0;
        for pos in self.neighbors_of(coords) {
            count += u8::from(self[pos]);
        }
        count
    }

    pub(crate) fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        self.mines.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &bool {
        &self.mines[coords.to_nd_index()]
    }
}
