use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Unknown cells bordering at least one opened cell.
///
/// Only these cells appear in a counting fact, so probing the frontier first loses nothing:
/// every other unknown cell is satisfiable both ways.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontier {
    cells: BTreeSet<Coord2>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.contains(&coords)
    }

    /// Row-major iteration over the frontier.
    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells.iter().copied()
    }

    /// Records that `coords` was opened; `status` must already mark it as opened.
    pub fn on_cell_opened(
        &mut self,
        coords: Coord2,
        neighbors: &[Coord2],
        status: &Array2<CellStatus>,
    ) {
        self.cells.remove(&coords);
        self.cells.extend(
            neighbors
                .iter()
                .copied()
                .filter(|pos| status[pos.to_nd_index()].is_unknown()),
        );
    }

    pub fn on_cell_flagged(&mut self, coords: Coord2) {
        self.cells.remove(&coords);
    }

    /// Cells worth probing: the frontier, or every unknown cell in row-major order when the
    /// frontier is empty.
    pub fn candidates(&self, status: &Array2<CellStatus>) -> Vec<Coord2> {
        if !self.cells.is_empty() {
            return self.iter().collect();
        }

        let (rows, cols) = status.dim();
        let size = (rows as Coord, cols as Coord);
        iter_cells(size)
            .filter(|pos| status[pos.to_nd_index()].is_unknown())
            .collect()
    }
}
