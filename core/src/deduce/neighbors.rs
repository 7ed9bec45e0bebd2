use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Neighbor list of a single cell; never more than eight entries.
pub type Neighbors = SmallVec<[Coord2; 8]>;

/// Adjacency of every cell, computed once per board size.
#[derive(Clone, Debug, PartialEq)]
pub struct NeighborIndex {
    size: Coord2,
    adjacency: Array2<Neighbors>,
}

impl NeighborIndex {
    pub fn new(size: Coord2) -> Self {
        let mut adjacency: Array2<Neighbors> = Array2::default(size.to_nd_index());
        for coords in iter_cells(size) {
            adjacency[coords.to_nd_index()] = NeighborIter::new(coords, size).collect();
        }
        Self { size, adjacency }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Neighbors of `coords`, which must already be validated.
    pub fn neighbors(&self, coords: Coord2) -> &[Coord2] {
        &self.adjacency[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_board_shape() {
        let index = NeighborIndex::new((2, 3));

        assert_eq!(index.neighbors((0, 0)), [(0, 1), (1, 0), (1, 1)]);
        assert_eq!(index.neighbors((1, 1)).len(), 5);
        assert_eq!(index.neighbors((0, 2)), [(0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn rejects_out_of_bounds() {
        let index = NeighborIndex::new((2, 3));

        assert_eq!(index.validate_coords((1, 2)), Ok((1, 2)));
        assert_eq!(index.validate_coords((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(index.validate_coords((0, 3)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        let index = NeighborIndex::new((1, 1));
        assert!(index.neighbors((0, 0)).is_empty());
    }
}
