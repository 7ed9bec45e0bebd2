use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::num::Saturating;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardState {
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Board reader backed by a known [`MineLayout`], for tests, benchmarks and self-play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimBoard {
    mine_layout: MineLayout,
    revealed: Array2<Option<u8>>,
    revealed_count: Saturating<CellCount>,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

impl SimBoard {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            revealed: Array2::default(size.to_nd_index()),
            revealed_count: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn revealed_at(&self, coords: Coord2) -> Option<u8> {
        self.revealed[coords.to_nd_index()]
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Opens `coords`; a zero flood-opens its whole region in breadth-first order.
    pub fn reveal(&mut self, coords: Coord2) -> Result<OpenReport> {
        let coords = self.mine_layout.validate_coords(coords)?;
        if self.revealed_at(coords).is_some() {
            return Ok(OpenReport::unchanged());
        }
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }

        if self.mine_layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.state = BoardState::Lost;
            log::debug!("mine hit at ({}, {})", coords.0, coords.1);
            return Ok(OpenReport {
                outcome: RevealOutcome::HitMine,
                revealed: Vec::new(),
            });
        }

        let mut revealed = Vec::new();
        let mut visited = BTreeSet::from([coords]);
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let count = self.mine_layout.adjacent_mine_count(visit_coords);
            self.revealed[visit_coords.to_nd_index()] = Some(count);
            self.revealed_count += 1;
            revealed.push(Observation::new(visit_coords, count));

            if count == 0 {
                for pos in self.mine_layout.neighbors_of(visit_coords) {
                    if self.revealed_at(pos).is_none() && visited.insert(pos) {
                        to_visit.push_back(pos);
                    }
                }
            }
        }

        let outcome = if self.revealed_count == Saturating(self.mine_layout.safe_cell_count()) {
            self.state = BoardState::Won;
            RevealOutcome::Won
        } else {
            self.state = BoardState::Active;
            RevealOutcome::Revealed
        };

        Ok(OpenReport { outcome, revealed })
    }
}

impl BoardReader for SimBoard {
    fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    fn open(&mut self, coords: Coord2) -> Result<OpenReport> {
        self.reveal(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> SimBoard {
        SimBoard::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn reveal_hits_mine_and_records_it() {
        let mut board = board((2, 2), &[(0, 0)]);

        let report = board.reveal((0, 0)).unwrap();

        assert_eq!(report.outcome, RevealOutcome::HitMine);
        assert!(report.revealed.is_empty());
        assert_eq!(board.state(), BoardState::Lost);
        assert_eq!(board.triggered_mine(), Some((0, 0)));
    }

    #[test]
    fn zero_region_floods_to_its_border() {
        let mut board = board((3, 3), &[(2, 2)]);

        let report = board.reveal((0, 0)).unwrap();

        assert_eq!(report.outcome, RevealOutcome::Won);
        assert_eq!(report.revealed.len(), 8);
        assert_eq!(report.revealed[0], Observation::new((0, 0), 0));
        assert!(report.revealed.contains(&Observation::new((1, 1), 1)));
        assert_eq!(board.revealed_at((2, 2)), None);
    }

    #[test]
    fn repeated_reveal_reports_nothing() {
        let mut board = board((1, 3), &[(0, 2)]);

        assert_eq!(board.reveal((0, 1)).unwrap().outcome, RevealOutcome::Revealed);
        assert_eq!(board.reveal((0, 1)).unwrap(), OpenReport::unchanged());
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn finished_board_rejects_moves() {
        let mut board = board((1, 2), &[(0, 0)]);

        assert_eq!(board.reveal((0, 1)).unwrap().outcome, RevealOutcome::Won);
        assert_eq!(board.reveal((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(board.reveal((0, 5)), Err(GameError::InvalidCoords));
    }
}
