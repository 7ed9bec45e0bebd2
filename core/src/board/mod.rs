use alloc::vec::Vec;

use crate::*;
pub use layout::*;
pub use sim::*;

mod layout;
mod sim;

/// Result of opening one cell on a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// What a board reports back after a move: the outcome and every cell it newly revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenReport {
    pub outcome: RevealOutcome,
    pub revealed: Vec<Observation>,
}

impl OpenReport {
    pub fn unchanged() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            revealed: Vec::new(),
        }
    }
}

/// The collaborator that turns move requests into observations.
///
/// A screen scraper, a game server, or [`SimBoard`] for a known layout.
pub trait BoardReader {
    fn size(&self) -> Coord2;

    /// Opens `coords`, reporting every cell revealed as a consequence (zero regions flood).
    fn open(&mut self, coords: Coord2) -> Result<OpenReport>;
}
