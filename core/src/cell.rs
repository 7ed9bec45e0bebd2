use serde::{Deserialize, Serialize};

/// What the deducer knows about a single cell.
///
/// A cell starts `Unknown` and moves to exactly one of the other two states, never back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Unknown,
    /// Revealed by the board reader, with its adjacent-mine count.
    Opened(u8),
    /// Proven to hold a mine.
    Flagged,
}

impl CellStatus {
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub const fn is_opened(self) -> bool {
        matches!(self, Self::Opened(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn clue(self) -> Option<u8> {
        match self {
            Self::Opened(count) => Some(count),
            _ => None,
        }
    }
}
