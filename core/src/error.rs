use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Clue {count} at {coords:?} is larger than any neighborhood")]
    InvalidClue { coords: Coord2, count: u8 },
    #[error("Observations contradict each other, reset required")]
    Contradiction,
    #[error("Satisfiability backend failed to answer")]
    Backend,
    #[error("Board shape does not fit the coordinate range")]
    InvalidBoardShape,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Maps a backend error into [`GameError::Backend`], logging the original cause.
pub(crate) fn backend_failure<E: core::fmt::Display>(err: E) -> GameError {
    log::error!("SAT backend failure: {err}");
    GameError::Backend
}
