use alloc::collections::BTreeSet;

use rustsat::solvers::SolveIncremental;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoplayOutcome {
    Won,
    Lost { mine: Coord2 },
    /// The board stopped answering or no unknown cell was left to try.
    Stuck,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayReport {
    pub outcome: AutoplayOutcome,
    pub safe_moves: u32,
    /// Moves that were not proven safe, the opening move included.
    pub guesses: u32,
    pub flags: BTreeSet<Coord2>,
}

/// Plays `board` to the end with `deducer`, opening `start` first.
///
/// Proven-safe moves are preferred; a logically possible guess is made only when none exists.
pub fn autoplay<B, S>(
    board: &mut B,
    deducer: &mut MineDeducer<S>,
    start: Coord2,
) -> Result<AutoplayReport>
where
    B: BoardReader + ?Sized,
    S: SolveIncremental + Default,
{
    if board.size() != deducer.size() {
        return Err(GameError::InvalidBoardShape);
    }

    let mut safe_moves = 0;
    let mut guesses = 1;
    let mut next = start;

    let outcome = loop {
        let opened = board.open(next)?;
        match opened.outcome {
            RevealOutcome::HitMine => break AutoplayOutcome::Lost { mine: next },
            outcome if !outcome.has_update() => {
                log::warn!("board ignored move ({}, {})", next.0, next.1);
                break AutoplayOutcome::Stuck;
            }
            _ => {}
        }

        deducer.add_observations(opened.revealed)?;
        if opened.outcome == RevealOutcome::Won {
            break AutoplayOutcome::Won;
        }

        if let Some(coords) = deducer.request_safe_move()? {
            safe_moves += 1;
            next = coords;
        } else if let Some(coords) = deducer.request_fallback_move()? {
            guesses += 1;
            next = coords;
        } else {
            break AutoplayOutcome::Stuck;
        }
    };

    let report = AutoplayReport {
        outcome,
        safe_moves,
        guesses,
        flags: deducer.list_flags(),
    };
    log::info!(
        "autoplay finished {:?} after {} safe moves and {} guesses",
        report.outcome,
        report.safe_moves,
        report.guesses
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(size: Coord2, mines: &[Coord2], start: Coord2) -> (SimBoard, AutoplayReport) {
        let mut board = SimBoard::new(MineLayout::from_mine_coords(size, mines).unwrap());
        let mut deducer = MineDeducer::with_size(size);
        let report = autoplay(&mut board, &mut deducer, start).unwrap();
        (board, report)
    }

    #[test]
    fn solvable_board_is_won_without_extra_guesses() {
        let (board, report) = play((3, 3), &[(2, 2)], (0, 0));

        assert_eq!(report.outcome, AutoplayOutcome::Won);
        assert_eq!(report.guesses, 1);
        assert_eq!(board.state(), BoardState::Won);
    }

    #[test]
    fn deduced_moves_finish_a_strip() {
        // The opening 1 pins (0, 2); after one guess at (0, 3), (0, 4) is provably safe.
        let (board, report) = play((1, 6), &[(0, 2), (0, 5)], (0, 0));

        assert_eq!(report.outcome, AutoplayOutcome::Won);
        assert_eq!(report.guesses, 2);
        assert_eq!(report.safe_moves, 1);
        assert_eq!(report.flags, BTreeSet::from([(0, 2), (0, 5)]));
        assert_eq!(board.revealed_at((0, 4)), Some(1));
    }

    #[test]
    fn opening_on_a_mine_loses() {
        let (_, report) = play((2, 2), &[(1, 1)], (1, 1));

        assert_eq!(report.outcome, AutoplayOutcome::Lost { mine: (1, 1) });
        assert_eq!(report.safe_moves, 0);
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        let mut board = SimBoard::new(MineLayout::from_mine_coords((2, 2), &[]).unwrap());
        let mut deducer = MineDeducer::with_size((3, 3));

        assert_eq!(
            autoplay(&mut board, &mut deducer, (0, 0)),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn safe_moves_never_hit_mines() {
        let config = GameConfig::beginner();
        for seed in 0..12 {
            let layout =
                RandomLayoutGenerator::new(seed, (4, 4), StartCell::AlwaysZero).generate(config);
            let mut board = SimBoard::new(layout.clone());
            let mut deducer = MineDeducer::with_size(config.size);

            let report = autoplay(&mut board, &mut deducer, (4, 4)).unwrap();

            for &flag in &report.flags {
                assert!(layout.contains_mine(flag), "seed {seed}: false flag {flag:?}");
            }
            if let AutoplayOutcome::Lost { mine } = report.outcome {
                assert!(report.guesses > 1, "seed {seed}: lost at {mine:?} without guessing");
            }
        }
    }
}
