use rustsat::solvers::SolveIncremental;

use super::*;

impl<S: SolveIncremental + Default> MineDeducer<S> {
    /// A cell that no consistent mine layout covers, or `None` when nothing can be proven.
    pub fn request_safe_move(&mut self) -> Result<Option<Coord2>> {
        self.run_deterministic_pass()?;
        let candidates = self.candidates();
        let found = self.find_guaranteed_safe(&candidates)?;
        if let Some((row, col)) = found {
            log::debug!("safe move ({row}, {col})");
        }
        Ok(found)
    }

    /// First candidate that is not provably a mine.
    ///
    /// This is a logically possible guess, not a probability-ranked one. `None` only when no
    /// unknown cell is left or every unknown cell is a proven mine.
    pub fn request_fallback_move(&mut self) -> Result<Option<Coord2>> {
        self.run_deterministic_pass()?;

        for coords in self.candidates() {
            if !self.is_provably_mine(coords)? {
                log::debug!("fallback move ({}, {})", coords.0, coords.1);
                return Ok(Some(coords));
            }
        }
        Ok(None)
    }
}
