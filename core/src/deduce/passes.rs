use alloc::collections::BTreeSet;

use rustsat::solvers::SolveIncremental;

use super::*;

impl<S: SolveIncremental + Default> MineDeducer<S> {
    /// Flags every candidate that is provably a mine.
    ///
    /// All probes of one call see the same knowledge base: verdicts are collected first and
    /// the new mine facts are asserted afterwards.
    pub fn find_guaranteed_mines(&mut self, candidates: &[Coord2]) -> Result<BTreeSet<Coord2>> {
        self.ensure_consistent()?;

        let mut newly_flagged = BTreeSet::new();
        for &coords in candidates {
            let coords = self.neighbors.validate_coords(coords)?;
            if self.is_unknown(coords) && self.is_provably_mine(coords)? {
                newly_flagged.insert(coords);
            }
        }

        if newly_flagged.is_empty() {
            return Ok(newly_flagged);
        }

        for &coords in &newly_flagged {
            self.knowledge.assert_mine(coords)?;
            self.status[coords.to_nd_index()] = CellStatus::Flagged;
            self.flags.insert(coords);
            self.frontier.on_cell_flagged(coords);
            self.stats.flagged += 1;
        }
        self.cache.invalidate();
        log::debug!("flagged {} cells: {newly_flagged:?}", newly_flagged.len());

        Ok(newly_flagged)
    }

    /// First candidate that is provably safe, if any.
    pub fn find_guaranteed_safe(&mut self, candidates: &[Coord2]) -> Result<Option<Coord2>> {
        self.ensure_consistent()?;

        for &coords in candidates {
            let coords = self.neighbors.validate_coords(coords)?;
            if self.is_unknown(coords) && self.is_provably_safe(coords)? {
                return Ok(Some(coords));
            }
        }
        Ok(None)
    }

    /// Folds every provable mine among the current candidates into the knowledge base.
    pub(super) fn run_deterministic_pass(&mut self) -> Result<()> {
        self.stats.passes += 1;
        let candidates = self.candidates();
        let flagged = self.find_guaranteed_mines(&candidates)?;
        log::trace!(
            "pass {} over {} candidates, {} new flags",
            self.stats.passes,
            candidates.len(),
            flagged.len()
        );
        Ok(())
    }

    /// A cell is provably a mine when assuming it safe is unsatisfiable.
    pub(super) fn is_provably_mine(&mut self, coords: Coord2) -> Result<bool> {
        if let Some(verdict) = self.cache.provably_mine(coords) {
            self.stats.cache_hits += 1;
            return Ok(verdict);
        }

        self.stats.probes += 1;
        let verdict = self.knowledge.probe(Assumption::Safe(coords))?.is_unsat();
        self.cache.record_mine(coords, verdict);
        Ok(verdict)
    }

    /// A cell is provably safe when assuming it a mine is unsatisfiable.
    pub(super) fn is_provably_safe(&mut self, coords: Coord2) -> Result<bool> {
        if let Some(verdict) = self.cache.provably_safe(coords) {
            self.stats.cache_hits += 1;
            return Ok(verdict);
        }

        self.stats.probes += 1;
        let verdict = self.knowledge.probe(Assumption::Mine(coords))?.is_unsat();
        self.cache.record_safe(coords, verdict);
        Ok(verdict)
    }

    /// Refuses to probe a knowledge base that has no model: every probe would come back
    /// unsatisfiable and every cell would look like a mine.
    fn ensure_consistent(&mut self) -> Result<()> {
        if self.poisoned {
            return Err(GameError::Contradiction);
        }
        if self.knowledge.check()?.is_unsat() {
            log::warn!(
                "observations are contradictory after {} facts",
                self.knowledge.fact_count()
            );
            self.poisoned = true;
            return Err(GameError::Contradiction);
        }
        Ok(())
    }
}
