use alloc::vec::Vec;

use ndarray::Array2;
use rustsat::solvers::{Solve, SolveIncremental, SolverResult};
use rustsat::types::{Clause, Lit, Var};
use rustsat_batsat::BasicSolver;
use serde::{Deserialize, Serialize};

use crate::*;

/// Answer of a satisfiability check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeVerdict {
    Sat,
    Unsat,
}

impl ProbeVerdict {
    pub const fn is_sat(self) -> bool {
        matches!(self, Self::Sat)
    }

    pub const fn is_unsat(self) -> bool {
        matches!(self, Self::Unsat)
    }
}

/// Trial assumption for a scoped probe. It never outlives the probe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assumption {
    Safe(Coord2),
    Mine(Coord2),
}

impl Assumption {
    pub const fn coords(self) -> Coord2 {
        match self {
            Self::Safe(coords) | Self::Mine(coords) => coords,
        }
    }
}

/// Monotonic set of facts over one `is_mine` variable per cell, backed by an incremental SAT
/// solver.
///
/// Variables are implicit: cell `(row, col)` maps to solver variable `row * cols + col`. A
/// variable only reaches the solver once a fact mentions it, so probes on untouched cells are
/// answered from the unconditional verdict.
pub struct KnowledgeBase<S = BasicSolver> {
    solver: S,
    size: Coord2,
    constrained: Array2<bool>,
    fact_count: usize,
    /// Set when a fact is unsatisfiable on its own, before the solver ever sees it.
    contradicted: bool,
    unconditional: Option<ProbeVerdict>,
}

impl<S: SolveIncremental + Default> KnowledgeBase<S> {
    pub fn new(size: Coord2) -> Self {
        Self {
            solver: S::default(),
            size,
            constrained: Array2::default(size.to_nd_index()),
            fact_count: 0,
            contradicted: false,
            unconditional: None,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    /// Number of facts asserted so far.
    pub fn fact_count(&self) -> usize {
        self.fact_count
    }

    /// Whether any fact mentions the variable of `coords`.
    pub fn is_constrained(&self, coords: Coord2) -> bool {
        self.constrained[coords.to_nd_index()]
    }

    pub fn assert_safe(&mut self, coords: Coord2) -> Result<()> {
        let lit = self.mine_lit(coords);
        self.add_unit(coords, !lit)
    }

    pub fn assert_mine(&mut self, coords: Coord2) -> Result<()> {
        let lit = self.mine_lit(coords);
        self.add_unit(coords, lit)
    }

    /// Asserts that exactly `count` of `neighbors` hold a mine.
    ///
    /// Encoded directly as clauses: every `count + 1` subset contains a safe cell and every
    /// `len - count + 1` subset contains a mine. Neighborhoods have at most eight cells, so the
    /// subset walk stays below 256 masks.
    pub fn assert_count(&mut self, neighbors: &[Coord2], count: u8) -> Result<()> {
        let lits: Vec<Lit> = neighbors.iter().map(|&pos| self.mine_lit(pos)).collect();
        let count = usize::from(count);
        let len = lits.len();
        debug_assert!(len <= 8, "neighborhood larger than eight cells");

        for &pos in neighbors {
            self.constrained[pos.to_nd_index()] = true;
        }
        self.fact_count += 1;
        self.unconditional = None;

        if count > len {
            self.contradicted = true;
            return Ok(());
        }

        for mask in 0u16..(1 << len) {
            let picked = mask.count_ones() as usize;
            let subset = || {
                lits.iter()
                    .enumerate()
                    .filter(move |&(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, &lit)| lit)
            };

            if picked == count + 1 {
                let clause: Clause = subset().map(|lit| !lit).collect();
                self.solver.add_clause(clause).map_err(backend_failure)?;
            }
            if picked == len - count + 1 {
                let clause: Clause = subset().collect();
                self.solver.add_clause(clause).map_err(backend_failure)?;
            }
        }

        Ok(())
    }

    /// Satisfiability of the asserted facts alone.
    pub fn check(&mut self) -> Result<ProbeVerdict> {
        if self.contradicted {
            return Ok(ProbeVerdict::Unsat);
        }
        if let Some(verdict) = self.unconditional {
            return Ok(verdict);
        }

        let verdict = to_verdict(self.solver.solve().map_err(backend_failure)?)?;
        self.unconditional = Some(verdict);
        Ok(verdict)
    }

    /// Scoped probe: satisfiability of the asserted facts plus `assumption`.
    ///
    /// The assumption is handed to the solver as an assumption literal, so nothing of it
    /// remains once the call returns.
    pub fn probe(&mut self, assumption: Assumption) -> Result<ProbeVerdict> {
        let coords = assumption.coords();
        if self.contradicted || !self.is_constrained(coords) {
            return self.check();
        }

        let lit = match assumption {
            Assumption::Safe(coords) => !self.mine_lit(coords),
            Assumption::Mine(coords) => self.mine_lit(coords),
        };
        let result = self.solver.solve_assumps(&[lit]).map_err(backend_failure)?;
        let verdict = to_verdict(result)?;
        log::trace!("probe {assumption:?} -> {verdict:?}");
        Ok(verdict)
    }

    fn add_unit(&mut self, coords: Coord2, lit: Lit) -> Result<()> {
        self.constrained[coords.to_nd_index()] = true;
        self.fact_count += 1;
        self.unconditional = None;

        let clause: Clause = [lit].into_iter().collect();
        self.solver.add_clause(clause).map_err(backend_failure)
    }

    fn mine_lit(&self, (row, col): Coord2) -> Lit {
        let idx = u32::from(row) * u32::from(self.size.1) + u32::from(col);
        Var::new(idx).pos_lit()
    }
}

fn to_verdict(result: SolverResult) -> Result<ProbeVerdict> {
    match result {
        SolverResult::Sat => Ok(ProbeVerdict::Sat),
        SolverResult::Unsat => Ok(ProbeVerdict::Unsat),
        SolverResult::Interrupted => {
            log::error!("SAT backend interrupted without a verdict");
            Err(GameError::Backend)
        }
    }
}
