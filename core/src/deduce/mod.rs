//! Incremental deduction over board observations.
//!
//! [`MineDeducer`] owns a [`KnowledgeBase`] of facts, the [`Frontier`] of unknown cells next to
//! opened ones, and a [`QueryCache`] of probe verdicts. Observations flow in through
//! [`MineDeducer::add_observation`]; moves flow out through
//! [`MineDeducer::request_safe_move`] and [`MineDeducer::request_fallback_move`].

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use ndarray::Array2;
use rustsat::solvers::SolveIncremental;
use rustsat_batsat::BasicSolver;
use serde::{Deserialize, Serialize};

use crate::*;

pub use cache::*;
pub use frontier::*;
pub use knowledge::*;
pub use neighbors::*;

mod cache;
mod frontier;
mod knowledge;
mod moves;
mod neighbors;
mod passes;

/// A revealed cell and its adjacent-mine count, as reported by a board reader.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub coords: Coord2,
    pub count: u8,
}

impl Observation {
    pub const fn new(coords: Coord2, count: u8) -> Self {
        Self { coords, count }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeduceStats {
    /// Solver calls made for scoped probes.
    pub probes: u64,
    pub cache_hits: u64,
    /// Deterministic passes run, including the ones inside move requests.
    pub passes: u64,
    pub opened: CellCount,
    pub flagged: CellCount,
}

/// Minesweeper inference engine for a board of fixed size.
pub struct MineDeducer<S = BasicSolver> {
    neighbors: NeighborIndex,
    status: Array2<CellStatus>,
    knowledge: KnowledgeBase<S>,
    frontier: Frontier,
    cache: QueryCache,
    flags: BTreeSet<Coord2>,
    stats: DeduceStats,
    poisoned: bool,
}

impl MineDeducer {
    /// Engine backed by the default batsat solver.
    pub fn with_size(size: Coord2) -> Self {
        Self::new(size)
    }
}

impl<S: SolveIncremental + Default> MineDeducer<S> {
    pub fn new(size: Coord2) -> Self {
        Self {
            neighbors: NeighborIndex::new(size),
            status: Array2::default(size.to_nd_index()),
            knowledge: KnowledgeBase::new(size),
            frontier: Frontier::new(),
            cache: QueryCache::new(),
            flags: BTreeSet::new(),
            stats: DeduceStats::default(),
            poisoned: false,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.neighbors.size()
    }

    pub fn cell_status(&self, coords: Coord2) -> Result<CellStatus> {
        let coords = self.neighbors.validate_coords(coords)?;
        Ok(self.status[coords.to_nd_index()])
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn stats(&self) -> DeduceStats {
        self.stats
    }

    /// Whether a contradiction was detected; only [`MineDeducer::reset`] clears it.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Snapshot of every cell proven to be a mine.
    pub fn list_flags(&self) -> BTreeSet<Coord2> {
        self.flags.clone()
    }

    /// Feeds one revealed cell into the knowledge base.
    ///
    /// Repeating an observation for an opened cell is a no-op. With `defer_update` the
    /// deterministic pass is skipped and [`MineDeducer::process_frontier`] must follow once
    /// the batch is in.
    pub fn add_observation(&mut self, coords: Coord2, count: u8, defer_update: bool) -> Result<()> {
        let coords = self.neighbors.validate_coords(coords)?;
        if count > 8 {
            return Err(GameError::InvalidClue { coords, count });
        }
        if self.poisoned {
            return Err(GameError::Contradiction);
        }

        match self.status[coords.to_nd_index()] {
            CellStatus::Opened(known) => {
                if known != count {
                    log::warn!(
                        "({}, {}) already opened as {known}, ignoring {count}",
                        coords.0,
                        coords.1
                    );
                }
                return Ok(());
            }
            CellStatus::Flagged => {
                log::warn!(
                    "({}, {}) was proven a mine but reported open",
                    coords.0,
                    coords.1
                );
                self.poisoned = true;
                return Err(GameError::Contradiction);
            }
            CellStatus::Unknown => {}
        }

        self.status[coords.to_nd_index()] = CellStatus::Opened(count);
        self.stats.opened += 1;

        let neighbors = self.neighbors.neighbors(coords);
        self.knowledge.assert_safe(coords)?;
        self.knowledge.assert_count(neighbors, count)?;
        self.frontier.on_cell_opened(coords, neighbors, &self.status);
        self.cache.invalidate();
        log::trace!("observed ({}, {}) = {count}", coords.0, coords.1);

        if defer_update {
            Ok(())
        } else {
            self.run_deterministic_pass()
        }
    }

    /// Loads a batch of simultaneous reveals, such as a flood-opened region, then runs a
    /// single deterministic pass.
    pub fn add_observations<I>(&mut self, observations: I) -> Result<()>
    where
        I: IntoIterator<Item = Observation>,
    {
        for Observation { coords, count } in observations {
            self.add_observation(coords, count, true)?;
        }
        self.process_frontier()
    }

    /// Runs the deferred deterministic pass; nothing happens while the frontier is empty.
    pub fn process_frontier(&mut self) -> Result<()> {
        if self.frontier.is_empty() {
            return Ok(());
        }
        self.run_deterministic_pass()
    }

    /// Drops every fact, flag and cached verdict, keeping the board size.
    pub fn reset(&mut self) {
        *self = Self::new(self.size());
    }

    /// Cells still worth probing, frontier first.
    fn candidates(&self) -> Vec<Coord2> {
        self.frontier.candidates(&self.status)
    }

    fn is_unknown(&self, coords: Coord2) -> bool {
        self.status[coords.to_nd_index()].is_unknown()
    }
}
