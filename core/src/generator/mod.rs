use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How much of the first move a generator keeps free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartCell {
    Random,
    SimpleSafe,
    AlwaysZero,
}
