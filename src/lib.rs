//! Stochastic local search for SE-ST (one stable extension) on abstract
//! argumentation frameworks, ported from the `taas-haywood` solver: the
//! same data structures (bitset, random-access set, flip-gain heap, odd-cycle
//! collection) and the same restart/move-selection/escape control flow,
//! rebuilt around a typed, owned-RNG engine instead of globals.

pub mod aaf;
pub mod bitset;
pub mod cli;
pub mod engine;
pub mod error;
pub mod heap;
pub mod labeling;
pub mod logging;
pub mod occ;
pub mod raset;

pub use aaf::Aaf;
pub use engine::{Config, Outcome};
pub use error::{Error, Result};
pub use labeling::{Grounded, Labeling};

/// Dense internal argument identifier, `< n` for an AAF of `n` arguments.
///
/// A newtype rather than a bare `usize` so the type system keeps argument
/// indices distinct from attack counts, iteration counters, and heap keys
/// throughout the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArgId(u32);

impl ArgId {
    pub fn new(i: usize) -> Self {
        Self(i.try_into().expect("argument index fits in u32"))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for ArgId {
    fn from(i: usize) -> Self {
        Self::new(i)
    }
}

impl From<ArgId> for usize {
    fn from(a: ArgId) -> Self {
        a.index()
    }
}

impl std::fmt::Display for ArgId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
