//! Random-access set: a subset of `[0, n)` supporting O(1) add/remove/
//! membership/indexed-access/uniform-random-element, backed by a dense
//! array plus a reverse index. Mirrors `raset__*` in the original solver's
//! `util/raset.c`.

use rand::Rng;

use crate::ArgId;

#[derive(Debug, Clone)]
pub struct RaSet {
    /// Dense, insertion-ordered (modulo swap-remove) list of present elements.
    elems: Vec<ArgId>,
    /// `index[a]` is `Some(k)` iff `a` is present, at `elems[k]`.
    index: Vec<Option<u32>>,
}

impl RaSet {
    pub fn new_empty(universe_size: usize) -> Self {
        Self {
            elems: Vec::new(),
            index: vec![None; universe_size],
        }
    }

    pub fn reset(&mut self) {
        self.elems.clear();
        self.index.fill(None);
    }

    pub fn count(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn contains(&self, a: ArgId) -> bool {
        self.index[a.index()].is_some()
    }

    pub fn add(&mut self, a: ArgId) {
        if self.contains(a) {
            return;
        }
        let k = self.elems.len() as u32;
        self.elems.push(a);
        self.index[a.index()] = Some(k);
    }

    pub fn remove(&mut self, a: ArgId) {
        let Some(k) = self.index[a.index()] else {
            return;
        };
        let k = k as usize;
        let last = self.elems.len() - 1;
        self.elems.swap(k, last);
        self.elems.pop();
        self.index[a.index()] = None;
        if k != last {
            let moved = self.elems[k];
            self.index[moved.index()] = Some(k as u32);
        }
    }

    /// The k-th currently-present element, in whatever order `add`/`remove`
    /// has left them (no ordering guarantee beyond "stable until the next
    /// mutation").
    pub fn at(&self, k: usize) -> ArgId {
        self.elems[k]
    }

    pub fn random_element(&self, rng: &mut impl Rng) -> ArgId {
        debug_assert!(!self.is_empty());
        let k = rng.gen_range(0..self.elems.len());
        self.elems[k]
    }

    /// Uniform random element not present in `mask`, or `None` if every
    /// present element is masked out. Bounded rejection sampling with a
    /// filtered-scan fallback so this provably terminates.
    pub fn random_element_skipping(
        &self,
        mask: &crate::bitset::BitSet,
        rng: &mut impl Rng,
    ) -> Option<ArgId> {
        if self.is_empty() {
            return None;
        }
        let tries = (self.elems.len() * 4).max(8);
        for _ in 0..tries {
            let candidate = self.random_element(rng);
            if !mask.get(candidate.index()) {
                return Some(candidate);
            }
        }
        self.elems.iter().copied().find(|a| !mask.get(a.index()))
    }
}

/// Same bounded-rejection-then-scan strategy as
/// [`RaSet::random_element_skipping`], for a plain slice (used for the
/// self-loop-replacement parent lookup, where the candidate pool is a
/// `children`/`parents` adjacency list rather than a `RaSet`).
pub fn sample_skipping(items: &[ArgId], mask: &crate::bitset::BitSet, rng: &mut impl Rng) -> Option<ArgId> {
    if items.is_empty() {
        return None;
    }
    let tries = (items.len() * 4).max(8);
    for _ in 0..tries {
        let candidate = items[rng.gen_range(0..items.len())];
        if !mask.get(candidate.index()) {
            return Some(candidate);
        }
    }
    items.iter().copied().find(|a| !mask.get(a.index()))
}
