//! Labeling (total `in`/`out` over arguments) and the grounded fixpoint that
//! seeds it. Grounded on `taas__lab_*`/`taas__labeled_correctly*` (implied by
//! their call sites in `solve()`) and the grounded-labeling loop that
//! precedes `solve()` in the original dispatch.

use rand::Rng;

use crate::aaf::Aaf;
use crate::bitset::BitSet;
use crate::ArgId;

/// Total `in`/`out` labeling: bit set ⇒ `in`, else `out`.
#[derive(Debug, Clone)]
pub struct Labeling {
    in_: BitSet,
}

impl Labeling {
    pub fn new(n: usize) -> Self {
        Self {
            in_: BitSet::new(n),
        }
    }

    pub fn is_in(&self, a: ArgId) -> bool {
        self.in_.get(a.index())
    }

    pub fn set_in(&mut self, a: ArgId) {
        self.in_.set(a.index());
    }

    pub fn set_out(&mut self, a: ArgId) {
        self.in_.unset(a.index());
    }

    pub fn set(&mut self, a: ArgId, value_in: bool) {
        self.in_.set_to(a.index(), value_in);
    }

    pub fn all_out(&mut self) {
        self.in_.unset_all();
    }

    pub fn randomize(&mut self, rng: &mut impl Rng) {
        for i in 0..self.in_.len() {
            self.in_.set_to(i, rng.gen_bool(0.5));
        }
    }

    /// `a` is correctly labeled iff: labeled `in` and no parent is `in`; or
    /// labeled `out` and some parent is `in`.
    pub fn is_correct(&self, aaf: &Aaf, a: ArgId) -> bool {
        if self.is_in(a) {
            aaf.parents(a).iter().all(|p| !self.is_in(*p))
        } else {
            aaf.parents(a).iter().any(|p| self.is_in(*p))
        }
    }

    /// Correctness of `e` under the hypothesis that `pivot` is labeled
    /// `pivot_in` instead of whatever this labeling currently says (every
    /// other argument's label, including `e`'s own if `e != pivot`, is taken
    /// as-is). Used by the flip-gain computation (`engine::flip_gain`) to
    /// score a toggle before committing to it, without allocating a scratch
    /// labeling.
    pub fn is_correct_with_override(&self, aaf: &Aaf, e: ArgId, pivot: ArgId, pivot_in: bool) -> bool {
        let label_of = |x: ArgId| if x == pivot { pivot_in } else { self.is_in(x) };
        if label_of(e) {
            aaf.parents(e).iter().all(|p| !label_of(*p))
        } else {
            aaf.parents(e).iter().any(|p| label_of(*p))
        }
    }

    pub fn printable_in_order<'a>(&self, aaf: &'a Aaf) -> Vec<&'a str> {
        aaf.args()
            .filter(|a| self.is_in(*a))
            .map(|a| aaf.name(a))
            .collect()
    }
}

/// Partial labeling fixed by the grounded fixpoint: disjoint `in_`/`out`
/// bitsets. Arguments in neither are *undecided* and left to the engine.
#[derive(Debug, Clone)]
pub struct Grounded {
    in_: BitSet,
    out: BitSet,
}

impl Grounded {
    pub fn is_in(&self, a: ArgId) -> bool {
        self.in_.get(a.index())
    }

    pub fn is_out(&self, a: ArgId) -> bool {
        self.out.get(a.index())
    }

    pub fn is_fixed(&self, a: ArgId) -> bool {
        self.is_in(a) || self.is_out(a)
    }

    /// The grounded-`out` bitset, used by the engine to exclude grounded-out
    /// arguments when sampling an odd-cycle escape or self-loop replacement.
    pub fn out(&self) -> &BitSet {
        &self.out
    }

    /// Fixpoint: unattacked arguments start `in`; an argument becomes `in`
    /// once every parent is `out`, `out` once some parent is `in`. Driven by
    /// a worklist seeded with the initial arguments so each argument is
    /// re-examined only when a neighbour's status actually changed, rather
    /// than re-scanning all `n` arguments every pass.
    pub fn compute(aaf: &Aaf) -> Self {
        let n = aaf.len();
        let mut in_ = BitSet::new(n);
        let mut out = BitSet::new(n);
        let mut worklist: Vec<ArgId> = Vec::new();

        for a in aaf.args() {
            if aaf.is_initial(a) {
                in_.set(a.index());
                worklist.push(a);
            }
        }

        while let Some(a) = worklist.pop() {
            for &child in aaf.children(a) {
                if in_.get(child.index()) || out.get(child.index()) {
                    continue;
                }
                if in_.get(a.index()) {
                    out.set(child.index());
                    worklist.push(child);
                } else if aaf.parents(child).iter().all(|p| out.get(p.index())) {
                    in_.set(child.index());
                    worklist.push(child);
                }
            }
        }

        Grounded { in_, out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn aaf(text: &str) -> Aaf {
        Aaf::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn unattacked_argument_is_in() {
        let a = aaf("a\nb\n#\na b\n");
        let g = Grounded::compute(&a);
        let x = a.id_of("a").unwrap();
        let y = a.id_of("b").unwrap();
        assert!(g.is_in(x));
        assert!(g.is_out(y));
    }

    #[test]
    fn chain_propagates() {
        let a = aaf("a\nb\nc\n#\na b\nb c\n");
        let g = Grounded::compute(&a);
        let x = a.id_of("a").unwrap();
        let y = a.id_of("b").unwrap();
        let z = a.id_of("c").unwrap();
        assert!(g.is_in(x));
        assert!(g.is_out(y));
        assert!(g.is_in(z));
    }

    #[test]
    fn cycle_leaves_everyone_undecided() {
        let a = aaf("a\nb\n#\na b\nb a\n");
        let g = Grounded::compute(&a);
        let x = a.id_of("a").unwrap();
        let y = a.id_of("b").unwrap();
        assert!(!g.is_fixed(x));
        assert!(!g.is_fixed(y));
    }

    #[test]
    fn correctness_predicate() {
        let a = aaf("a\nb\n#\na b\n");
        let x = a.id_of("a").unwrap();
        let y = a.id_of("b").unwrap();
        let mut lab = Labeling::new(a.len());
        lab.set_in(x);
        assert!(lab.is_correct(&a, x));
        assert!(lab.is_correct(&a, y));
        lab.set_in(y);
        assert!(!lab.is_correct(&a, y));
    }
}
