//! The SLS engine: initialization, restart policy, move selection
//! (mislabeled-random / greedy / arbitrary-random), odd-cycle escape,
//! self-loop handling, enforce-out propagation, neighbourhood re-check,
//! incremental mislabeled/heap maintenance, and local-minimum restart.
//! Verbatim control flow of `solve()` in the original C solver, modulo a
//! small number of deliberate deviations documented on `engine::config` and
//! on the self-loop-replacement step below.

pub mod config;

pub use config::Config;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::aaf::Aaf;
use crate::heap::BinaryHeap;
use crate::labeling::{Grounded, Labeling};
use crate::occ::{Occ, Unsatisfiable};
use crate::raset::{sample_skipping, RaSet};
use crate::ArgId;

/// Result of a solve attempt. `Timeout` means the iteration cap was hit —
/// not a proof that no stable labeling exists.
#[derive(Debug)]
pub enum Outcome {
    Stable(Labeling),
    Unsatisfiable,
    Timeout,
}

/// Runs the search with a fresh PRNG seeded from `cfg.rseed` (or wall-clock
/// time if unset). For deterministic tests, use [`solve_with_rng`] directly
/// with a caller-supplied generator.
pub fn solve(aaf: &Aaf, grounded: &Grounded, cfg: &Config) -> Outcome {
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.resolved_seed());
    solve_with_rng(aaf, grounded, cfg, &mut rng)
}

pub fn solve_with_rng(aaf: &Aaf, grounded: &Grounded, cfg: &Config, rng: &mut impl Rng) -> Outcome {
    let n = aaf.len();

    let occ = if cfg.escapeoddcycles() {
        match Occ::build(aaf) {
            Ok(occ) => Some(occ),
            Err(Unsatisfiable) => {
                tracing::debug!("unattacked odd cycle found at startup, no stable extension exists");
                return Outcome::Unsatisfiable;
            }
        }
    } else {
        None
    };

    let maxit = cfg.resolved_maxit(n as u64);
    let restart = cfg.resolved_restart(n as u64);

    let mut lab = Labeling::new(n);
    let mut mislabeled = RaSet::new_empty(n);
    let mut to_be_checked = RaSet::new_empty(n);
    let mut heap: Option<BinaryHeap> = None;

    let mut min_mislabeled: usize = usize::MAX;
    let mut min_mislabeled_iter: u64 = 0;
    let mut iterations: u64 = 0;

    loop {
        let mut force_restart = false;
        let locminres = cfg.locminres();
        if locminres > 0.0 {
            if mislabeled.count() < min_mislabeled {
                min_mislabeled = mislabeled.count();
                min_mislabeled_iter = iterations;
            } else {
                let x = (iterations - min_mislabeled_iter) as f64 + locminres;
                let log_b_x = x.ln() / locminres.ln();
                let prob = 1.0 - 1.0 / log_b_x;
                if rng.gen::<f64>() < prob {
                    force_restart = true;
                }
            }
        }

        let should_restart = iterations == 0
            || (restart > 0 && (iterations as i64) % restart == 0)
            || force_restart;

        if should_restart {
            tracing::debug!(iterations, force_restart, "restarting search");
            if cfg.initout() {
                lab.all_out();
            } else {
                lab.randomize(rng);
            }
            for a in aaf.args() {
                if grounded.is_in(a) {
                    lab.set_in(a);
                } else if grounded.is_out(a) {
                    lab.set_out(a);
                }
            }

            mislabeled.reset();
            for a in aaf.args() {
                if !grounded.is_fixed(a) && !lab.is_correct(aaf, a) {
                    mislabeled.add(a);
                }
            }

            if mislabeled.is_empty() {
                tracing::info!(iterations, "stable labeling found after restart overlay");
                return Outcome::Stable(lab);
            }

            if locminres > 0.0 {
                min_mislabeled = mislabeled.count();
                min_mislabeled_iter = 0;
            }

            if cfg.greedyprob() > 0.0 {
                let mut h = BinaryHeap::new(n);
                if cfg.greedyincall() {
                    for a in aaf.args() {
                        if !grounded.is_fixed(a) {
                            h.insert(a, flip_gain(aaf, &lab, a));
                        }
                    }
                } else {
                    for k in 0..mislabeled.count() {
                        let a = mislabeled.at(k);
                        h.insert(a, flip_gain(aaf, &lab, a));
                    }
                }
                heap = Some(h);
            }
        }

        iterations += 1;
        if iterations >= maxit {
            tracing::info!(iterations, "iteration cap reached, no stable labeling found");
            return Outcome::Timeout;
        }

        let draw: f64 = rng.gen();
        let greedyprob = cfg.greedyprob();
        let mut sel_arg = if draw < greedyprob && heap.as_ref().is_some_and(|h| !h.is_empty()) {
            heap.as_mut().unwrap().extract_min().unwrap()
        } else if draw < greedyprob + cfg.randsel() {
            loop {
                let candidate = ArgId::new(rng.gen_range(0..n));
                if !grounded.is_fixed(candidate) {
                    break candidate;
                }
            }
        } else {
            mislabeled.random_element(rng)
        };

        to_be_checked.reset();

        if let Some(occ) = &occ {
            if occ.contains(sel_arg) {
                let attackers = occ.attackers(sel_arg);
                let mut any_attacker_in = false;
                for k in 0..attackers.count() {
                    if lab.is_in(attackers.at(k)) {
                        any_attacker_in = true;
                        break;
                    }
                }
                if !any_attacker_in {
                    tracing::debug!(arg = %sel_arg, "escaping odd cycle");
                    match attackers.random_element_skipping(grounded.out(), rng) {
                        Some(attacker) => sel_arg = attacker,
                        None => {
                            tracing::debug!("all attackers of odd cycle are grounded-out, unsatisfiable");
                            return Outcome::Unsatisfiable;
                        }
                    }
                }
            }
        }

        if lab.is_in(sel_arg) {
            lab.set_out(sel_arg);
            to_be_checked.add(sel_arg);
        } else {
            if aaf.is_loop(sel_arg) {
                match sample_skipping(aaf.parents(sel_arg), grounded.out(), rng) {
                    Some(replacement) => sel_arg = replacement,
                    None => return Outcome::Unsatisfiable,
                }
            }
            lab.set_in(sel_arg);
            to_be_checked.add(sel_arg);

            if cfg.enforceout() {
                let mut direct_neighbours = Vec::with_capacity(
                    aaf.children(sel_arg).len() + aaf.parents(sel_arg).len(),
                );
                direct_neighbours.extend_from_slice(aaf.children(sel_arg));
                direct_neighbours.extend_from_slice(aaf.parents(sel_arg));
                for &neighbour in &direct_neighbours {
                    lab.set_out(neighbour);
                    for &indirect in aaf.children(neighbour) {
                        to_be_checked.add(indirect);
                    }
                    for &indirect in aaf.parents(neighbour) {
                        to_be_checked.add(indirect);
                    }
                }
            }
        }

        for &c in aaf.children(sel_arg) {
            to_be_checked.add(c);
        }
        for &p in aaf.parents(sel_arg) {
            to_be_checked.add(p);
        }

        for k in 0..to_be_checked.count() {
            let e = to_be_checked.at(k);
            if grounded.is_fixed(e) {
                continue;
            }
            let correct = lab.is_correct(aaf, e);
            if correct {
                mislabeled.remove(e);
            } else {
                mislabeled.add(e);
            }
            if let Some(h) = heap.as_mut() {
                if cfg.greedyprob() > 0.0 {
                    if !correct || cfg.greedyincall() {
                        h.update(e, flip_gain(aaf, &lab, e));
                    } else if h.contains(e) {
                        h.remove(e);
                    }
                }
            }
        }

        if mislabeled.is_empty() {
            tracing::info!(iterations, "stable labeling found");
            return Outcome::Stable(lab);
        }
    }
}

/// `flip_gain(a)` = (# correctly-labeled in N[a]) - (# that would be
/// correctly-labeled with `a` toggled), where `N[a] = {a} ∪ children(a) ∪
/// parents(a)`. Lower is better; the heap is keyed on this so `extract_min`
/// returns the most-improving flip. Grounded on `get_flipping_count` in the
/// original solver, including its trait of visiting a bidirectionally
/// attacking neighbour twice (once as a child, once as a parent).
fn flip_gain(aaf: &Aaf, lab: &Labeling, a: ArgId) -> i64 {
    let new_label = !lab.is_in(a);
    let mut gain = 0i64;

    gain += score(lab, aaf, a, a, new_label);
    for &child in aaf.children(a) {
        gain += score(lab, aaf, child, a, new_label);
    }
    for &parent in aaf.parents(a) {
        gain += score(lab, aaf, parent, a, new_label);
    }
    gain
}

fn score(lab: &Labeling, aaf: &Aaf, e: ArgId, pivot: ArgId, pivot_new_label: bool) -> i64 {
    let before = lab.is_correct(aaf, e) as i64;
    let after = lab.is_correct_with_override(aaf, e, pivot, pivot_new_label) as i64;
    before - after
}
