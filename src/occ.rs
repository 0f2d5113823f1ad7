//! Odd-cycle collection: for each argument lying on (at least) one odd
//! directed cycle, the set of arguments outside the cycle that attack some
//! cycle member. Built once at startup; grounded on `occ__init`/
//! `occ__contains`/`occ__get_attackers` as used in `solve()`.
//!
//! Completeness across *all* odd cycles is not required — at most one per
//! argument, matching the source's DFS-one-cycle-per-start-node approach.

use std::collections::HashMap;

use crate::aaf::Aaf;
use crate::raset::RaSet;
use crate::ArgId;

/// Returned by [`Occ::build`] when some odd cycle has no external attacker:
/// no stable extension can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsatisfiable;

pub struct Occ {
    attackers: HashMap<ArgId, RaSet>,
}

impl Occ {
    pub fn contains(&self, a: ArgId) -> bool {
        self.attackers.contains_key(&a)
    }

    pub fn attackers(&self, a: ArgId) -> &RaSet {
        &self.attackers[&a]
    }

    pub fn build(aaf: &Aaf) -> Result<Self, Unsatisfiable> {
        let n = aaf.len();
        let mut attackers: HashMap<ArgId, RaSet> = HashMap::new();

        for start in aaf.args() {
            if attackers.contains_key(&start) {
                continue;
            }
            if let Some(cycle) = find_odd_cycle(aaf, start) {
                let cycle_set: std::collections::HashSet<ArgId> = cycle.iter().copied().collect();
                let mut members_attackers = RaSet::new_empty(n);
                for &member in &cycle {
                    for &p in aaf.parents(member) {
                        if !cycle_set.contains(&p) {
                            members_attackers.add(p);
                        }
                    }
                }
                if members_attackers.is_empty() {
                    return Err(Unsatisfiable);
                }
                for &member in &cycle {
                    attackers.entry(member).or_insert_with(|| members_attackers.clone());
                }
            }
        }

        Ok(Occ { attackers })
    }
}

/// DFS from `start` along attack edges, tracking parity of path length,
/// looking for a path back to `start` of odd length. Returns the cycle's
/// member arguments (in path order) if one is found.
fn find_odd_cycle(aaf: &Aaf, start: ArgId) -> Option<Vec<ArgId>> {
    // visited[arg] = Some(parity of the path length from `start` to `arg`)
    let mut visited: HashMap<ArgId, bool> = HashMap::new();
    let mut path: Vec<ArgId> = Vec::new();
    let mut stack: Vec<(ArgId, usize)> = Vec::new();

    visited.insert(start, false);
    path.push(start);
    stack.push((start, 0));

    while let Some(&(node, child_idx)) = stack.last() {
        let children = aaf.children(node);
        if child_idx >= children.len() {
            stack.pop();
            path.pop();
            continue;
        }
        stack.last_mut().unwrap().1 += 1;
        let next = children[child_idx];
        let next_parity = !visited[&node];

        if next == start {
            if next_parity {
                return Some(path.clone());
            }
            continue;
        }

        match visited.get(&next) {
            Some(&seen_parity) => {
                if seen_parity != next_parity && path.contains(&next) {
                    // odd cycle through `next`, but not necessarily through
                    // `start` itself; we only report cycles starting at
                    // `start` to keep "at most one cycle per argument"
                    // well-defined, so skip — `next`'s own DFS (or a later
                    // start node's) will find it.
                }
                continue;
            }
            None => {
                visited.insert(next, next_parity);
                path.push(next);
                stack.push((next, 0));
            }
        }
    }

    None
}
