//! The argumentation graph: argument-id mapping, children/parents adjacency,
//! self-loop and initial-argument bitsets. Read-only once built; grounded
//! directly on `struct AAF` and `taas__readFile` in the original solver.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use crate::bitset::BitSet;
use crate::error::{Error, Result};
use crate::ArgId;

#[derive(Debug)]
pub struct Aaf {
    names: Vec<String>,
    ids: HashMap<String, ArgId>,
    children: Vec<Vec<ArgId>>,
    parents: Vec<Vec<ArgId>>,
    /// Self-attacking arguments.
    loops: BitSet,
    /// Arguments with no attackers.
    initial: BitSet,
}

impl Aaf {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, a: ArgId) -> &str {
        &self.names[a.index()]
    }

    pub fn id_of(&self, name: &str) -> Option<ArgId> {
        self.ids.get(name).copied()
    }

    pub fn children(&self, a: ArgId) -> &[ArgId] {
        &self.children[a.index()]
    }

    pub fn parents(&self, a: ArgId) -> &[ArgId] {
        &self.parents[a.index()]
    }

    pub fn is_loop(&self, a: ArgId) -> bool {
        self.loops.get(a.index())
    }

    pub fn is_initial(&self, a: ArgId) -> bool {
        self.initial.get(a.index())
    }

    pub fn args(&self) -> impl Iterator<Item = ArgId> {
        (0..self.names.len()).map(ArgId::new)
    }

    /// Parses the trivial-graph-like format used by the original solver:
    /// argument names (one per line) up to a lone `#`, then `name1 name2`
    /// attack lines.
    /// Blank lines are skipped wherever they occur; duplicate attacks are
    /// collapsed (multiplicity is not semantically meaningful).
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut names = Vec::new();
        let mut ids = HashMap::new();
        let mut in_argument_section = true;
        let mut attack_lines: Vec<(usize, String)> = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed == "#" {
                in_argument_section = false;
                continue;
            }
            if in_argument_section {
                let name = trimmed.to_string();
                let id = ArgId::new(names.len());
                ids.insert(name.clone(), id);
                names.push(name);
            } else {
                attack_lines.push((line_no + 1, trimmed.to_string()));
            }
        }

        let n = names.len();
        let mut children: Vec<Vec<ArgId>> = vec![Vec::new(); n];
        let mut parents: Vec<Vec<ArgId>> = vec![Vec::new(); n];
        let mut loops = BitSet::new(n);
        let mut initial = BitSet::new(n);
        initial.set_all();
        let mut seen_attacks: HashSet<(ArgId, ArgId)> = HashSet::new();

        for (line_no, text) in attack_lines {
            let space = text.find(' ').ok_or_else(|| Error::MalformedAttackLine {
                line: line_no,
                text: text.clone(),
            })?;
            let (a_name, rest) = text.split_at(space);
            let b_name = rest[1..].trim();
            let a = ids.get(a_name).copied().ok_or_else(|| Error::UnknownArgument {
                line: line_no,
                name: a_name.to_string(),
            })?;
            let b = ids.get(b_name).copied().ok_or_else(|| Error::UnknownArgument {
                line: line_no,
                name: b_name.to_string(),
            })?;

            initial.unset(b.index());
            if a == b {
                loops.set(a.index());
            }
            if seen_attacks.insert((a, b)) {
                children[a.index()].push(b);
                parents[b.index()].push(a);
            }
        }

        Ok(Aaf {
            names,
            ids,
            children,
            parents,
            loops,
            initial,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Aaf {
        Aaf::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn empty_aaf() {
        let aaf = parse("#\n");
        assert_eq!(aaf.len(), 0);
        assert!(aaf.is_empty());
    }

    #[test]
    fn arguments_and_attacks() {
        let aaf = parse("a\nb\nc\n#\na b\nb c\n");
        assert_eq!(aaf.len(), 3);
        let a = aaf.id_of("a").unwrap();
        let b = aaf.id_of("b").unwrap();
        let c = aaf.id_of("c").unwrap();
        assert_eq!(aaf.children(a), &[b]);
        assert_eq!(aaf.parents(b), &[a]);
        assert_eq!(aaf.children(b), &[c]);
        assert!(aaf.is_initial(a));
        assert!(!aaf.is_initial(b));
        assert!(!aaf.is_initial(c));
    }

    #[test]
    fn self_loop_is_recorded_and_kept_as_edge() {
        let aaf = parse("a\n#\na a\n");
        let a = aaf.id_of("a").unwrap();
        assert!(aaf.is_loop(a));
        assert_eq!(aaf.children(a), &[a]);
        assert_eq!(aaf.parents(a), &[a]);
        assert!(!aaf.is_initial(a));
    }

    #[test]
    fn duplicate_attacks_do_not_duplicate_edges() {
        let aaf = parse("a\nb\n#\na b\na b\n");
        let a = aaf.id_of("a").unwrap();
        let b = aaf.id_of("b").unwrap();
        assert_eq!(aaf.children(a).len(), 1);
        assert_eq!(aaf.parents(b).len(), 1);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let aaf = parse("a\n\nb\n\n#\n\na b\n\n");
        assert_eq!(aaf.len(), 2);
    }

    #[test]
    fn unknown_argument_in_attack_is_an_error() {
        let err = Aaf::from_reader(Cursor::new("a\n#\na z\n")).unwrap_err();
        assert!(matches!(err, Error::UnknownArgument { .. }));
    }

    #[test]
    fn malformed_attack_line_is_an_error() {
        let err = Aaf::from_reader(Cursor::new("a\n#\nnospace\n")).unwrap_err();
        assert!(matches!(err, Error::MalformedAttackLine { .. }));
    }
}
