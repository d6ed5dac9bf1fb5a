use super::{Error, ToolKind};
use crate::model::classification::{LeontisWesthof, Saenger};
use crate::model::interaction::{
    BaseInteractions, BasePair, BasePhosphate, BaseRibose, Interaction, OtherInteraction,
    Stacking,
};
use crate::model::residue::Residue;
use crate::model::structure::{ResidueAtoms, Structure};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

const TOOL: ToolKind = ToolKind::Rnaview;

const BEGIN_BASE_PAIR: &str = "BEGIN_base-pair";
const END_BASE_PAIR: &str = "END_base-pair";

const STACKED: &str = "stacked";
const BASE_RIBOSE: &str = "!(b_s)";
const BASE_PHOSPHATE: &str = "!b_(O1P,O2P)";
const SUGAR_SUGAR: &str = "!(s_s)";
const ONE_HBOND: &str = "!1H(b_b)";
const SAENGER_UNKNOWN: &str = "n/a";

/// Base-pair lines look like
///
/// ```text
///      1_72, A:     1 G-C    72 A: +/+ cis         XIX
///     30_31, A:    30 G-A    31 A:      stacked
///     10_45, A:    10 g-G    45 A: H/S cis         !1H(b_b)
/// ```
///
/// Groups: internal indices (1, 2), first chain and number (3, 4), names (5, 6), second
/// number and chain (7, 8), `stacked` or the pairing (10), edges (11), stericity (12) and
/// the Saenger class or a `!` annotation (14).
static BASE_PAIR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\s*(\d+)_(\d+),\s+(\S):\s+(-?\d+)\s+(\w+)-(\w+)\s+",
        r"(-?\d+)\s+(\S):\s+(syn|\s+)*((./.)\s+(cis|tran)",
        r"(syn|\s+)*([IVX,]+|n/a|![^.]+)|stacked)\.?",
    ))
    .expect("valid RNAView base-pair regex")
});

/// Mirrors RNAView's own test for a usable base: it only indexes residues whose ring
/// atoms sit at plausible distances.
fn is_indexed_by_rnaview(residue: &ResidueAtoms<'_>) -> bool {
    let (Some(c2), Some(c6), Some(n1)) = (
        residue.atom("C2"),
        residue.atom("C6"),
        residue.atom("N1"),
    ) else {
        return false;
    };
    if c2.distance(c6) > 3.0 || n1.distance(c6) > 2.0 || n1.distance(c2) > 2.0 {
        return false;
    }
    match residue.atom("N9") {
        Some(n9) => (3.5..=4.5).contains(&n1.distance(n9)),
        None => true,
    }
}

/// RNAView's 1-based internal index over the residues it accepted.
fn internal_index(structure: &Structure) -> HashMap<usize, Residue> {
    structure
        .residues()
        .into_iter()
        .filter(is_indexed_by_rnaview)
        .enumerate()
        .map(|(idx, residue)| {
            let key = residue.key;
            (
                idx + 1,
                Residue::from_auth(key.chain, key.number, key.icode, residue.name),
            )
        })
        .collect()
}

fn leontis_westhof(edges: &str, stericity: &str) -> Option<LeontisWesthof> {
    let stericity = stericity.chars().next()?;
    if edges.contains(['.', '?']) {
        return None;
    }
    if matches!(edges, "+/+" | "-/-" | "X/X") {
        return LeontisWesthof::from_parts(stericity, 'W', 'W');
    }
    let chars: Vec<char> = edges.chars().collect();
    match chars.as_slice() {
        [edge1, '/', edge2] => LeontisWesthof::from_parts(stericity, *edge1, *edge2),
        _ => None,
    }
}

/// Saenger tokens are a numeral or a comma-separated pair of numerals, of which the
/// first is kept.
fn saenger(token: &str) -> Option<Saenger> {
    token.split(',').next()?.parse().ok()
}

fn is_saenger_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| matches!(c, 'I' | 'V' | 'X' | ','))
}

struct Context {
    residues: HashMap<usize, Residue>,
}

impl Context {
    /// Looks up an internal index and checks it against the chain and number RNAView
    /// printed next to it.
    fn residue(
        &self,
        index: &str,
        chain: &str,
        number: &str,
        line: usize,
    ) -> Result<Residue, Error> {
        let index = index
            .parse::<usize>()
            .map_err(|_| Error::format(TOOL, line, format!("invalid internal index '{index}'")))?;
        let number = number
            .parse::<i32>()
            .map_err(|_| Error::format(TOOL, line, format!("invalid residue number '{number}'")))?;
        let residue = self.residues.get(&index).ok_or_else(|| {
            Error::unknown_residue(TOOL, line, format!("internal index {index} is not mapped"))
        })?;
        if !residue.chain().eq_ignore_ascii_case(chain) || residue.number() != number {
            return Err(Error::IndexMismatch {
                tool: TOOL,
                line,
                index,
                expected: residue.to_string(),
                found: format!("{chain}{number}"),
            });
        }
        Ok(residue.clone())
    }

    fn interaction(&self, captures: &Captures<'_>, line: usize) -> Result<Interaction, Error> {
        let nt1 = self.residue(&captures[1], &captures[3], &captures[4], line)?;
        let nt2 = self.residue(&captures[2], &captures[8], &captures[7], line)?;

        if &captures[10] == STACKED {
            return Ok(Stacking::new(nt1, nt2, None).into());
        }

        let token = captures.get(14).map_or("", |m| m.as_str());
        let lw = || {
            let edges = captures.get(11).map_or("", |m| m.as_str());
            let stericity = captures.get(12).map_or("", |m| m.as_str());
            leontis_westhof(edges, stericity)
        };

        let interaction = match token {
            BASE_RIBOSE => BaseRibose::new(nt1, nt2, None).into(),
            BASE_PHOSPHATE => BasePhosphate::new(nt1, nt2, None).into(),
            SUGAR_SUGAR | ONE_HBOND => OtherInteraction::new(nt1, nt2).into(),
            SAENGER_UNKNOWN => match lw() {
                Some(lw) => BasePair::new(nt1, nt2, lw, None).into(),
                None => OtherInteraction::new(nt1, nt2).into(),
            },
            token if is_saenger_token(token) => match lw() {
                Some(lw) => BasePair::new(nt1, nt2, lw, saenger(token)).into(),
                None => OtherInteraction::new(nt1, nt2).into(),
            },
            token => {
                tracing::debug!(line, token, "unrecognized RNAView annotation");
                OtherInteraction::new(nt1, nt2).into()
            }
        };
        Ok(interaction)
    }
}

/// Unifies an RNAView `.out` report. Only the base-pair section is read; residues are
/// resolved through RNAView's internal indexing of `structure`, which must be the packed
/// structure that was analyzed.
pub fn unify(text: &str, structure: &Structure) -> Result<BaseInteractions, Error> {
    let context = Context {
        residues: internal_index(structure),
    };
    tracing::debug!(indexed = context.residues.len(), "RNAView internal index built");

    let mut interactions = BaseInteractions::new();
    let mut in_section = false;
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.starts_with(BEGIN_BASE_PAIR) {
            in_section = true;
        } else if line.starts_with(END_BASE_PAIR) {
            in_section = false;
        } else if in_section {
            if line.trim().is_empty() {
                continue;
            }
            let captures = BASE_PAIR_LINE.captures(line).ok_or_else(|| {
                Error::format(TOOL, line_no, "unrecognized base-pair line")
            })?;
            interactions.push(context.interaction(&captures, line_no)?);
        }
    }
    Ok(interactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::structure::AtomRecord;

    /// A pyrimidine-like ring that passes the geometry check.
    fn pyrimidine(chain: &str, number: i32, name: &str) -> Vec<AtomRecord> {
        vec![
            AtomRecord::new("N1", name, chain, number, [0.0, 0.0, 0.0]),
            AtomRecord::new("C2", name, chain, number, [1.4, 0.0, 0.0]),
            AtomRecord::new("C6", name, chain, number, [-0.7, 1.2, 0.0]),
        ]
    }

    /// A purine-like ring with N9 placed 4 Å away from N1.
    fn purine(chain: &str, number: i32, name: &str) -> Vec<AtomRecord> {
        let mut atoms = pyrimidine(chain, number, name);
        atoms.push(AtomRecord::new("N9", name, chain, number, [0.0, 4.0, 0.0]));
        atoms
    }

    fn structure() -> Structure {
        let mut atoms = Vec::new();
        atoms.extend(purine("A", 1, "G"));
        // Missing ring atoms: RNAView skips it and does not advance its index.
        atoms.push(AtomRecord::new("P", "HOH", "A", 2, [9.0, 9.0, 9.0]));
        atoms.extend(pyrimidine("A", 3, "C"));
        atoms.extend(purine("a", 4, "A"));
        atoms.extend(pyrimidine("a", 5, "U"));
        Structure::new(atoms)
    }

    fn report(lines: &str) -> String {
        format!(
            "PDB data file name: x.pdb\n uncommon residue X 1 on chain A\n\
             BEGIN_base-pair\n{lines}END_base-pair\n\
             Summary of triplets and higher multiplets\n"
        )
    }

    #[test]
    fn builds_internal_index_from_geometry() {
        let index = internal_index(&structure());
        assert_eq!(index.len(), 4);
        assert_eq!(index[&1], Residue::from_auth("A", 1, None, "G"));
        assert_eq!(index[&2], Residue::from_auth("A", 3, None, "C"));
        assert_eq!(index[&4], Residue::from_auth("a", 5, None, "U"));
    }

    #[test]
    fn rejects_purine_with_implausible_n9() {
        let mut atoms = pyrimidine("A", 1, "G");
        atoms.push(AtomRecord::new("N9", "G", "A", 1, [0.0, 1.0, 0.0]));
        assert!(internal_index(&Structure::new(atoms)).is_empty());
    }

    #[test]
    fn reads_the_base_pair_section() {
        let text = report(
            "     1_2, A:     1 G-C     3 A: +/+ cis         XIX\n\
             \x20    3_4, a:     4 A-U     5 a: W/W cis         XXI\n\
             \x20    1_3, A:     1 G-A     4 a: H/S tran   syn    n/a\n\
             \x20    2_3, A:     3 C-A     4 a:      stacked\n\
             \x20    1_4, A:     1 G-U     5 a: S/H cis    syn    !(b_s)\n\
             \x20    2_4, A:     3 C-U     5 a: W/S cis         !b_(O1P,O2P)\n\
             \x20    1_2, A:     1 G-C     3 A: S/. tran        !(s_s)\n\
             \x20    3_4, a:     4 A-U     5 a: W/W cis         !1H(b_b).\n\
             \x20    2_3, A:     3 C-A     4 a: W/W tran        XII,XIII\n",
        );
        let interactions = unify(&text, &structure()).expect("unify");

        assert_eq!(interactions.base_pairs.len(), 4);
        let first = &interactions.base_pairs[0];
        assert_eq!(first.nt1, Residue::from_auth("A", 1, None, "G"));
        assert_eq!(first.nt2, Residue::from_auth("A", 3, None, "C"));
        assert_eq!(first.lw, LeontisWesthof::CWW);
        assert_eq!(first.saenger, Some(Saenger::XIX));

        assert_eq!(interactions.base_pairs[1].saenger, Some(Saenger::XXI));
        assert_eq!(interactions.base_pairs[2].lw, LeontisWesthof::THS);
        assert_eq!(interactions.base_pairs[2].saenger, None);
        assert_eq!(interactions.base_pairs[3].lw, LeontisWesthof::TWW);
        assert_eq!(interactions.base_pairs[3].saenger, Some(Saenger::XII));

        assert_eq!(interactions.stackings.len(), 1);
        assert_eq!(interactions.stackings[0].topology, None);
        assert_eq!(interactions.base_ribose_interactions.len(), 1);
        assert_eq!(interactions.base_phosphate_interactions.len(), 1);
        assert_eq!(interactions.other_interactions.len(), 2);
    }

    #[test]
    fn punctuation_chain_symbols_are_matched() {
        let mut atoms = purine("$", 1, "G");
        atoms.extend(pyrimidine("~", 2, "C"));
        let structure = Structure::new(atoms);
        let text = report("     1_2, $:     1 G-C     2 ~: +/+ cis         XIX\n");

        let interactions = unify(&text, &structure).expect("unify");
        assert_eq!(interactions.base_pairs.len(), 1);
        let pair = &interactions.base_pairs[0];
        assert_eq!(pair.nt1, Residue::from_auth("$", 1, None, "G"));
        assert_eq!(pair.nt2, Residue::from_auth("~", 2, None, "C"));
        assert_eq!(pair.lw, LeontisWesthof::CWW);
    }

    #[test]
    fn lines_outside_the_section_are_ignored() {
        let text = "     1_2, A:     1 G-C     3 A: +/+ cis         XIX\n";
        let interactions = unify(text, &structure()).expect("unify");
        assert!(interactions.is_empty());
    }

    #[test]
    fn detects_index_mismatch() {
        let text = report("     1_2, A:     1 G-C     7 A: +/+ cis         XIX\n");
        let err = unify(&text, &structure()).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexMismatch {
                tool: ToolKind::Rnaview,
                index: 2,
                ..
            }
        ));
    }

    #[test]
    fn unmapped_index_is_an_unknown_residue() {
        let text = report("     1_9, A:     1 G-C     3 A: +/+ cis         XIX\n");
        let err = unify(&text, &structure()).unwrap_err();
        assert!(matches!(err, Error::UnknownResidue { line: 4, .. }));
    }

    #[test]
    fn unparsable_section_line_is_a_format_error() {
        let text = report("garbage\n");
        let err = unify(&text, &structure()).unwrap_err();
        assert!(matches!(err, Error::Format { line: 4, .. }));
    }

    #[test]
    fn converts_edge_notation() {
        assert_eq!(leontis_westhof("-/-", "tran"), Some(LeontisWesthof::TWW));
        assert_eq!(leontis_westhof("X/X", "cis"), Some(LeontisWesthof::CWW));
        assert_eq!(leontis_westhof("S/H", "cis"), Some(LeontisWesthof::CSH));
        assert_eq!(leontis_westhof("?/W", "tran"), None);
        assert_eq!(leontis_westhof("S/.", "tran"), None);
    }
}
