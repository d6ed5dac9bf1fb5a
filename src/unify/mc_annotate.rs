use super::{Error, ToolKind, fold_lines};
use crate::model::classification::{LeontisWesthof, Saenger, StackingTopology};
use crate::model::interaction::{
    BaseInteractions, BasePair, BasePhosphate, BaseRibose, Interaction, OtherInteraction,
    Stacking,
};
use crate::model::residue::Residue;
use crate::model::structure::{ResidueKey, Structure};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

const TOOL: ToolKind = ToolKind::McAnnotate;

static RESIDUE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'?(.)'?(-?[0-9]+)\.?([a-zA-Z]?)-'?(.)'?(-?[0-9]+)\.?([a-zA-Z]?)")
        .expect("valid residue pair regex")
});

const RIBOSE_ATOM: &str = "O2'";
const PHOSPHATE_ATOM: &str = "O2P";
const ONE_HBOND: &str = "one_hbond";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Residues,
    AdjacentStackings,
    NonAdjacentStackings,
    BasePairs,
    Summary,
}

impl Section {
    const HEADERS: [(&'static str, Section); 5] = [
        ("Residue conformations", Section::Residues),
        ("Adjacent stackings", Section::AdjacentStackings),
        ("Non-Adjacent stackings", Section::NonAdjacentStackings),
        ("Base-pairs", Section::BasePairs),
        ("Number of", Section::Summary),
    ];

    fn from_header(line: &str) -> Option<Self> {
        Self::HEADERS
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix))
            .map(|(_, section)| *section)
    }
}

fn edge(token: &str) -> Option<char> {
    match token {
        "Hh" | "Hw" | "Bh" | "C8" => Some('H'),
        "Wh" | "Ww" | "Ws" => Some('W'),
        "Ss" | "Sw" | "Bs" => Some('S'),
        _ => None,
    }
}

struct Context<'a> {
    names: HashMap<ResidueKey, &'a str>,
}

impl Context<'_> {
    fn residue(
        &self,
        chain: &str,
        number: &str,
        icode: &str,
        line: usize,
    ) -> Result<Residue, Error> {
        let number = number.parse::<i32>().map_err(|_| {
            Error::format(TOOL, line, format!("invalid residue number '{number}'"))
        })?;
        let icode = icode.chars().next();
        let key = ResidueKey::new(chain, number, icode);
        let name = self.names.get(&key).ok_or_else(|| {
            Error::unknown_residue(TOOL, line, format!("{chain}{number}{}", icode_suffix(icode)))
        })?;
        Ok(Residue::from_auth(chain, number, icode, *name))
    }

    fn residues(&self, token: &str, line: usize) -> Result<(Residue, Residue), Error> {
        let captures = RESIDUE_PAIR.captures(token).ok_or_else(|| {
            Error::format(TOOL, line, format!("unrecognized residue pair '{token}'"))
        })?;
        let nt1 = self.residue(&captures[1], &captures[2], &captures[3], line)?;
        let nt2 = self.residue(&captures[4], &captures[5], &captures[6], line)?;
        Ok((nt1, nt2))
    }

    fn stacking(&self, line: &str, line_no: usize, position: usize) -> Result<Interaction, Error> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (nt1, nt2) = self.residues(fields[0], line_no)?;
        let topology = fields
            .get(position)
            .and_then(|token| token.parse::<StackingTopology>().ok());
        if topology.is_none() {
            tracing::debug!(line = line_no, "MC-Annotate stacking without known topology");
        }
        Ok(Stacking::new(nt1, nt2, topology).into())
    }

    fn base_pair_line(&self, line: &str, line_no: usize) -> Result<Vec<Interaction>, Error> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (nt1, nt2) = self.residues(fields[0], line_no)?;
        let tokens = fields.get(3..).unwrap_or_default();

        let touches_backbone = |token: &&str| {
            token.contains(RIBOSE_ATOM) || token.contains(PHOSPHATE_ATOM)
        };
        if tokens.contains(&ONE_HBOND) && !tokens.iter().any(touches_backbone) {
            return Ok(vec![OtherInteraction::new(nt1, nt2).into()]);
        }

        let mut interactions = Vec::new();
        let (mut base_added, mut ribose_added, mut phosphate_added) = (false, false, false);

        for token in tokens {
            let first_part = token.split('/').next().unwrap_or_default();
            if token.contains(RIBOSE_ATOM) {
                if !ribose_added {
                    let interaction = if first_part == RIBOSE_ATOM {
                        BaseRibose::new(nt2.clone(), nt1.clone(), None)
                    } else {
                        BaseRibose::new(nt1.clone(), nt2.clone(), None)
                    };
                    interactions.push(interaction.into());
                    ribose_added = true;
                }
            } else if token.contains(PHOSPHATE_ATOM) {
                if !phosphate_added {
                    let interaction = if first_part == PHOSPHATE_ATOM {
                        BasePhosphate::new(nt2.clone(), nt1.clone(), None)
                    } else {
                        BasePhosphate::new(nt1.clone(), nt2.clone(), None)
                    };
                    interactions.push(interaction.into());
                    phosphate_added = true;
                }
            } else if let Some((left, right)) = token.split_once('/') {
                let (Some(edge1), Some(edge2)) = (edge(left), edge(right)) else {
                    continue;
                };
                if base_added {
                    continue;
                }
                interactions.push(base_pair(&nt1, &nt2, edge1, edge2, tokens, line_no));
                base_added = true;
            }
        }
        Ok(interactions)
    }
}

fn icode_suffix(icode: Option<char>) -> String {
    icode.map(|c| format!(".{c}")).unwrap_or_default()
}

/// First token made only of Roman numeral characters (before any comma) names the
/// Saenger class; `XII,XIII` style tokens keep the first value.
fn saenger(tokens: &[&str]) -> Option<Saenger> {
    let numeral = tokens.iter().find_map(|token| {
        let head = token.split(',').next().unwrap_or_default();
        let roman = !head.is_empty() && head.chars().all(|c| matches!(c, 'I' | 'V' | 'X'));
        roman.then_some(head)
    })?;
    let parsed = numeral.parse::<Saenger>().ok();
    if parsed.is_none() {
        tracing::debug!(numeral, "MC-Annotate numeral is not a Saenger class");
    }
    parsed
}

fn base_pair(
    nt1: &Residue,
    nt2: &Residue,
    edge1: char,
    edge2: char,
    tokens: &[&str],
    line_no: usize,
) -> Interaction {
    let stericity = if tokens.contains(&"cis") {
        Some('c')
    } else if tokens.contains(&"trans") {
        Some('t')
    } else {
        None
    };
    match stericity.and_then(|s| LeontisWesthof::from_parts(s, edge1, edge2)) {
        Some(lw) => BasePair::new(nt1.clone(), nt2.clone(), lw, saenger(tokens)).into(),
        None => {
            tracing::debug!(line = line_no, "MC-Annotate pairing without cis/trans");
            OtherInteraction::new(nt1.clone(), nt2.clone()).into()
        }
    }
}

/// Unifies an MC-Annotate report. Residue names are looked up in `structure`, the packed
/// structure that was analyzed.
pub fn unify(text: &str, structure: &Structure) -> Result<BaseInteractions, Error> {
    let context = Context {
        names: structure.residue_names(),
    };
    let mut section: Option<Section> = None;

    fold_lines(text, |line_no, line| {
        if let Some(header) = Section::from_header(line) {
            section = Some(header);
            return Ok(Vec::new());
        }
        match section {
            Some(Section::AdjacentStackings) => Ok(vec![context.stacking(line, line_no, 3)?]),
            Some(Section::NonAdjacentStackings) => Ok(vec![context.stacking(line, line_no, 2)?]),
            Some(Section::BasePairs) => context.base_pair_line(line, line_no),
            Some(Section::Residues) | Some(Section::Summary) | None => Ok(Vec::new()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::structure::AtomRecord;

    fn atom(chain: &str, number: i32, icode: Option<char>, name: &str) -> AtomRecord {
        AtomRecord::new("P", name, chain, number, [0.0; 3]).with_icode(icode)
    }

    fn structure() -> Structure {
        Structure::new(vec![
            atom("X", -1, Some('A'), "res"),
            atom("Y", 65, Some('L'), "123"),
            atom("A", 4, None, "U"),
            atom("A", 14, None, "T"),
            atom("A", 1, Some('Y'), "C"),
            atom("A", 71, None, "aaa"),
            atom(".", -100, None, "C"),
            atom("-", -1, None, "K"),
            atom(".", -100, Some('A'), "C"),
            atom("-", -1, Some('a'), "U"),
            atom("-", -12, Some('C'), "D"),
            atom("-", 0, None, "d"),
            atom(".", 111, Some('Z'), "aby"),
            atom(".", 2, Some('X'), "I"),
        ])
    }

    fn context(structure: &Structure) -> Context<'_> {
        Context {
            names: structure.residue_names(),
        }
    }

    #[test]
    fn parses_residue_pairs_with_odd_chains() {
        let structure = structure();
        let context = context(&structure);
        let cases = [
            ("X-1.A-Y65.L", ("X", -1, Some('A'), "res"), ("Y", 65, Some('L'), "123")),
            ("A4-A14", ("A", 4, None, "U"), ("A", 14, None, "T")),
            (".-100---1", (".", -100, None, "C"), ("-", -1, None, "K")),
            (".-100.A---1.a", (".", -100, Some('A'), "C"), ("-", -1, Some('a'), "U")),
            ("--12.C--0", ("-", -12, Some('C'), "D"), ("-", 0, None, "d")),
            (".111.Z-.2.X", (".", 111, Some('Z'), "aby"), (".", 2, Some('X'), "I")),
        ];
        for (token, left, right) in cases {
            let (nt1, nt2) = context.residues(token, 1).expect(token);
            assert_eq!(nt1, Residue::from_auth(left.0, left.1, left.2, left.3), "{token}");
            assert_eq!(nt2, Residue::from_auth(right.0, right.1, right.2, right.3), "{token}");
        }
    }

    #[test]
    fn unknown_residue_is_reported() {
        let structure = structure();
        let err = context(&structure).residues("Q1-Q2", 4).unwrap_err();
        assert!(matches!(err, Error::UnknownResidue { line: 4, .. }));
    }

    #[test]
    fn unifies_full_report() {
        let text = "\
Residue conformations -------------------------------------------
X-1.A : G C3p_endo anti
Adjacent stackings ----------------------------------------------
X-1.A-Y65.L : adjacent_5p upward
A4-A14 : adjacent_5p sideways
Non-Adjacent stackings ------------------------------------------
.-100.A---1.a : outward
A1.Y-A71 : inward pairing
Number of non adjacent stackings = 2
Base-pairs ------------------------------------------------------
A1.Y-.-100.A : C-C Ww/Ww pairing antiparallel cis XIX
X-1.A-Y65.L : A-U Ss/Ss O2'/Ww pairing parallel trans 57
A4-A14 : U-T Hw/Sw pairing antiparallel trans one_hbond 112
A4-A71 : U-A Ww/Ww one_hbond
A4-A71 : U-A O2P/Bh Ww/Ww pairing
--12.C--0 : D-d Ww/Hh pairing cis XII,XIII
Number of base pairs = 6
";
        let interactions = unify(text, &structure()).expect("unify");

        let topologies: Vec<_> = interactions.stackings.iter().map(|s| s.topology).collect();
        assert_eq!(
            topologies,
            vec![
                Some(StackingTopology::Upward),
                None,
                Some(StackingTopology::Outward),
                Some(StackingTopology::Inward),
            ]
        );

        let pairs: Vec<_> = interactions.base_pairs.iter().map(|p| (p.lw, p.saenger)).collect();
        assert_eq!(
            pairs,
            vec![
                (LeontisWesthof::CWW, Some(Saenger::XIX)),
                (LeontisWesthof::TSS, None),
                (LeontisWesthof::CWH, Some(Saenger::XII)),
            ]
        );

        assert_eq!(interactions.base_ribose_interactions.len(), 1);
        let ribose = &interactions.base_ribose_interactions[0];
        assert_eq!(ribose.nt1.chain(), "Y");
        assert_eq!(ribose.nt2.chain(), "X");

        assert_eq!(interactions.base_phosphate_interactions.len(), 1);
        let phosphate = &interactions.base_phosphate_interactions[0];
        assert_eq!(phosphate.nt1.number(), 71);
        assert_eq!(phosphate.nt2.number(), 4);

        assert_eq!(interactions.other_interactions.len(), 3);
    }

    #[test]
    fn ribose_token_orientation_follows_atom_side() {
        let structure = structure();
        let context = context(&structure);
        let swapped = context
            .base_pair_line("X-1.A-Y65.L : A-U O2'/Hh", 1)
            .expect("line");
        let Interaction::BaseRibose(ribose) = &swapped[0] else {
            panic!("expected base-ribose, got {swapped:?}");
        };
        assert_eq!(ribose.nt1.chain(), "Y");
        assert_eq!(ribose.nt2.chain(), "X");
    }
}
