use super::{AtomGroup, Error, ToolKind, fold_lines};
use crate::model::classification::LeontisWesthof;
use crate::model::interaction::{
    BaseInteractions, BasePair, BasePhosphate, BaseRibose, Interaction, OtherInteraction,
    Stacking,
};
use crate::model::residue::Residue;
use serde::Deserialize;

const TOOL: ToolKind = ToolKind::Bpnet;
const OVERLAP_FIELDS: usize = 13;
const PROXIMITY_FIELDS: usize = 11;
const STACKING_CODES: [&str; 3] = ["ASTK", "OSTK", "ADJA"];

#[derive(Debug, Deserialize)]
struct BasePairReport {
    basepairs: Vec<BasePairEntry>,
}

#[derive(Debug, Deserialize)]
struct BasePairEntry {
    chain1: String,
    resnum1: i32,
    ins1: Option<String>,
    resname1: String,
    chain2: String,
    resnum2: i32,
    ins2: Option<String>,
    resname2: String,
    basepair: String,
}

/// Unifies BPNet's base-pair JSON and its `.rob` overlap report. A missing document
/// contributes no interactions.
pub fn unify(basepairs: Option<&str>, overlaps: Option<&str>) -> Result<BaseInteractions, Error> {
    let mut interactions = match basepairs {
        Some(json) => parse_base_pairs(json)?,
        None => BaseInteractions::new(),
    };
    if let Some(rob) = overlaps {
        interactions.append(parse_overlaps(rob)?);
    }
    Ok(interactions)
}

fn insertion_code(ins: Option<&str>) -> Option<char> {
    ins.and_then(|ins| ins.chars().next())
        .filter(|c| *c != '?' && !c.is_whitespace())
}

/// Converts a four-character `E:Es` code (edge, separator, edge, stericity). Line numbers
/// in errors count base-pair entries.
fn convert_lw(code: &str, entry: usize) -> Result<Option<LeontisWesthof>, Error> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != 4 {
        return Err(Error::format(
            TOOL,
            entry,
            format!("base-pair code '{code}' must have 4 characters"),
        ));
    }
    Ok(LeontisWesthof::from_parts(chars[3], chars[0], chars[2]))
}

fn parse_base_pairs(json: &str) -> Result<BaseInteractions, Error> {
    let report: BasePairReport =
        serde_json::from_str(json).map_err(|source| Error::Json { tool: TOOL, source })?;

    let mut interactions = BaseInteractions::new();
    for (idx, entry) in report.basepairs.into_iter().enumerate() {
        let nt1 = Residue::from_auth(
            entry.chain1,
            entry.resnum1,
            insertion_code(entry.ins1.as_deref()),
            entry.resname1,
        );
        let nt2 = Residue::from_auth(
            entry.chain2,
            entry.resnum2,
            insertion_code(entry.ins2.as_deref()),
            entry.resname2,
        );
        match convert_lw(&entry.basepair, idx + 1)? {
            Some(lw) => interactions.push(BasePair::new(nt1, nt2, lw, None)),
            None => {
                tracing::debug!(code = %entry.basepair, "unknown BPNet base-pair code");
                interactions.push(OtherInteraction::new(nt1, nt2));
            }
        }
    }
    Ok(interactions)
}

fn split_pair(field: &str, line: usize) -> Result<(&str, &str), Error> {
    field
        .split_once(':')
        .ok_or_else(|| Error::format(TOOL, line, format!("cannot split pair field '{field}'")))
}

/// Splits the chain pair on `^`, or on the last `-` when no `^` is present.
fn split_chains(field: &str, line: usize) -> Result<(&str, &str), Error> {
    field
        .split_once('^')
        .or_else(|| field.rsplit_once('-'))
        .ok_or_else(|| Error::format(TOOL, line, format!("cannot split chain pair '{field}'")))
}

fn residues_from_overlap(fields: &[&str], line: usize) -> Result<(Residue, Residue), Error> {
    let (chain1, chain2) = split_chains(fields[6], line)?;
    let (number1, number2) = split_pair(fields[3], line)?;
    let (name1, name2) = split_pair(fields[5], line)?;
    let number = |raw: &str| {
        raw.parse::<i32>()
            .map_err(|_| Error::format(TOOL, line, format!("invalid residue number '{raw}'")))
    };

    let icode1 = insertion_code(Some(fields[2]));
    let icode2 = insertion_code(Some(fields[4]));
    let nt1 = Residue::from_auth(chain1, number(number1)?, icode1, name1);
    let nt2 = Residue::from_auth(chain2, number(number2)?, icode2, name2);
    Ok((nt1, nt2))
}

fn parse_overlap_line(line_no: usize, line: &str) -> Result<Vec<Interaction>, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.first().copied() {
        Some("OVLP") => {
            if fields.len() != OVERLAP_FIELDS {
                return Err(Error::format(
                    TOOL,
                    line_no,
                    format!("OVLP record needs {OVERLAP_FIELDS} fields, found {}", fields.len()),
                ));
            }
            if !STACKING_CODES.contains(&fields[7]) {
                return Ok(Vec::new());
            }
            let (nt1, nt2) = residues_from_overlap(&fields, line_no)?;
            Ok(vec![Stacking::new(nt1, nt2, None).into()])
        }
        Some("PROX") => {
            if fields.len() != PROXIMITY_FIELDS {
                return Err(Error::format(
                    TOOL,
                    line_no,
                    format!("PROX record needs {PROXIMITY_FIELDS} fields, found {}", fields.len()),
                ));
            }
            let (nt1, nt2) = residues_from_overlap(&fields, line_no)?;
            let (atom1, atom2) = split_pair(fields[7], line_no)?;
            let groups = (AtomGroup::classify(atom1), AtomGroup::classify(atom2));

            let mut interactions: Vec<Interaction> = Vec::with_capacity(2);
            match groups {
                (AtomGroup::Base, AtomGroup::Ribose) => {
                    interactions.push(BaseRibose::new(nt1.clone(), nt2.clone(), None).into())
                }
                (AtomGroup::Ribose, AtomGroup::Base) => {
                    interactions.push(BaseRibose::new(nt2.clone(), nt1.clone(), None).into())
                }
                (AtomGroup::Base, AtomGroup::Phosphate) => {
                    interactions.push(BasePhosphate::new(nt1.clone(), nt2.clone(), None).into())
                }
                (AtomGroup::Phosphate, AtomGroup::Base) => {
                    interactions.push(BasePhosphate::new(nt2.clone(), nt1.clone(), None).into())
                }
                _ => {}
            }
            interactions.push(OtherInteraction::new(nt1, nt2).into());
            Ok(interactions)
        }
        _ => Ok(Vec::new()),
    }
}

fn parse_overlaps(rob: &str) -> Result<BaseInteractions, Error> {
    fold_lines(rob, parse_overlap_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASEPAIRS: &str = r#"{
        "basepairs": [
            {"chain1": "A", "resnum1": 3, "ins1": "?", "resname1": "G",
             "chain2": "A", "resnum2": 70, "ins2": " ", "resname2": "C", "basepair": "W:WC"},
            {"chain1": "A", "resnum1": 2, "ins1": "B", "resname1": "G",
             "chain2": "AB", "resnum2": 14, "ins2": null, "resname2": "G", "basepair": "+:HT"},
            {"chain1": "A", "resnum1": 5, "ins1": "?", "resname1": "G",
             "chain2": "A", "resnum2": 6, "ins2": "?", "resname2": "U", "basepair": "w:sC"},
            {"chain1": "A", "resnum1": 7, "ins1": "?", "resname1": "G",
             "chain2": "A", "resnum2": 8, "ins2": "?", "resname2": "U", "basepair": "X:WC"}
        ]
    }"#;

    const OVERLAPS: &str = "\
OVLP         2:3       ?      2:3      ?     G:G       A-A    ASTK  --  :    30.15    187.10   186.90
OVLP         2:14      ?      2:2      ?     G:G       A-AB   W:HC  BP  :    16.85    187.10   188.10
PROX         2:14      ?      2:2      ?     G:G       A-AB    N2:N7   PX  :    2.83
PROX         5:6       ?      5:6      A     G:U       A^B    O2':N3   PX  :    3.10
PROX         7:9       ?      7:9      ?     C:A       A-A    N4:OP1   PX  :    3.05
";

    #[test]
    fn converts_base_pair_codes() {
        let interactions = unify(Some(BASEPAIRS), None).expect("unify");
        assert_eq!(interactions.base_pairs.len(), 3);

        let first = &interactions.base_pairs[0];
        assert_eq!(first.nt1, Residue::from_auth("A", 3, None, "G"));
        assert_eq!(first.nt2, Residue::from_auth("A", 70, None, "C"));
        assert_eq!(first.lw, LeontisWesthof::CWW);
        assert_eq!(first.saenger, None);

        let protonated = &interactions.base_pairs[1];
        assert_eq!(protonated.nt1.icode(), Some('B'));
        assert_eq!(protonated.nt2.chain(), "AB");
        assert_eq!(protonated.lw, LeontisWesthof::TWH);

        assert_eq!(interactions.base_pairs[2].lw, LeontisWesthof::CWS);
        assert_eq!(interactions.other_interactions.len(), 1);
    }

    #[test]
    fn rejects_codes_of_wrong_length() {
        let json = r#"{"basepairs": [{"chain1": "A", "resnum1": 1, "ins1": "?", "resname1": "G",
            "chain2": "A", "resnum2": 2, "ins2": "?", "resname2": "C", "basepair": "W:W"}]}"#;
        let err = unify(Some(json), None).unwrap_err();
        assert!(matches!(err, Error::Format { tool: ToolKind::Bpnet, line: 1, .. }));
    }

    #[test]
    fn reports_malformed_json() {
        let err = unify(Some("{\"basepairs\": [}"), None).unwrap_err();
        assert!(matches!(err, Error::Json { tool: ToolKind::Bpnet, .. }));
    }

    #[test]
    fn reads_stackings_and_proximity_contacts() {
        let interactions = unify(None, Some(OVERLAPS)).expect("unify");

        assert_eq!(interactions.stackings.len(), 1);
        let stacking = &interactions.stackings[0];
        assert_eq!(stacking.nt1, Residue::from_auth("A", 2, None, "G"));
        assert_eq!(stacking.nt2, Residue::from_auth("A", 3, None, "G"));
        assert_eq!(stacking.topology, None);

        assert_eq!(interactions.other_interactions.len(), 3);
        assert_eq!(
            interactions.other_interactions[0].nt2,
            Residue::from_auth("AB", 2, None, "G")
        );

        assert_eq!(interactions.base_ribose_interactions.len(), 1);
        let ribose = &interactions.base_ribose_interactions[0];
        assert_eq!(ribose.nt1, Residue::from_auth("B", 6, Some('A'), "U"));
        assert_eq!(ribose.nt2, Residue::from_auth("A", 5, None, "G"));

        assert_eq!(interactions.base_phosphate_interactions.len(), 1);
        let phosphate = &interactions.base_phosphate_interactions[0];
        assert_eq!(phosphate.nt1, Residue::from_auth("A", 7, None, "C"));
        assert_eq!(phosphate.nt2, Residue::from_auth("A", 9, None, "A"));
    }

    #[test]
    fn chain_names_may_contain_dashes() {
        let overlaps = "\
OVLP 5:9 ? 5:9 ? G:C X-1^B ASTK BP : 16.85 187.10 188.10
OVLP 5:9 ? 5:9 ? G:C X-1-B ASTK BP : 16.85 187.10 188.10
";
        let interactions = unify(None, Some(overlaps)).expect("unify");
        assert_eq!(interactions.stackings.len(), 2);
        for stacking in &interactions.stackings {
            assert_eq!(stacking.nt1, Residue::from_auth("X-1", 5, None, "G"));
            assert_eq!(stacking.nt2, Residue::from_auth("B", 9, None, "C"));
        }

        let err = unify(None, Some("OVLP 5:9 ? 5:9 ? G:C AB ASTK BP : 1 2 3\n")).unwrap_err();
        assert!(matches!(err, Error::Format { line: 1, .. }));
    }

    #[test]
    fn rejects_short_overlap_records() {
        let err = unify(None, Some("OVLP 2:3 ? 2:3 ? G:G A-A ASTK\n")).unwrap_err();
        assert!(matches!(err, Error::Format { line: 1, .. }));
        let err = unify(None, Some("\nPROX 2:3 ? 2:3 ? G:G A-A N2:N7\n")).unwrap_err();
        assert!(matches!(err, Error::Format { line: 2, .. }));
    }

    #[test]
    fn combines_both_documents() {
        let interactions = unify(Some(BASEPAIRS), Some(OVERLAPS)).expect("unify");
        assert_eq!(interactions.base_pairs.len(), 3);
        assert_eq!(interactions.stackings.len(), 1);
        assert_eq!(interactions.other_interactions.len(), 4);
    }
}
