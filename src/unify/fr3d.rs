use super::{Error, ToolKind, fold_lines};
use crate::model::classification::{LeontisWesthof, StackingTopology};
use crate::model::interaction::{
    BaseInteractions, BasePair, BasePhosphate, BaseRibose, Interaction, OtherInteraction,
    Stacking,
};
use crate::model::residue::Residue;

const TOOL: ToolKind = ToolKind::Fr3d;

const BASE_RIBOSE: [&str; 3] = ["s3O2'", "s3O3'", "s3O4'"];
const BASE_PHOSPHATE: [&str; 3] = ["s3O5'", "s3OP1", "s3OP2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classification {
    BasePair(LeontisWesthof),
    Stacking(StackingTopology),
    BaseRibose,
    BasePhosphate,
    Other,
}

/// Parses `PDB|model|chain|name|number[|atom|altloc|icode]`.
fn unit_id(token: &str, line: usize) -> Result<Residue, Error> {
    let fields: Vec<&str> = token.split('|').collect();
    if fields.len() < 5 {
        return Err(Error::format(
            TOOL,
            line,
            format!("unit id '{token}' has fewer than 5 fields"),
        ));
    }
    let number = fields[4].parse::<i32>().map_err(|_| {
        Error::format(TOOL, line, format!("invalid residue number in unit id '{token}'"))
    })?;
    let icode = fields.get(7).and_then(|icode| icode.chars().next());
    Ok(Residue::from_auth(fields[2], number, icode, fields[3]))
}

/// Strips the `_exp`, near (`n`) and alternative (`a`) markers, then maps what is left.
fn classify(raw: &str) -> Classification {
    let name = raw.replace("_exp", "");
    let name = name.strip_prefix('n').unwrap_or(&name);
    let name = name.strip_prefix('a').unwrap_or(name);

    match name {
        "s33" => return Classification::Stacking(StackingTopology::Downward),
        "s55" => return Classification::Stacking(StackingTopology::Upward),
        "s35" => return Classification::Stacking(StackingTopology::Outward),
        "s53" => return Classification::Stacking(StackingTopology::Inward),
        _ => {}
    }
    if BASE_RIBOSE.contains(&name) {
        return Classification::BaseRibose;
    }
    if BASE_PHOSPHATE.contains(&name) {
        return Classification::BasePhosphate;
    }

    let chars: Vec<char> = name.chars().collect();
    if let [stericity, edge1, edge2] = chars.as_slice() {
        let code = if name.eq_ignore_ascii_case("hts") {
            "tHS".to_string()
        } else {
            format!(
                "{}{}{}",
                stericity.to_ascii_lowercase(),
                edge1.to_ascii_uppercase(),
                edge2.to_ascii_uppercase()
            )
        };
        if let Ok(lw) = code.parse() {
            return Classification::BasePair(lw);
        }
    }
    tracing::debug!(code = raw, "unknown FR3D interaction");
    Classification::Other
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<Interaction>, Error> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [unit1, classification, unit2] = fields.as_slice() else {
        return Err(Error::format(
            TOOL,
            line_no,
            format!("expected 'unit classification unit', found {} fields", fields.len()),
        ));
    };
    let nt1 = unit_id(unit1, line_no)?;
    let nt2 = unit_id(unit2, line_no)?;

    let interaction = match classify(classification) {
        Classification::BasePair(lw) => BasePair::new(nt1, nt2, lw, None).into(),
        Classification::Stacking(topology) => Stacking::new(nt1, nt2, Some(topology)).into(),
        Classification::BaseRibose => BaseRibose::new(nt1, nt2, None).into(),
        Classification::BasePhosphate => BasePhosphate::new(nt1, nt2, None).into(),
        Classification::Other => OtherInteraction::new(nt1, nt2).into(),
    };
    Ok(Some(interaction))
}

/// Unifies FR3D's interaction listing. Unit ids carry author identifiers, so no
/// structure is needed.
pub fn unify(text: &str) -> Result<BaseInteractions, Error> {
    fold_lines(text, parse_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_base_pair_between_author_residues() {
        let interactions = unify("1EHZ|1|A|G|3 tHS 1EHZ|1|A|C|70\n").expect("unify");
        assert_eq!(interactions.base_pairs.len(), 1);
        let pair = &interactions.base_pairs[0];
        assert_eq!(pair.nt1, Residue::from_auth("A", 3, None, "G"));
        assert_eq!(pair.nt2, Residue::from_auth("A", 70, None, "C"));
        assert_eq!(pair.lw, LeontisWesthof::THS);
        assert_eq!(pair.saenger, None);
    }

    #[test]
    fn converts_stacking_codes() {
        let text = "\
1EHZ|1|A|G|1 s33 1EHZ|1|A|C|2
1EHZ|1|A|C|2 s55 1EHZ|1|A|G|1
1EHZ|1|A|G|1 s35 1EHZ|1|A|A|5
1EHZ|1|A|A|5 ns53 1EHZ|1|A|G|1
";
        let interactions = unify(text).expect("unify");
        let topologies: Vec<_> = interactions.stackings.iter().map(|s| s.topology).collect();
        assert_eq!(
            topologies,
            vec![
                Some(StackingTopology::Downward),
                Some(StackingTopology::Upward),
                Some(StackingTopology::Outward),
                Some(StackingTopology::Inward),
            ]
        );
    }

    #[test]
    fn normalizes_classification_markers() {
        assert_eq!(classify("ncWW"), Classification::BasePair(LeontisWesthof::CWW));
        assert_eq!(classify("acHS"), Classification::BasePair(LeontisWesthof::CHS));
        assert_eq!(classify("tSH_exp"), Classification::BasePair(LeontisWesthof::TSH));
        assert_eq!(classify("hts"), Classification::BasePair(LeontisWesthof::THS));
        assert_eq!(classify("Cww"), Classification::BasePair(LeontisWesthof::CWW));
        assert_eq!(classify("s3O2'"), Classification::BaseRibose);
        assert_eq!(classify("s3OP1"), Classification::BasePhosphate);
        assert_eq!(classify("0BPh"), Classification::Other);
        assert_eq!(classify("cXY"), Classification::Other);
    }

    #[test]
    fn reads_insertion_codes_and_skips_comments() {
        let text = "\
# generated by FR3D
1EHZ|1|A|G|3|||B s3OP2 1EHZ|1|B|U|4|P

1EHZ|1|A|G|3 perp 1EHZ|1|A|C|70
";
        let interactions = unify(text).expect("unify");
        let phosphate = &interactions.base_phosphate_interactions[0];
        assert_eq!(phosphate.nt1, Residue::from_auth("A", 3, Some('B'), "G"));
        assert_eq!(phosphate.nt2, Residue::from_auth("B", 4, None, "U"));
        assert_eq!(interactions.other_interactions.len(), 1);
    }

    #[test]
    fn malformed_unit_id_is_a_format_error() {
        let err = unify("1EHZ|1|A|G s33 1EHZ|1|A|C|2\n").unwrap_err();
        assert!(matches!(err, Error::Format { tool: ToolKind::Fr3d, line: 1, .. }));
        let err = unify("1EHZ|1|A|G|x s33 1EHZ|1|A|C|2\n").unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }
}
