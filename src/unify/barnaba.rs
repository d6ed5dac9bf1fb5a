use super::{Error, ToolKind, fold_lines};
use crate::model::classification::{LeontisWesthof, StackingTopology};
use crate::model::interaction::{
    BaseInteractions, BasePair, Interaction, OtherInteraction, Stacking,
};
use crate::model::residue::Residue;
use crate::model::structure::Structure;
use regex::Regex;
use std::sync::LazyLock;

const TOOL: ToolKind = ToolKind::Barnaba;

static RESIDUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)_([0-9]+)_([0-9]+)$").expect("valid residue regex"));

fn stacking_topology(token: &str) -> Option<StackingTopology> {
    match token {
        ">>" => Some(StackingTopology::Upward),
        "<<" => Some(StackingTopology::Downward),
        "<>" => Some(StackingTopology::Outward),
        "><" => Some(StackingTopology::Inward),
        _ => None,
    }
}

/// Pairing codes are `EEs`: two edges then stericity. Codes carrying an `x` are
/// unclassified; `WCc` and `GUc` are canonical pairs.
fn leontis_westhof(code: &str) -> Option<LeontisWesthof> {
    if code.to_ascii_lowercase().contains('x') {
        return None;
    }
    if code == "WCc" || code == "GUc" {
        return Some(LeontisWesthof::CWW);
    }
    let chars: Vec<char> = code.chars().collect();
    match chars.as_slice() {
        [edge1, edge2, stericity] => LeontisWesthof::from_parts(*stericity, *edge1, *edge2),
        _ => None,
    }
}

/// Resolves `NAME_NUMBER_CHAININDEX`. The chain index counts contiguous chain runs of the
/// submitted structure; the number is the one the structure was renumbered to.
fn residue(token: &str, chains: &[&str], line: usize) -> Result<Residue, Error> {
    let captures = RESIDUE
        .captures(token)
        .ok_or_else(|| Error::format(TOOL, line, format!("unrecognized residue '{token}'")))?;
    let name = &captures[1];
    let number = captures[2].parse::<i32>().map_err(|_| {
        Error::format(TOOL, line, format!("residue number out of range in '{token}'"))
    })?;
    let chain = captures[3]
        .parse::<usize>()
        .ok()
        .and_then(|index| chains.get(index))
        .ok_or_else(|| {
            Error::unknown_residue(TOOL, line, format!("chain index of '{token}' has no chain"))
        })?;
    Ok(Residue::from_auth(*chain, number, None, name))
}

fn parse_line(line_no: usize, line: &str, chains: &[&str]) -> Result<Option<Interaction>, Error> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [first, second, annotation] = fields.as_slice() else {
        return Err(Error::format(
            TOOL,
            line_no,
            format!("expected 'residue residue annotation', found {} fields", fields.len()),
        ));
    };

    let nt1 = residue(first, chains, line_no)?;
    let nt2 = residue(second, chains, line_no)?;

    if let Some(topology) = stacking_topology(annotation) {
        return Ok(Some(Stacking::new(nt1, nt2, Some(topology)).into()));
    }
    match leontis_westhof(annotation) {
        Some(lw) => Ok(Some(BasePair::new(nt1, nt2, lw, None).into())),
        None => {
            tracing::debug!(code = %annotation, "unclassified baRNAba annotation");
            Ok(Some(OtherInteraction::new(nt1, nt2).into()))
        }
    }
}

/// Unifies baRNAba annotation lines. `structure` is the packed and renumbered structure
/// that was analyzed; residues come out in its numbering and must be restored.
pub fn unify(text: &str, structure: &Structure) -> Result<BaseInteractions, Error> {
    let chains = structure.chain_runs();
    fold_lines(text, |line_no, line| parse_line(line_no, line, &chains))
}
