use super::{Error, ToolKind};
use crate::io::mmcif::{Category, read_category};
use crate::model::classification::{LeontisWesthof, Saenger};
use crate::model::interaction::{BaseInteractions, BasePair, OtherInteraction};
use crate::model::residue::{Residue, ResidueAuth, ResidueLabel};

const TOOL: ToolKind = ToolKind::Maxit;
const CATEGORY: &str = "ndb_struct_na_base_pair";

/// `hbond_type_12` enumerates the twelve families MAXIT distinguishes, in this order.
const HBOND_TYPE_12: [LeontisWesthof; 12] = [
    LeontisWesthof::CWW,
    LeontisWesthof::TWW,
    LeontisWesthof::CWH,
    LeontisWesthof::TWH,
    LeontisWesthof::CWS,
    LeontisWesthof::TWS,
    LeontisWesthof::CHH,
    LeontisWesthof::THH,
    LeontisWesthof::CHS,
    LeontisWesthof::THS,
    LeontisWesthof::CSS,
    LeontisWesthof::TSS,
];

fn convert_lw(hbond_type_12: &str) -> Option<LeontisWesthof> {
    let index = hbond_type_12.parse::<usize>().ok()?;
    index
        .checked_sub(1)
        .and_then(|i| HBOND_TYPE_12.get(i))
        .copied()
}

fn convert_saenger(hbond_type_28: &str) -> Option<Saenger> {
    hbond_type_28
        .parse::<usize>()
        .ok()
        .and_then(Saenger::from_index)
}

fn is_null(value: &str) -> bool {
    value == "?" || value == "."
}

struct Row<'a> {
    category: &'a Category,
    index: usize,
}

impl Row<'_> {
    fn line(&self) -> usize {
        self.index + 1
    }

    fn value(&self, field: &str) -> Result<&str, Error> {
        self.category.value(self.index, field).ok_or_else(|| {
            Error::format(TOOL, self.line(), format!("missing field '{CATEGORY}.{field}'"))
        })
    }

    fn number(&self, field: &str) -> Result<i32, Error> {
        let raw = self.value(field)?;
        raw.parse::<i32>()
            .map_err(|_| Error::format(TOOL, self.line(), format!("invalid {field} '{raw}'")))
    }

    /// Builds the residue on side `i` or `j` with both identities.
    fn residue(&self, side: char) -> Result<Residue, Error> {
        let name = self.value(&format!("{side}_label_comp_id"))?;

        let icode = self.value(&format!("{side}_PDB_ins_code"))?;
        let icode = if is_null(icode) {
            None
        } else {
            icode.chars().next()
        };
        let auth = ResidueAuth::new(
            self.value(&format!("{side}_auth_asym_id"))?,
            self.number(&format!("{side}_auth_seq_id"))?,
            icode,
            name,
        );

        let label_seq = format!("{side}_label_seq_id");
        let label = if is_null(self.value(&label_seq)?) {
            None
        } else {
            Some(ResidueLabel::new(
                self.value(&format!("{side}_label_asym_id"))?,
                self.number(&label_seq)?,
                name,
            ))
        };
        Ok(Residue::new(label, Some(auth)))
    }
}

/// Unifies the `_ndb_struct_na_base_pair` category of a MAXIT mmCIF document. A document
/// without the category reports no base pairs. Error line numbers count category rows.
pub fn unify(text: &str) -> Result<BaseInteractions, Error> {
    let category = read_category(text.as_bytes(), CATEGORY)
        .map_err(|source| Error::Mmcif { tool: TOOL, source })?;
    let Some(category) = category else {
        tracing::debug!("MAXIT output has no {CATEGORY} category");
        return Ok(BaseInteractions::new());
    };

    let mut interactions = BaseInteractions::new();
    for index in 0..category.len() {
        let row = Row {
            category: &category,
            index,
        };
        let nt1 = row.residue('i')?;
        let nt2 = row.residue('j')?;
        let saenger = convert_saenger(row.value("hbond_type_28")?);
        match convert_lw(row.value("hbond_type_12")?) {
            Some(lw) => interactions.push(BasePair::new(nt1, nt2, lw, saenger)),
            None => interactions.push(OtherInteraction::new(nt1, nt2)),
        }
    }
    Ok(interactions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "\
data_1EHZ
#
_entry.id 1EHZ
#
loop_
_ndb_struct_na_base_pair.model_number
_ndb_struct_na_base_pair.i_label_asym_id
_ndb_struct_na_base_pair.i_label_comp_id
_ndb_struct_na_base_pair.i_label_seq_id
_ndb_struct_na_base_pair.i_symmetry
_ndb_struct_na_base_pair.j_label_asym_id
_ndb_struct_na_base_pair.j_label_comp_id
_ndb_struct_na_base_pair.j_label_seq_id
_ndb_struct_na_base_pair.j_symmetry
_ndb_struct_na_base_pair.hbond_type_28
_ndb_struct_na_base_pair.hbond_type_12
_ndb_struct_na_base_pair.i_auth_asym_id
_ndb_struct_na_base_pair.i_auth_seq_id
_ndb_struct_na_base_pair.i_PDB_ins_code
_ndb_struct_na_base_pair.j_auth_asym_id
_ndb_struct_na_base_pair.j_auth_seq_id
_ndb_struct_na_base_pair.j_PDB_ins_code
1 A G 1 1_555 A C 72 1_555 19 1 A 1 ? A 72 ?
1 A U 8 1_555 A A 14 1_555 21 4 A 8 ? A 14 ?
1 A G 15 1_555 A C 48 1_555 ? 2 A 15 ? A 48 A
1 A G 18 1_555 A U 55 1_555 ? ? A 18 ? A 55 ?
#
";

    #[test]
    fn reads_base_pairs_with_both_identities() {
        let interactions = unify(DOCUMENT).expect("unify");
        assert_eq!(interactions.base_pairs.len(), 3);
        assert_eq!(interactions.other_interactions.len(), 1);

        let first = &interactions.base_pairs[0];
        assert_eq!(first.lw, LeontisWesthof::CWW);
        assert_eq!(first.saenger, Some(Saenger::XIX));
        assert_eq!(first.nt1.label, Some(ResidueLabel::new("A", 1, "G")));
        assert_eq!(first.nt2.auth, Some(ResidueAuth::new("A", 72, None, "C")));

        assert_eq!(interactions.base_pairs[1].lw, LeontisWesthof::TWH);
        assert_eq!(interactions.base_pairs[1].saenger, Some(Saenger::XXI));

        let third = &interactions.base_pairs[2];
        assert_eq!(third.lw, LeontisWesthof::TWW);
        assert_eq!(third.saenger, None);
        assert_eq!(third.nt2.icode(), Some('A'));
    }

    #[test]
    fn converts_enumerations() {
        assert_eq!(convert_lw("12"), Some(LeontisWesthof::TSS));
        assert_eq!(convert_lw("0"), None);
        assert_eq!(convert_lw("13"), None);
        assert_eq!(convert_lw("?"), None);
        assert_eq!(convert_saenger("28"), Some(Saenger::XXVIII));
        assert_eq!(convert_saenger("29"), None);
        assert_eq!(convert_saenger("?"), None);
    }

    #[test]
    fn missing_category_yields_nothing() {
        let interactions = unify("data_x\n_entry.id x\n").expect("unify");
        assert!(interactions.is_empty());
    }

    #[test]
    fn missing_field_is_a_format_error() {
        let text = "\
loop_
_ndb_struct_na_base_pair.i_label_comp_id
_ndb_struct_na_base_pair.j_label_comp_id
G C
";
        let err = unify(text).unwrap_err();
        assert!(matches!(err, Error::Format { tool: ToolKind::Maxit, line: 1, .. }));
    }
}
