use super::reader::{Category, read_category};
use crate::io::{Format, error::Error};
use crate::model::structure::{AtomRecord, RecordKind, Structure};
use std::io::BufRead;

const ATOM_SITE: &str = "atom_site";

/// Reads the first model of an mmCIF file's `_atom_site` category.
pub fn read<R: BufRead>(reader: R) -> Result<Structure, Error> {
    read_model(reader, 1)
}

/// Reads the atoms of one model. Author chain, number and atom names are preferred over
/// their label counterparts, so chains keep their full multi-character identifiers.
/// Documents without `pdbx_PDB_model_num` hold a single implicit model numbered 1.
pub fn read_model<R: BufRead>(reader: R, model: u32) -> Result<Structure, Error> {
    let Some(sites) = read_category(reader, ATOM_SITE)? else {
        return Err(Error::parse(Format::Mmcif, 1, "no _atom_site category"));
    };
    let has_models = sites.field_index("pdbx_PDB_model_num").is_some();
    if !has_models && model != 1 {
        return Err(Error::MissingModel(model));
    }

    let mut atoms = Vec::new();
    for row in 0..sites.len() {
        let site = Site {
            sites: &sites,
            row,
        };
        if has_models && site.parse::<u32>("pdbx_PDB_model_num")? != model {
            continue;
        }
        atoms.push(site.atom()?);
    }

    if has_models && atoms.is_empty() && !sites.is_empty() {
        return Err(Error::MissingModel(model));
    }
    Ok(Structure::new(atoms))
}

struct Site<'a> {
    sites: &'a Category,
    row: usize,
}

impl Site<'_> {
    fn line(&self) -> usize {
        self.sites.line(self.row).unwrap_or(self.row + 1)
    }

    /// First non-null value among `fields`.
    fn value(&self, fields: &[&str]) -> Option<&str> {
        fields
            .iter()
            .filter_map(|field| self.sites.value(self.row, field))
            .find(|value| !is_null(value))
    }

    fn required(&self, fields: &[&str]) -> Result<&str, Error> {
        self.value(fields).ok_or_else(|| {
            Error::parse(
                Format::Mmcif,
                self.line(),
                format!("atom site has no {}", fields.join(" or ")),
            )
        })
    }

    fn parse<T: std::str::FromStr>(&self, field: &str) -> Result<T, Error> {
        let raw = self.required(&[field])?;
        raw.parse().map_err(|_| {
            Error::parse(Format::Mmcif, self.line(), format!("invalid {field} '{raw}'"))
        })
    }

    fn optional_char(&self, field: &str) -> Option<char> {
        self.value(&[field]).and_then(|value| value.chars().next())
    }

    fn atom(&self) -> Result<AtomRecord, Error> {
        let kind = match self.value(&["group_PDB"]) {
            Some(group) if group.eq_ignore_ascii_case("HETATM") => RecordKind::Hetatm,
            _ => RecordKind::Atom,
        };
        let number_field = if self.value(&["auth_seq_id"]).is_some() {
            "auth_seq_id"
        } else {
            "label_seq_id"
        };

        Ok(AtomRecord {
            kind,
            serial: self.value(&["id"]).and_then(|id| id.parse().ok()).unwrap_or(0),
            name: self.required(&["auth_atom_id", "label_atom_id"])?.to_string(),
            alt_loc: self.optional_char("label_alt_id"),
            residue_name: self.required(&["auth_comp_id", "label_comp_id"])?.to_string(),
            chain: self.required(&["auth_asym_id", "label_asym_id"])?.to_string(),
            number: self.parse(number_field)?,
            icode: self.optional_char("pdbx_PDB_ins_code"),
            position: [
                self.parse("Cartn_x")?,
                self.parse("Cartn_y")?,
                self.parse("Cartn_z")?,
            ],
            occupancy: self
                .value(&["occupancy"])
                .and_then(|v| v.parse().ok())
                .unwrap_or(1.0),
            temperature_factor: self
                .value(&["B_iso_or_equiv"])
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            element: self.value(&["type_symbol"]).unwrap_or_default().to_string(),
        })
    }
}

fn is_null(value: &str) -> bool {
    value == "?" || value == "."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::pack_chains;
    use std::io::Cursor;

    const ATOM_SITE_DOC: &str = "\
data_TEST
#
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_alt_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.pdbx_PDB_ins_code
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
_atom_site.occupancy
_atom_site.B_iso_or_equiv
_atom_site.auth_seq_id
_atom_site.auth_comp_id
_atom_site.auth_asym_id
_atom_site.auth_atom_id
_atom_site.pdbx_PDB_model_num
ATOM   1 P P     . G A 1 ? 1.000 2.000 3.000 1.00 10.0 3  G AA P     1
ATOM   2 C \"C1'\" . G A 1 ? 1.500 2.500 3.500 1.00 11.0 3  G AA \"C1'\" 1
HETATM 3 P P     . C B 1 A 4.000 5.000 6.000 0.50 12.0 70 C B  P     1
ATOM   4 P P     . G A 1 ? 9.000 9.000 9.000 1.00 10.0 3  G AA P     2
#
";

    #[test]
    fn reads_first_model_with_author_identifiers() {
        let structure = read(Cursor::new(ATOM_SITE_DOC)).expect("read mmcif");
        assert_eq!(structure.atom_count(), 3);

        let first = &structure.atoms[0];
        assert_eq!(first.chain, "AA");
        assert_eq!(first.number, 3);
        assert_eq!(first.icode, None);
        assert_eq!(first.alt_loc, None);
        assert_eq!(first.position, [1.0, 2.0, 3.0]);
        assert_eq!(first.element, "P");
        assert_eq!(structure.atoms[1].name, "C1'");

        let hetatm = &structure.atoms[2];
        assert_eq!(hetatm.kind, RecordKind::Hetatm);
        assert_eq!((hetatm.chain.as_str(), hetatm.number), ("B", 70));
        assert_eq!(hetatm.icode, Some('A'));
        assert_eq!(hetatm.occupancy, 0.5);
    }

    #[test]
    fn selects_models() {
        let second = read_model(Cursor::new(ATOM_SITE_DOC), 2).expect("model 2");
        assert_eq!(second.atom_count(), 1);
        assert_eq!(second.atoms[0].position, [9.0, 9.0, 9.0]);

        let err = read_model(Cursor::new(ATOM_SITE_DOC), 5).unwrap_err();
        assert!(matches!(err, Error::MissingModel(5)));
    }

    #[test]
    fn multi_character_chains_reach_chain_packing() {
        let structure = read(Cursor::new(ATOM_SITE_DOC)).expect("read mmcif");
        assert_eq!(structure.chains(), vec!["AA", "B"]);

        let (packed, map) = pack_chains(&structure, "XYZ").expect("pack");
        assert_eq!(packed.chains(), vec!["X", "Y"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn falls_back_to_label_identifiers() {
        let doc = "\
loop_
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
N1 U LONG 7 0 0 0
";
        let structure = read(Cursor::new(doc)).expect("read mmcif");
        assert_eq!(structure.atoms[0].chain, "LONG");
        assert_eq!(structure.atoms[0].number, 7);
        assert!(matches!(
            read_model(Cursor::new(doc), 2),
            Err(Error::MissingModel(2))
        ));
    }

    #[test]
    fn malformed_coordinates_name_the_row_line() {
        let doc = "\
loop_
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
P G A 1 0 0 0
P G A 2 x 0 0
";
        let err = read(Cursor::new(doc)).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                format: Format::Mmcif,
                line: 10,
                ..
            }
        ));
    }

    #[test]
    fn missing_atom_site_is_an_error() {
        let err = read(Cursor::new("data_X\n_cell.length_a 10\n")).unwrap_err();
        assert!(matches!(err, Error::Parse { format: Format::Mmcif, .. }));
    }
}
