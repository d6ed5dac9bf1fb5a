use crate::io::{Format, error::Error};
use crate::model::structure::{AtomRecord, Structure};
use std::io::Write;

const MAX_SERIAL: u32 = 99_999;
const MIN_NUMBER: i32 = -999;
const MAX_NUMBER: i32 = 9_999;

/// Writes the structure as fixed-column PDB, with a `TER` after each chain run and a
/// closing `END`. Chains longer than one character cannot be represented and are
/// rejected; pack them first.
pub fn write<W: Write>(mut writer: W, structure: &Structure) -> Result<(), Error> {
    let mut previous_chain: Option<&str> = None;

    for (idx, atom) in structure.atoms.iter().enumerate() {
        if atom.chain.chars().count() > 1 {
            return Err(Error::ChainTooLong {
                format: Format::Pdb,
                chain: atom.chain.clone(),
            });
        }
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&atom.number) {
            return Err(Error::FieldOverflow {
                field: "residue number",
                width: 4,
                value: atom.number.to_string(),
            });
        }
        let serial = if atom.serial == 0 {
            idx as u32 + 1
        } else {
            atom.serial
        };
        if serial > MAX_SERIAL {
            return Err(Error::FieldOverflow {
                field: "atom serial",
                width: 5,
                value: serial.to_string(),
            });
        }

        if previous_chain.is_some_and(|chain| chain != atom.chain) {
            writeln!(writer, "TER")?;
        }
        previous_chain = Some(atom.chain.as_str());

        writeln!(writer, "{}", format_atom(atom, serial))?;
    }

    if previous_chain.is_some() {
        writeln!(writer, "TER")?;
    }
    writeln!(writer, "END")?;
    Ok(())
}

fn format_atom(atom: &AtomRecord, serial: u32) -> String {
    let name = if atom.name.len() < 4 {
        format!(" {:<3}", atom.name)
    } else {
        atom.name.clone()
    };
    let chain = atom.chain.chars().next().unwrap_or(' ');
    format!(
        "{:<6}{:>5} {:<4}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        atom.kind.as_str(),
        serial,
        name,
        atom.alt_loc.unwrap_or(' '),
        atom.residue_name,
        chain,
        atom.number,
        atom.icode.unwrap_or(' '),
        atom.position[0],
        atom.position[1],
        atom.position[2],
        atom.occupancy,
        atom.temperature_factor,
        atom.element,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::pdb::read;
    use crate::model::structure::RecordKind;
    use std::io::Cursor;

    fn sample() -> Structure {
        let mut het = AtomRecord::new("N1", "PSU", "B", -1, [0.0, 1.0, -2.5]).with_icode(Some('A'));
        het.kind = RecordKind::Hetatm;
        het.element = "N".into();
        let mut p = AtomRecord::new("P", "G", "A", 1, [10.0, 11.0, 12.0]);
        p.element = "P".into();
        Structure::new(vec![
            p,
            AtomRecord::new("C1'", "G", "A", 1, [1.5, -2.25, 3.125]),
            het,
        ])
    }

    #[test]
    fn writes_fixed_columns() {
        let mut buf = Vec::new();
        write(&mut buf, &sample()).expect("write pdb");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "ATOM      1  P     G A   1      10.000  11.000  12.000  1.00  0.00           P"
        );
        assert_eq!(&lines[1][12..16], " C1'");
        assert_eq!(lines[2], "TER");
        assert!(lines[3].starts_with("HETATM    3  N1  PSU B  -1A"));
        assert_eq!(lines[4], "TER");
        assert_eq!(lines[5], "END");
    }

    #[test]
    fn output_reads_back() {
        let original = sample();
        let mut buf = Vec::new();
        write(&mut buf, &original).expect("write pdb");
        let back = read(Cursor::new(buf)).expect("read pdb");

        assert_eq!(back.atom_count(), original.atom_count());
        for (a, b) in original.atoms.iter().zip(&back.atoms) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.residue_name, b.residue_name);
            assert_eq!(a.chain, b.chain);
            assert_eq!(a.number, b.number);
            assert_eq!(a.icode, b.icode);
            assert_eq!(a.kind, b.kind);
            for k in 0..3 {
                assert!((a.position[k] - b.position[k]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn rejects_multi_character_chains() {
        let structure = Structure::new(vec![AtomRecord::new("P", "G", "AB", 1, [0.0; 3])]);
        let err = write(Vec::new(), &structure).unwrap_err();
        assert!(matches!(err, Error::ChainTooLong { chain, .. } if chain == "AB"));
    }

    #[test]
    fn rejects_numbers_wider_than_the_column() {
        let structure = Structure::new(vec![AtomRecord::new("P", "G", "A", 10_000, [0.0; 3])]);
        let err = write(Vec::new(), &structure).unwrap_err();
        assert!(matches!(err, Error::FieldOverflow { width: 4, .. }));
    }
}
