use crate::io::{Format, error::Error};
use crate::model::structure::{AtomRecord, RecordKind, Structure};
use std::io::BufRead;

/// Reads the first model of a PDB file.
pub fn read<R: BufRead>(reader: R) -> Result<Structure, Error> {
    read_model(reader, 1)
}

/// Reads the coordinate records of one model. Files without `MODEL` records hold a
/// single implicit model numbered 1.
pub fn read_model<R: BufRead>(reader: R, model: u32) -> Result<Structure, Error> {
    let mut atoms = Vec::new();
    let mut saw_models = false;
    let mut current: Option<u32> = None;
    let mut found = false;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let record = column(&line, 0, 6).trim_end();

        match record {
            "MODEL" => {
                saw_models = true;
                let serial = column(&line, 6, line.len()).trim();
                let serial = if serial.is_empty() {
                    1
                } else {
                    serial
                        .parse::<u32>()
                        .map_err(|_| Error::parse(Format::Pdb, line_no, "invalid MODEL serial"))?
                };
                current = Some(serial);
                found |= serial == model;
            }
            "ENDMDL" => {
                if current == Some(model) {
                    break;
                }
                current = None;
            }
            "ATOM" | "HETATM" => {
                let selected = match current {
                    Some(serial) => serial == model,
                    None => !saw_models && model == 1,
                };
                if selected {
                    atoms.push(parse_atom(&line, line_no)?);
                }
            }
            _ => {}
        }
    }

    if saw_models && !found {
        return Err(Error::MissingModel(model));
    }
    if !saw_models && model != 1 {
        return Err(Error::MissingModel(model));
    }

    Ok(Structure::new(atoms))
}

fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

fn optional_char(line: &str, at: usize) -> Option<char> {
    column(line, at, at + 1)
        .chars()
        .next()
        .filter(|c| !c.is_whitespace())
}

fn parse_atom(line: &str, line_no: usize) -> Result<AtomRecord, Error> {
    if line.len() < 54 {
        return Err(Error::parse(
            Format::Pdb,
            line_no,
            "coordinate record shorter than 54 columns",
        ));
    }

    let kind = if line.starts_with("HETATM") {
        RecordKind::Hetatm
    } else {
        RecordKind::Atom
    };
    let serial = column(line, 6, 11).trim().parse::<u32>().unwrap_or(0);
    let number = column(line, 22, 26)
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::parse(Format::Pdb, line_no, "invalid residue sequence number"))?;

    let coordinate = |start: usize, axis: &str| -> Result<f64, Error> {
        column(line, start, start + 8)
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::parse(Format::Pdb, line_no, format!("invalid {axis} coordinate")))
    };
    let position = [
        coordinate(30, "x")?,
        coordinate(38, "y")?,
        coordinate(46, "z")?,
    ];

    let occupancy = column(line, 54, 60).trim().parse::<f64>().unwrap_or(1.0);
    let temperature_factor = column(line, 60, 66).trim().parse::<f64>().unwrap_or(0.0);

    Ok(AtomRecord {
        kind,
        serial,
        name: column(line, 12, 16).trim().to_string(),
        alt_loc: optional_char(line, 16),
        residue_name: column(line, 17, 20).trim().to_string(),
        chain: column(line, 21, 22).trim().to_string(),
        number,
        icode: optional_char(line, 26),
        position,
        occupancy,
        temperature_factor,
        element: column(line, 76, 78).trim().to_string(),
    })
}
