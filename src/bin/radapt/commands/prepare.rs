use std::io::Write;

use anyhow::{Context, Result, bail};
use rna_adapters::analysis::{self, Prepared};
use rna_adapters::io::{mmcif, pdb};

use crate::cli::{PrepareArgs, StructureFormat};
use crate::config::build_analysis_config;
use crate::display::{Context as DisplayContext, Progress, print_structure_info};
use crate::io::{create_output, infer_structure_format, open_input, stdin_is_tty};

const TOTAL_STEPS: u8 = 3;

pub fn run_prepare(args: PrepareArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: radapt prepare <TOOL> -i <FILE> -t <TABLES> or pipe PDB/mmCIF data via stdin."
        );
    }

    let config = build_analysis_config(&args.config)?;
    let mut progress = Progress::new(ctx.interactive, "Prepare", TOTAL_STEPS);

    let format = infer_structure_format(args.input_format, args.io.input.as_deref());
    progress.step("Reading structure");
    let input = open_input(args.io.input.as_deref())?;
    let model = args.model.unwrap_or(1);
    let structure = match format {
        StructureFormat::Pdb => {
            pdb::read_model(input, model).context("Failed to read PDB structure")?
        }
        StructureFormat::Mmcif => {
            mmcif::read_model(input, model).context("Failed to read mmCIF structure")?
        }
    };
    if structure.is_empty() {
        bail!("Input structure contains no atoms");
    }
    progress.complete_step(
        "Reading structure",
        &[
            format!("Parse {} file", format_name(format)),
            format!(
                "{} atoms, {} residues, {} chains",
                structure.atom_count(),
                structure.residues().len(),
                structure.chains().len()
            ),
        ],
    );

    let rewrite = format!("Rewriting identifiers for {}", args.tool);
    progress.step(&rewrite);
    let prepared = analysis::prepare(&structure, args.tool, &config)?;
    progress.complete_step(&rewrite, &rewrite_details(&prepared));

    if ctx.interactive {
        print_structure_info(&prepared.structure, &prepared.tables);
    }

    progress.step("Writing output");
    let mut out = create_output(args.io.output.as_deref())?;
    pdb::write(&mut out, &prepared.structure).context("Failed to write prepared structure")?;
    out.flush().context("Failed to write prepared structure")?;

    let mut tables = create_output(Some(&args.tables))?;
    serde_json::to_writer_pretty(&mut tables, &prepared.tables)
        .context("Failed to write restore tables")?;
    writeln!(tables).context("Failed to write restore tables")?;
    tables.flush().context("Failed to write restore tables")?;

    let destination = match &args.io.output {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    };
    progress.complete_step(
        "Writing output",
        &[
            format!("PDB → {}", destination),
            format!("Restore tables → {}", args.tables.display()),
        ],
    );

    progress.finish();

    Ok(())
}

fn rewrite_details(prepared: &Prepared) -> Vec<String> {
    let tables = &prepared.tables;
    let mut details = Vec::new();

    match &tables.chain_map {
        Some(map) => details.push(format!("Packed {} chains into single symbols", map.len())),
        None => details.push("Chain identifiers kept".to_string()),
    }
    match &tables.number_map {
        Some(map) => details.push(format!("Renumbered {} residues sequentially", map.len())),
        None => details.push("Residue numbering kept".to_string()),
    }

    details
}

fn format_name(format: StructureFormat) -> &'static str {
    match format {
        StructureFormat::Pdb => "PDB",
        StructureFormat::Mmcif => "mmCIF",
    }
}
