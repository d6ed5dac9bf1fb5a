use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rna_adapters::analysis::{self, Prepared};
use rna_adapters::io::pdb;
use rna_adapters::{RawOutput, RestoreTables, Structure, ToolKind};

use crate::cli::{JsonStyle, UnifyArgs};
use crate::config::{build_analysis_config, policy_name};
use crate::display::{
    Context as DisplayContext, Progress, print_conflicts, print_interaction_counts,
};
use crate::io::{create_output, open_input, read_file, read_text, stdin_is_tty};

const TOTAL_STEPS: u8 = 3;

pub fn run_unify(args: UnifyArgs, ctx: DisplayContext) -> Result<()> {
    let tool = args.tool;
    let reads_stdin = args.io.input.is_none() && !stdin_is_tty();
    if args.io.input.is_none() && !reads_stdin && args.overlaps.is_none() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: radapt unify <TOOL> -i <FILE> or pipe {} output via stdin.",
            tool
        );
    }
    if args.overlaps.is_some() && tool != ToolKind::Bpnet {
        bail!("--overlaps only applies to BPNet output, not {}", tool);
    }

    let config = build_analysis_config(&args.config)?;
    let mut progress = Progress::new(ctx.interactive, "Unify", TOTAL_STEPS);

    progress.step("Reading tool output");
    let raw = read_raw_output(&args, reads_stdin)?;
    let structure = read_structure(tool, args.structure.as_deref())?;
    let tables = read_tables(tool, args.tables.as_deref())?;
    progress.complete_step("Reading tool output", &input_details(&args, &structure));

    let unify_step = format!("Unifying {} output", tool);
    progress.step(&unify_step);
    let prepared = Prepared { structure, tables };
    let analysis = analysis::finish(&raw, &prepared, &config)?;
    progress.complete_step(
        &unify_step,
        &[
            format!("{} interactions", analysis.interactions.len()),
            format!("Conflict policy: {}", policy_name(config.conflict_policy)),
        ],
    );

    if ctx.interactive {
        print_interaction_counts(&analysis.interactions, &analysis.report);
        print_conflicts(&analysis.report.conflicts);
    }

    progress.step("Writing output");
    let mut out = create_output(args.io.output.as_deref())?;
    match args.json {
        JsonStyle::Pretty => serde_json::to_writer_pretty(&mut out, &analysis.interactions),
        JsonStyle::Compact => serde_json::to_writer(&mut out, &analysis.interactions),
    }
    .context("Failed to write interactions")?;
    writeln!(out).context("Failed to write interactions")?;
    out.flush().context("Failed to write interactions")?;

    let destination = match &args.io.output {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    };
    progress.complete_step("Writing output", &[format!("JSON → {}", destination)]);

    progress.finish();

    Ok(())
}

fn read_raw_output(args: &UnifyArgs, reads_stdin: bool) -> Result<RawOutput> {
    let input = args.io.input.as_deref();

    Ok(match args.tool {
        ToolKind::Bpnet => RawOutput::Bpnet {
            basepairs: if input.is_some() || reads_stdin {
                Some(read_text(input)?)
            } else {
                None
            },
            overlaps: args.overlaps.as_deref().map(read_file).transpose()?,
        },
        ToolKind::Fr3d => RawOutput::Fr3d(read_text(input)?),
        ToolKind::Barnaba => RawOutput::Barnaba(read_text(input)?),
        ToolKind::McAnnotate => RawOutput::McAnnotate(read_text(input)?),
        ToolKind::Rnaview => RawOutput::Rnaview(read_text(input)?),
        ToolKind::Maxit => RawOutput::Maxit(read_text(input)?),
    })
}

/// Tools that name residues by position or omit residue names need the structure they ran on.
fn reads_structure(tool: ToolKind) -> bool {
    matches!(
        tool,
        ToolKind::Barnaba | ToolKind::McAnnotate | ToolKind::Rnaview
    )
}

fn read_structure(tool: ToolKind, path: Option<&Path>) -> Result<Structure> {
    match path {
        Some(path) => pdb::read(open_input(Some(path))?)
            .with_context(|| format!("Failed to read structure: {}", path.display())),
        None if reads_structure(tool) => bail!(
            "{} output can only be resolved against the structure it was run on; pass it with --structure",
            tool
        ),
        None => Ok(Structure::default()),
    }
}

fn read_tables(tool: ToolKind, path: Option<&Path>) -> Result<RestoreTables> {
    let Some(path) = path else {
        if tool.needs_packed_chains() || tool.needs_renumbering() {
            tracing::warn!(
                %tool,
                "no restore tables given; residues keep the identifiers the tool saw"
            );
        }
        return Ok(RestoreTables {
            tool,
            chain_map: None,
            number_map: None,
        });
    };

    let text = read_file(path)?;
    let tables: RestoreTables = serde_json::from_str(&text)
        .with_context(|| format!("Invalid restore tables: {}", path.display()))?;
    Ok(tables)
}

fn input_details(args: &UnifyArgs, structure: &Structure) -> Vec<String> {
    let mut details = Vec::new();

    let source = match &args.io.input {
        Some(path) => path.display().to_string(),
        None if args.overlaps.is_some() && args.tool == ToolKind::Bpnet => "none".to_string(),
        None => "stdin".to_string(),
    };
    details.push(format!("{} report ← {}", args.tool, source));

    if let Some(path) = &args.overlaps {
        details.push(format!("Overlap report ← {}", path.display()));
    }
    if !structure.is_empty() {
        details.push(format!("Structure: {} atoms", structure.atom_count()));
    }
    match &args.tables {
        Some(path) => details.push(format!("Restore tables ← {}", path.display())),
        None => details.push("No restore tables".to_string()),
    }

    details
}
