use std::io::{self, Write};

use anyhow::Error;
use rna_adapters::io::Format;
use rna_adapters::{AnalysisError, IoError, PackError, ToolKind, UnifyError};

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::default();

        if let Some(analysis_err) = err.downcast_ref::<AnalysisError>() {
            collector.collect_analysis_hints(analysis_err);
        }
        if let Some(unify_err) = err.downcast_ref::<UnifyError>() {
            collector.collect_unify_hints(unify_err);
        }
        if let Some(pack_err) = err.downcast_ref::<PackError>() {
            collector.collect_pack_hints(pack_err);
        }
        if let Some(io_err) = err.downcast_ref::<IoError>() {
            collector.collect_io_hints(io_err);
        }
        if err.downcast_ref::<serde_json::Error>().is_some() {
            collector.mark_typed();
            collector.add("Restore tables must be the JSON written by `radapt prepare`");
            collector.add("Re-run prepare if the file was edited or truncated");
        }

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_analysis_hints(&mut self, err: &AnalysisError) {
        match err {
            AnalysisError::Pack(inner) => self.collect_pack_hints(inner),
            AnalysisError::Unify(inner) => self.collect_unify_hints(inner),
            AnalysisError::Io(inner) => self.collect_io_hints(inner),

            AnalysisError::Config(_) => {
                self.mark_typed();
                self.add("Configuration file has invalid TOML or an unknown key");
                self.add("Recognized keys: chain-alphabet, conflict-policy");
                self.add("conflict-policy is one of: last-wins, first-wins, keep-all");
            }

            AnalysisError::ThirdParty { tool, .. } => {
                self.mark_typed();
                self.add(format!("{} did not produce usable output", tool));
                self.add("Run the tool by hand on the prepared structure to inspect its log");
            }

            AnalysisError::ToolMismatch { expected, found } => {
                self.mark_typed();
                self.add(format!(
                    "The restore tables were prepared for {}, not {}",
                    expected, found
                ));
                self.add("Pass the tables written when preparing for this tool");
            }
        }
    }

    fn collect_unify_hints(&mut self, err: &UnifyError) {
        self.mark_typed();

        match err {
            UnifyError::Format { tool, line, .. } => {
                self.add(format!("Inspect line {} of the {} output", line, tool));
                self.add("Check that the file is complete and was produced by this tool");
                self.add_tool_specific_hints(*tool);
            }

            UnifyError::IndexMismatch { tool, .. } => {
                self.add(format!(
                    "{} numbered residues differently from the structure given",
                    tool
                ));
                self.add("Pass the exact prepared structure the tool was run on");
            }

            UnifyError::UnknownResidue { tool, .. } => {
                self.add(format!(
                    "{} output refers to a residue missing from --structure",
                    tool
                ));
                self.add("Pass the prepared structure, not the original one");
            }

            UnifyError::Json { .. } => {
                self.add("BPNet basepair report is not valid JSON");
                self.add("Check that the _basepair.json file was fully written");
            }

            UnifyError::Mmcif { .. } => {
                self.add("MAXIT output is not a readable mmCIF document");
                self.add("Check the _ndb_struct_na_base_pair loop for misaligned values");
            }
        }
    }

    fn add_tool_specific_hints(&mut self, tool: ToolKind) {
        match tool {
            ToolKind::Fr3d => {
                self.add("FR3D: each line must read `unit-id classification unit-id`");
            }
            ToolKind::Rnaview => {
                self.add("RNAView: only lines between BEGIN_base-pair and END_base-pair are read");
            }
            ToolKind::McAnnotate => {
                self.add("MC-Annotate: residue pairs must read like A12-B34 or 'A'12.B-'B'34");
            }
            ToolKind::Barnaba => {
                self.add("baRNAba: residues must read NAME_NUMBER_CHAININDEX");
            }
            ToolKind::Bpnet | ToolKind::Maxit => {}
        }
    }

    fn collect_pack_hints(&mut self, err: &PackError) {
        self.mark_typed();

        match err {
            PackError::Capacity { chains, capacity } => {
                self.add(format!(
                    "{} chains cannot be packed into {} single-character symbols",
                    chains, capacity
                ));
                self.add("Provide a longer --chain-alphabet or split the structure");
            }

            PackError::InvalidAlphabet(_) => {
                self.add("The chain alphabet must not repeat symbols or contain whitespace");
            }

            PackError::UnknownChain(_) | PackError::UnknownNumber { .. } => {
                self.add("Tool output names a residue the restore tables do not cover");
                self.add("Pass the tables written when this structure was prepared");
            }
        }
    }

    fn collect_io_hints(&mut self, err: &IoError) {
        self.mark_typed();

        match err {
            IoError::Io { source } => self.collect_std_io_hints(source),

            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "Parser encountered an issue near line {} in {} format",
                    line, format
                ));
                self.add("Inspect the file around that line for malformed entries");
                match format {
                    Format::Pdb => {
                        self.add("PDB: Check ATOM/HETATM record formatting (columns 1-80)");
                    }
                    Format::Mmcif => {
                        self.add("mmCIF: Verify loop structure and data alignment");
                    }
                }
            }

            IoError::ChainTooLong { chain, .. } => {
                self.add(format!("Chain '{}' does not fit the PDB chain column", chain));
                self.add("Only tools that read PDB need a rewritten structure");
                self.add("Run `radapt tools` to see which tools pack chains");
            }

            IoError::FieldOverflow { field, .. } => {
                self.add(format!("A {} value is too wide for fixed-column PDB", field));
                self.add("Prepare for a tool that renumbers residues, or trim the value");
            }

            IoError::MissingModel(model) => {
                self.add(format!("The input has no MODEL {} record", model));
                self.add("Omit --model to read the first model");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Ensure you have read/write access as needed");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or non-UTF-8 data");
                self.add("Verify the file is not truncated or corrupted");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe: output consumer terminated");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("Input appears to be from a terminal");
            self.add("Provide input via -i/--input or pipe data to stdin");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("--structure") {
            self.add("Pass the PDB file written by `radapt prepare` for this tool");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}
