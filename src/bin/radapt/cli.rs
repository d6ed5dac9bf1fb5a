use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rna_adapters::ToolKind;

#[derive(Parser)]
#[command(
    name = "radapt",
    about = "Unify RNA base-interaction annotations across analysis tools",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RADAPT_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rewrite a PDB or mmCIF structure into the form an analysis tool can read
    #[command(visible_alias = "p")]
    Prepare(PrepareArgs),

    /// Translate raw tool output into canonical interactions (JSON)
    #[command(visible_alias = "u")]
    Unify(UnifyArgs),

    /// List supported tools and what each requires
    #[command(visible_alias = "t")]
    Tools,
}

/// I/O options shared by the prepare and unify commands.
#[derive(Args)]
pub struct IoOptions {
    /// Input file (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Analysis settings shared by the prepare and unify commands.
#[derive(Args)]
#[command(next_help_heading = "Analysis Options")]
pub struct ConfigOptions {
    /// TOML file with chain-alphabet and conflict-policy settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Symbols assigned, in order, to packed chains
    #[arg(long = "chain-alphabet", value_name = "SYMBOLS")]
    pub chain_alphabet: Option<String>,

    /// Survivor when one residue pair carries two classifications
    #[arg(long = "conflict-policy", value_name = "POLICY")]
    pub conflict_policy: Option<ConflictPolicy>,
}

#[derive(Args)]
pub struct PrepareArgs {
    /// Tool the structure will be submitted to (see `radapt tools`)
    #[arg(value_name = "TOOL")]
    pub tool: ToolKind,

    #[command(flatten)]
    pub io: IoOptions,

    /// Input structure format (inferred from the file extension, PDB for stdin)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<StructureFormat>,

    /// Where to write the restore tables (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub tables: PathBuf,

    /// Model to extract from multi-model input
    #[arg(short, long, value_name = "N")]
    pub model: Option<u32>,

    #[command(flatten)]
    pub config: ConfigOptions,
}

#[derive(Args)]
pub struct UnifyArgs {
    /// Tool that produced the raw output; the input is its report (the basepair JSON for
    /// BPNet)
    #[arg(value_name = "TOOL")]
    pub tool: ToolKind,

    #[command(flatten)]
    pub io: IoOptions,

    /// BPNet overlap (.rob) report
    #[arg(long, value_name = "FILE")]
    pub overlaps: Option<PathBuf>,

    /// The prepared structure the tool was run on (PDB)
    #[arg(short, long, value_name = "FILE")]
    pub structure: Option<PathBuf>,

    /// Restore tables written by `radapt prepare`
    #[arg(short, long, value_name = "FILE")]
    pub tables: Option<PathBuf>,

    /// Output JSON layout
    #[arg(long, value_name = "STYLE", default_value = "pretty")]
    pub json: JsonStyle,

    #[command(flatten)]
    pub config: ConfigOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StructureFormat {
    Pdb,
    #[value(alias = "cif")]
    Mmcif,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConflictPolicy {
    /// Later report replaces the earlier one
    LastWins,
    /// Earlier report is kept
    FirstWins,
    /// Both classifications are kept
    KeepAll,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum JsonStyle {
    #[default]
    Pretty,
    Compact,
}

pub fn parse() -> Cli {
    Cli::parse()
}
