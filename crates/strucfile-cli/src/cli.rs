use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;
use strucfile::engine::passes::Stage;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "strucfile - inspect and normalize fixed-column molecular structure files (PDB-style ATOM/HETATM records).",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a structure file: canonical residue names, no hydrogens, ions or water,
    /// current atom naming and dense serials.
    Clean(CleanArgs),
    /// Describe a structure file without changing it.
    Info(InfoArgs),
}

/// A named set of stages to start from.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Run no stage at all.
    None,
    /// The standard RNA cleanup.
    RnaCleanup,
    /// The RNA cleanup followed by conversion to DNA residue names.
    DnaCleanup,
}

/// Arguments for the `clean` subcommand.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Path to the input structure file (PDB, or mol2 when Open Babel is available).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the cleaned output structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start from this preset instead of the one in the config file (default: rna-cleanup).
    #[arg(short, long, value_enum, value_name = "PRESET")]
    pub preset: Option<Preset>,

    /// Convert residue naming to DNA after cleaning.
    #[arg(long)]
    pub dna: bool,

    /// Enable a stage on top of the preset. Can be used multiple times.
    #[arg(short, long = "enable", value_name = "STAGE")]
    pub enable: Vec<Stage>,

    /// Disable a stage of the preset. Can be used multiple times.
    #[arg(short, long = "disable", value_name = "STAGE")]
    pub disable: Vec<Stage>,

    /// Path or name of the Open Babel executable used to convert mol2 input.
    #[arg(long, value_name = "PROGRAM")]
    pub obabel: Option<PathBuf>,

    /// Never convert mol2 input.
    #[arg(long)]
    pub no_convert: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S passes.remove-water=false
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the structure file to describe.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Convert mol2 input with Open Babel before describing it.
    #[arg(long)]
    pub convert: bool,

    /// Path or name of the Open Babel executable.
    #[arg(long, value_name = "PROGRAM")]
    pub obabel: Option<PathBuf>,
}
