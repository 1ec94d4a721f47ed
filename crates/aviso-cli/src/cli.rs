//! CLI argument definitions for the aviso master sheet generator.

use std::path::PathBuf;

use aviso_ingest::default_rules_path;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aviso-master-sheet",
    version,
    about = "Generate aviso automático master sheets (CSV, XLSX, JSON) from YAML rules",
    long_about = "Generate aviso automático master sheets (CSV, XLSX, JSON) from YAML rules.\n\n\
                  Without a subcommand the rules file is flattened into master_sheet.csv,\n\
                  master_sheet.xlsx and master_sheet.json inside the output directory.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the industries, or show one industry's fractions with --industry.
    Industries(IndustriesArgs),

    /// Check whether a tariff fraction requires an automatic notice.
    Lookup(LookupArgs),

    /// Export one industry's entries as catalogo_<KEY>.json.
    ExportIndustry(ExportIndustryArgs),
}

#[derive(Args)]
pub struct RulesArgs {
    /// Path to the YAML rules file (default: $AVISO_RULES_PATH or config/dof_aviso_rules.yaml).
    #[arg(long = "rules", value_name = "PATH", default_value_os_t = default_rules_path())]
    pub rules: PathBuf,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub rules: RulesArgs,

    /// Directory where the generated files are written.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Skip XLSX generation.
    #[arg(long = "no-xlsx")]
    pub no_xlsx: bool,

    /// Skip JSON generation.
    #[arg(long = "no-json")]
    pub no_json: bool,

    /// Skip CSV generation.
    #[arg(long = "no-csv")]
    pub no_csv: bool,
}

#[derive(Args)]
pub struct IndustriesArgs {
    #[command(flatten)]
    pub rules: RulesArgs,

    /// Show the summary and fractions of one industry.
    #[arg(long = "industry", value_name = "KEY")]
    pub industry: Option<String>,
}

#[derive(Args)]
pub struct LookupArgs {
    #[command(flatten)]
    pub rules: RulesArgs,

    /// Industry key to search in.
    #[arg(long = "industry", value_name = "KEY")]
    pub industry: String,

    /// Tariff fraction; dots and spaces are ignored.
    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Args)]
pub struct ExportIndustryArgs {
    #[command(flatten)]
    pub rules: RulesArgs,

    /// Industry key to export.
    #[arg(long = "industry", value_name = "KEY")]
    pub industry: String,

    /// Directory where the catalog file is written.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
