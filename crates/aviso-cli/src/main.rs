//! Aviso automático master sheet generator.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use aviso_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use aviso_cli::commands::{run_export_industry, run_generate, run_industries, run_lookup};
use aviso_cli::logging::{LogConfig, LogFormat, init_logging};
use aviso_cli::pipeline::EXIT_FAILURE;
use aviso_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FAILURE);
    }
    let exit_code = match &cli.command {
        None => match run_generate(&cli.generate) {
            Ok(result) => {
                print_summary(&result);
                0
            }
            Err(error) => {
                if error.is_configuration() {
                    eprintln!("configuration error: {error}");
                } else {
                    eprintln!("error: {error}");
                }
                error.exit_code()
            }
        },
        Some(Command::Industries(args)) => report(run_industries(args)),
        Some(Command::Lookup(args)) => report(run_lookup(args)),
        Some(Command::ExportIndustry(args)) => report(run_export_industry(args).map(|path| {
            println!("Wrote {}", path.display());
            true
        })),
    };
    std::process::exit(exit_code);
}

fn report(result: anyhow::Result<bool>) -> i32 {
    match result {
        Ok(true) => 0,
        Ok(false) => EXIT_FAILURE,
        Err(error) => {
            eprintln!("error: {error:#}");
            EXIT_FAILURE
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_ansi(ansi)
        .with_timestamps(cli.log_file.is_some())
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config
}
