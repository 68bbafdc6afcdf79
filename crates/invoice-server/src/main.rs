//! Invoice forms gateway CLI.

use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use invoice_schema::SchemaSet;
use invoice_server::check::{CheckReport, check_client, check_invoice};
use invoice_server::logging::{LogConfig, LogFormat, init_logging};
use invoice_server::{AppConfig, serve};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{CheckArgs, Cli, Command, LogFormatArg, LogLevelArg, ServeArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Serve(args) => match run_serve(args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::CheckInvoice(args) => run_check(&args, check_invoice),
        Command::CheckClient(args) => run_check(&args, check_client),
    };
    std::process::exit(exit_code);
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = AppConfig::load(&args.config)?;
    config.apply_env();
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(serve(&config))
}

/// Runs an offline check and prints the report as JSON. Exit code 1 when the
/// submission is rejected or the file is unusable.
fn run_check<F, E>(args: &CheckArgs, check: F) -> i32
where
    F: FnOnce(&Path, &SchemaSet) -> std::result::Result<CheckReport, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let result = load_schemas(&args.config).and_then(|schemas| {
        let report = check(&args.file, &schemas)?;
        let rendered = serde_json::to_string_pretty(&report)?;
        Ok((report.is_accepted(), rendered))
    });
    match result {
        Ok((accepted, rendered)) => {
            println!("{rendered}");
            if accepted { 0 } else { 1 }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

fn load_schemas(config_path: &Path) -> Result<SchemaSet> {
    let config = AppConfig::load(config_path)?;
    SchemaSet::load(&config.schemas).context("failed to load form schemas")
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
