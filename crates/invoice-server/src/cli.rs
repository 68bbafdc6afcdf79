//! CLI argument definitions for the invoice forms gateway.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use invoice_server::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(
    name = "invoice-forms",
    version,
    about = "Invoice and client form gateway for Invoice Ninja",
    long_about = "Validates invoice and client form submissions against JSON schemas,\n\
                  reshapes them for the Invoice Ninja API and forwards them.\n\n\
                  Use `check-invoice` / `check-client` to run the pipeline offline."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Include client emails and names in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP gateway.
    Serve(ServeArgs),

    /// Validate and normalize an invoice JSON file without sending it.
    CheckInvoice(CheckArgs),

    /// Validate and normalize a client JSON file without sending it.
    CheckClient(CheckArgs),
}

#[derive(Parser)]
pub struct ServeArgs {
    /// Configuration file.
    #[arg(long = "config", value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Listen address (overrides the config file and INVOICE_FORMS_BIND).
    #[arg(long = "bind", value_name = "ADDR")]
    pub bind: Option<String>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// JSON file holding the submission.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Configuration file, read for custom schema paths.
    #[arg(long = "config", value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
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
