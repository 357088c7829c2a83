//! The `doctool` command-line tool.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use doctool_cli::{Manifest, load_config, render, run};
use doctool_core::{TracingFormat, TracingSetup};
use doctool_schema::{Converter, ConverterConfig, LogLevel};
use std::io::Write;
use std::path::PathBuf;
use tracing::Level;

/// Convert documented callables into JSON Schema tool definitions
#[derive(Parser, Debug)]
#[command(name = "doctool", version, long_about = None)]
struct Args {
    /// Manifest file listing the targets to convert
    manifest: PathBuf,

    /// Converter configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Report failing targets on stderr and continue with the rest
    #[arg(long)]
    keep_going: bool,

    /// Converter log level (overrides the config file)
    #[arg(long, value_enum)]
    log_level: Option<LogLevelArg>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Compact)]
    log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevelArg {
    Silent,
    Warn,
    Debug,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Silent => Self::Silent,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for TracingFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ConverterConfig::default(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level.into();
    }
    if args.pretty {
        config.pretty = true;
    }

    let level = match config.log_level {
        LogLevel::Silent => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Debug => Level::DEBUG,
    };
    TracingSetup::new()
        .with_level(level)
        .with_format(args.log_format.into())
        .init();

    let manifest = Manifest::load(&args.manifest)?;
    let converter = Converter::new(config);
    let schemas = run(&manifest, &converter, args.keep_going, std::io::stderr().lock())?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", render(&schemas, converter.config().pretty)?)?;
    Ok(())
}
