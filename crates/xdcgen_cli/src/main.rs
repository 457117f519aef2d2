//! xdcgen CLI: generates Vivado constraint and IP scripts from `xdcgen.toml`.
//!
//! Provides `xdcgen timing` for the timing constraints file (`timing.xdc`) and
//! `xdcgen ip` for the IP generation script (`ip.tcl`).

#![warn(missing_docs)]

mod ip;
mod pipeline;
mod timing;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// xdcgen: Vivado constraint file generator.
#[derive(Parser, Debug)]
#[command(name = "xdcgen", version, about = "Vivado XDC and IP script generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `xdcgen.toml` file or its directory.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the timing constraints file.
    Timing(TimingArgs),
    /// Generate the IP creation script.
    Ip(OutputArgs),
}

/// Options shared by every generating command.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory (overrides `generate.output_dir`).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Replace existing files.
    #[arg(long)]
    pub force: bool,

    /// Print the generated text instead of writing it.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `xdcgen timing` subcommand.
#[derive(Args, Debug, Clone)]
pub struct TimingArgs {
    /// Output options.
    #[command(flatten)]
    pub output: OutputArgs,

    /// Fail on generated clocks with no edges, multiplier or divisor.
    #[arg(long)]
    pub strict: bool,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => atty_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Timing(ref args) => timing::run(args, &global),
        Command::Ip(ref args) => ip::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Rough terminal detection from the TERM env var.
fn atty_is_terminal() -> bool {
    std::env::var("TERM").is_ok()
}
