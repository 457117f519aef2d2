//! Shared pipeline helpers for CLI commands.
//!
//! Contains the steps common to `timing` and `ip`: configuration discovery,
//! output path resolution, writing or printing a document, and diagnostic
//! rendering.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use xdcgen_config::{ConfigError, GeneratorConfig, CONFIG_FILE_NAME};
use xdcgen_diagnostics::{DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use xdcgen_document::{Document, DocumentWriter};

use crate::{GlobalArgs, OutputArgs, ReportFormat};

/// Finds the configuration directory by walking up from `start`.
///
/// Returns the first directory containing `xdcgen.toml`.
pub fn find_config_dir(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// The configuration file a command reads, and the directory it anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// Base for relative output directories.
    pub dir: PathBuf,
    /// The file to parse.
    pub file: PathBuf,
}

impl ConfigSource {
    fn in_dir(dir: PathBuf) -> Self {
        let file = dir.join(CONFIG_FILE_NAME);
        Self { dir, file }
    }

    /// Parses and validates the configuration file.
    pub fn load(&self) -> Result<GeneratorConfig, ConfigError> {
        xdcgen_config::load_config_file(&self.file)
    }
}

/// Resolves the configuration source from global CLI args.
///
/// `--config` may name a file of any name, whose parent becomes the base
/// directory, or a directory holding `xdcgen.toml`. Without it the current
/// directory and its parents are searched.
pub fn resolve_config(global: &GlobalArgs) -> Result<ConfigSource, Box<dyn std::error::Error>> {
    let Some(config_path) = &global.config else {
        let dir = find_config_dir(&std::env::current_dir()?)?;
        return Ok(ConfigSource::in_dir(dir));
    };
    let p = PathBuf::from(config_path);
    if p.is_dir() {
        return Ok(ConfigSource::in_dir(p));
    }
    let dir = p
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok(ConfigSource { dir, file: p })
}

/// Computes the destination path of `file_name`.
///
/// Outside a dry run the output directory is created and canonicalized.
pub fn output_path(
    config_dir: &Path,
    config: &GeneratorConfig,
    args: &OutputArgs,
    file_name: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if args.dry_run {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.generate.output_dir));
        return Ok(config_dir.join(dir).join(file_name));
    }
    let dir = xdcgen_config::resolve_output_dir(config_dir, config, args.output_dir.as_deref())?;
    Ok(dir.join(file_name))
}

/// Writes `doc`, or prints it to stdout on a dry run.
///
/// `--force` and `generate.overwrite` both allow replacing an existing file.
pub fn emit_document(
    doc: &Document,
    config: &GeneratorConfig,
    args: &OutputArgs,
    sink: &DiagnosticSink,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.dry_run {
        print!("{}", doc.render());
        return Ok(());
    }
    let writer = DocumentWriter::new(args.force || config.generate.overwrite);
    writer.write_and_report(doc, sink)?;
    Ok(())
}

/// Renders every diagnostic in `sink` and returns the process exit code.
///
/// The exit code is 1 once any error was emitted, 0 otherwise.
pub fn finish(sink: &DiagnosticSink, args: &OutputArgs, global: &GlobalArgs) -> i32 {
    if let Err(e) = report(sink, args, global, &mut io::stdout(), &mut io::stderr()) {
        eprintln!("error: cannot write diagnostics: {e}");
    }
    match sink.worst() {
        Some(worst) if worst.is_error() => 1,
        _ => 0,
    }
}

/// Drains `sink` into `out` or `err`.
///
/// Text always goes to `err`; in quiet mode only errors are printed. The JSON
/// report goes to `out`, except on a dry run where `out` carries the script.
fn report(
    sink: &DiagnosticSink,
    args: &OutputArgs,
    global: &GlobalArgs,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    let diagnostics = sink.take_all();
    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                if global.quiet && !diag.severity.is_error() {
                    continue;
                }
                if diag.severity < Severity::Note && !global.verbose {
                    continue;
                }
                writeln!(err, "{}", renderer.render(diag))?;
            }
            if !global.quiet {
                writeln!(
                    err,
                    "   Result: {} error(s), {} warning(s)",
                    sink.error_count(),
                    sink.warning_count()
                )?;
            }
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&diagnostics).map_err(io::Error::other)?;
            let target: &mut dyn Write = if args.dry_run { err } else { out };
            writeln!(target, "{json}")?;
        }
    }
    Ok(())
}
