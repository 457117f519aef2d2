//! `xdcgen timing`: timing constraints generation.
//!
//! 1. Find and load the configuration file
//! 2. Resolve the output path of `timing.xdc`
//! 3. Assemble the constraint document
//! 4. Write it (or print it on `--dry-run`)
//! 5. Render diagnostics

use xdcgen_diagnostics::DiagnosticSink;
use xdcgen_timing::{build_timing_document, TIMING_XDC_FILE};

use crate::pipeline::{emit_document, finish, output_path, resolve_config};
use crate::{GlobalArgs, TimingArgs};

/// Runs the `xdcgen timing` command.
///
/// Returns exit code 0 if no errors were reported, 1 otherwise. Fatal
/// generation errors are returned after pending diagnostics are rendered.
pub fn run(args: &TimingArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let source = resolve_config(global)?;
    let config = source.load()?;
    let options = xdcgen_config::timing_options(&config, args.strict);
    let path = output_path(&source.dir, &config, &args.output, TIMING_XDC_FILE)?;

    if global.verbose {
        eprintln!(
            "   Generating {} ({} clocks, {} delays, declared in {})",
            path.display(),
            config.timing.clock_count(),
            config.timing.delays.len(),
            options.declared_time
        );
    }

    let sink = DiagnosticSink::new();
    let doc = match build_timing_document(&config.timing, &options, &path, &sink) {
        Ok(doc) => doc,
        Err(e) => {
            finish(&sink, &args.output, global);
            return Err(e.into());
        }
    };
    emit_document(&doc, &config, &args.output, &sink)?;
    Ok(finish(&sink, &args.output, global))
}
