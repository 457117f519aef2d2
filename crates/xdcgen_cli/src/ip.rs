//! `xdcgen ip`: IP generation script.

use xdcgen_diagnostics::DiagnosticSink;
use xdcgen_ip::{build_ip_document, IP_TCL_FILE};

use crate::pipeline::{emit_document, finish, output_path, resolve_config};
use crate::{GlobalArgs, OutputArgs};

/// Runs the `xdcgen ip` command.
///
/// Fails if the configuration has no `[ip]` section.
pub fn run(args: &OutputArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let source = resolve_config(global)?;
    let config = source.load()?;
    let Some(ip) = &config.ip else {
        return Err(format!("no [ip] section in {}", source.file.display()).into());
    };
    let path = output_path(&source.dir, &config, args, IP_TCL_FILE)?;

    if global.verbose {
        eprintln!(
            "   Generating {} ({} blocks for {})",
            path.display(),
            ip.blocks.len(),
            ip.part
        );
    }

    let sink = DiagnosticSink::new();
    let doc = build_ip_document(ip, &path);
    emit_document(&doc, &config, args, &sink)?;
    Ok(finish(&sink, args, global))
}
