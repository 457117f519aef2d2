//! Resolution of configuration values into generator inputs.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;
use std::path::{Path, PathBuf};
use xdcgen_timing::{TimingOptions, UnderspecifiedClockPolicy};

/// Builds the timing assembly options for a configuration.
///
/// `strict` forces the deny policy for underspecified generated clocks
/// regardless of the configured one.
pub fn timing_options(config: &GeneratorConfig, strict: bool) -> TimingOptions {
    let policy = if strict {
        UnderspecifiedClockPolicy::Deny
    } else {
        config.generate.underspecified_clocks
    };
    TimingOptions::vivado(config.units.time.clone()).with_policy(policy)
}

/// Resolves the output directory to an absolute, existing path.
///
/// `requested` overrides the configured directory. Relative paths are taken
/// relative to `config_dir`. The directory is created if missing.
pub fn resolve_output_dir(
    config_dir: &Path,
    config: &GeneratorConfig,
    requested: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let dir = requested
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.generate.output_dir));
    let dir = if dir.is_absolute() {
        dir
    } else {
        config_dir.join(dir)
    };
    std::fs::create_dir_all(&dir)
        .and_then(|()| dir.canonicalize())
        .map_err(|source| ConfigError::OutputDir { path: dir, source })
}
