//! Configuration errors.

use std::path::PathBuf;

/// Why an `xdcgen.toml` could not be turned into a [`GeneratorConfig`](crate::GeneratorConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file that was opened.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created or resolved.
    #[error("cannot prepare output directory {}: {source}", path.display())]
    OutputDir {
        /// The directory as requested, before canonicalization.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML, or a value of the wrong shape.
    #[error("malformed configuration: {0}")]
    Parse(String),

    /// A field the generators need was left empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Well-formed but unusable values: unknown units, duplicate clocks, bad periods.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
