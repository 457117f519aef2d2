//! Parsing and validation of `xdcgen.toml` configuration files.
//!
//! This crate reads the generator configuration file and produces a strongly-typed
//! [`GeneratorConfig`]: declared units, generation settings, the timing constraint
//! set and an optional IP block list.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{resolve_output_dir, timing_options};
pub use types::*;
