//! Configuration types deserialized from `xdcgen.toml`.

use serde::Deserialize;
use xdcgen_ip::IpSpec;
use xdcgen_timing::{TimingSpec, UnderspecifiedClockPolicy};

/// The top-level generator configuration parsed from `xdcgen.toml`.
///
/// Timing constraint tables (`primary_clocks`, `generated_clocks`, `delays`,
/// `clock_groups`, `false_paths`) live at the top level of the file.
#[derive(Debug, Default, Deserialize)]
pub struct GeneratorConfig {
    /// Units values are declared in.
    #[serde(default)]
    pub units: UnitConfig,
    /// Output settings.
    #[serde(default)]
    pub generate: GenerateConfig,
    /// Timing constraints.
    #[serde(flatten)]
    pub timing: TimingSpec,
    /// IP blocks to generate, if any.
    #[serde(default)]
    pub ip: Option<IpSpec>,
}

/// Declared units of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitConfig {
    /// Time unit (`us`, `ns` or `ps`).
    #[serde(default = "default_time_unit")]
    pub time: String,
    /// Capacitance unit (`nf`, `pf` or `ff`).
    #[serde(default = "default_capacitance_unit")]
    pub capacitance: String,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            time: default_time_unit(),
            capacitance: default_capacitance_unit(),
        }
    }
}

fn default_time_unit() -> String {
    "ns".to_string()
}

fn default_capacitance_unit() -> String {
    "pf".to_string()
}

/// Where and how generated files are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateConfig {
    /// Output directory, relative to the configuration directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Replace files that already exist.
    #[serde(default)]
    pub overwrite: bool,
    /// Handling of generated clocks without a definition mode.
    #[serde(default)]
    pub underspecified_clocks: UnderspecifiedClockPolicy,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            overwrite: false,
            underspecified_clocks: UnderspecifiedClockPolicy::default(),
        }
    }
}

fn default_output_dir() -> String {
    "build".to_string()
}
