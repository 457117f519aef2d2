//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;
use std::collections::BTreeSet;
use std::path::Path;
use xdcgen_common::UnitTable;
use xdcgen_timing::TimingSpec;

/// File name of the generator configuration.
pub const CONFIG_FILE_NAME: &str = "xdcgen.toml";

/// Loads and validates the `xdcgen.toml` in `config_dir`.
pub fn load_config(config_dir: &Path) -> Result<GeneratorConfig, ConfigError> {
    load_config_file(&config_dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file of any name.
pub fn load_config_file(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates an `xdcgen.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates units, clock definitions, clock groups and the IP section.
fn validate_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    let time = UnitTable::time();
    check_unit(&time, &config.units.time, "units.time")?;
    check_unit(
        &UnitTable::capacitance(),
        &config.units.capacitance,
        "units.capacitance",
    )?;
    validate_timing(&config.timing, &time)?;

    if let Some(ip) = &config.ip {
        if ip.part.is_empty() {
            return Err(ConfigError::MissingField("ip.part".to_string()));
        }
        for block in &ip.blocks {
            if block.name.is_empty() {
                return Err(ConfigError::MissingField("ip.blocks.name".to_string()));
            }
            if block.vlnv.is_empty() {
                return Err(ConfigError::MissingField(format!(
                    "ip.blocks.{}.vlnv",
                    block.name
                )));
            }
        }
    }
    Ok(())
}

fn validate_timing(timing: &TimingSpec, time: &UnitTable) -> Result<(), ConfigError> {
    let mut names = BTreeSet::new();
    for clk in &timing.primary_clocks {
        if clk.name.is_empty() {
            return Err(ConfigError::MissingField("primary_clocks.name".to_string()));
        }
        if !names.insert(clk.name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "duplicate primary clock '{}'",
                clk.name
            )));
        }
        if clk.period <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "clock '{}' period must be positive",
                clk.name
            )));
        }
        if let Some(unit) = &clk.unit {
            check_unit(time, unit, &format!("primary_clocks.{}.unit", clk.name))?;
        }
        if let Some(waveform) = &clk.waveform {
            if waveform.len() % 2 != 0 {
                return Err(ConfigError::Invalid(format!(
                    "clock '{}' waveform must list an even number of edges",
                    clk.name
                )));
            }
        }
    }

    for clk in &timing.generated_clocks {
        if clk.name.is_empty() {
            return Err(ConfigError::MissingField(
                "generated_clocks.name".to_string(),
            ));
        }
        if let Some(unit) = &clk.unit {
            check_unit(time, unit, &format!("generated_clocks.{}.unit", clk.name))?;
        }
        if clk.multiplier == Some(0) || clk.divisor == Some(0) {
            return Err(ConfigError::Invalid(format!(
                "generated clock '{}' multiplier and divisor must be positive",
                clk.name
            )));
        }
    }

    for group in &timing.clock_groups {
        if group.groups.is_empty() || group.groups.iter().any(Vec::is_empty) {
            return Err(ConfigError::Invalid(format!(
                "clock group '{}' must list at least one clock in every group",
                group.name
            )));
        }
    }
    Ok(())
}

fn check_unit(table: &UnitTable, unit: &str, field: &str) -> Result<(), ConfigError> {
    if table.contains(unit) {
        return Ok(());
    }
    Err(ConfigError::Invalid(format!(
        "{field}: unknown {} unit '{unit}' (expected one of: {})",
        table.quantity(),
        table.labels().collect::<Vec<_>>().join(", ")
    )))
}
