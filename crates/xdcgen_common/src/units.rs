//! Unit tables and conversion into tool-canonical base units.
//!
//! A [`UnitTable`] maps each recognized unit label of one physical
//! [`Quantity`] to its multiplier against an absolute base (nanoseconds for
//! time, picofarads for capacitance). Tables are plain data so several unit
//! systems can coexist; nothing here is global.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of fractional decimal digits kept after a conversion.
pub const CONVERSION_PRECISION: i32 = 10;

/// The physical quantity a unit table describes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Time, based on nanoseconds.
    Time,
    /// Capacitance, based on picofarads.
    Capacitance,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Time => write!(f, "time"),
            Quantity::Capacitance => write!(f, "capacitance"),
        }
    }
}

/// A unit label that is not present in the table it was looked up in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {quantity} unit '{unit}'")]
pub struct UnknownUnitError {
    /// The unrecognized unit label.
    pub unit: String,
    /// The quantity of the table that was searched.
    pub quantity: Quantity,
}

/// The result of converting a value between two units.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The value expressed in the canonical unit.
    pub value: f64,
    /// A human-readable note describing the conversion, present only when
    /// the declared and canonical units differ.
    pub advisory: Option<String>,
}

/// Multipliers for every recognized unit of a single quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTable {
    quantity: Quantity,
    multipliers: BTreeMap<String, f64>,
}

impl UnitTable {
    /// Creates an empty table for the given quantity.
    pub fn new(quantity: Quantity) -> Self {
        Self {
            quantity,
            multipliers: BTreeMap::new(),
        }
    }

    /// The standard time table: `us`, `ns`, `ps`, relative to nanoseconds.
    pub fn time() -> Self {
        Self::new(Quantity::Time)
            .with_unit("us", 1e3)
            .with_unit("ns", 1.0)
            .with_unit("ps", 1e-3)
    }

    /// The standard capacitance table: `nf`, `pf`, `ff`, relative to picofarads.
    pub fn capacitance() -> Self {
        Self::new(Quantity::Capacitance)
            .with_unit("nf", 1e3)
            .with_unit("pf", 1.0)
            .with_unit("ff", 1e-3)
    }

    /// Adds (or replaces) a unit label with its multiplier against the base.
    pub fn with_unit(mut self, label: impl Into<String>, multiplier: f64) -> Self {
        self.multipliers.insert(label.into(), multiplier);
        self
    }

    /// Returns the quantity this table describes.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns `true` if `unit` is a recognized label.
    pub fn contains(&self, unit: &str) -> bool {
        self.multipliers.contains_key(unit)
    }

    /// Iterates over the recognized unit labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.multipliers.keys().map(String::as_str)
    }

    /// Returns the multiplier of `unit` against the absolute base.
    pub fn multiplier(&self, unit: &str) -> Result<f64, UnknownUnitError> {
        self.multipliers
            .get(unit)
            .copied()
            .ok_or_else(|| UnknownUnitError {
                unit: unit.to_string(),
                quantity: self.quantity,
            })
    }

    /// Converts `value` from `declared` units into `canonical` units.
    ///
    /// Identical units return `value` untouched with no advisory. Otherwise
    /// the scaled value is rounded to [`CONVERSION_PRECISION`] fractional
    /// digits and an advisory names both the declared and converted values.
    pub fn convert(
        &self,
        value: f64,
        declared: &str,
        canonical: &str,
    ) -> Result<Conversion, UnknownUnitError> {
        let from = self.multiplier(declared)?;
        let to = self.multiplier(canonical)?;
        if declared == canonical {
            return Ok(Conversion {
                value,
                advisory: None,
            });
        }
        let scaled = round_to_precision(value * from / to);
        Ok(Conversion {
            value: scaled,
            advisory: Some(format!(
                "{value} {declared} translated to {scaled} {canonical}"
            )),
        })
    }
}

/// Rounds `value` to [`CONVERSION_PRECISION`] fractional decimal digits.
pub fn round_to_precision(value: f64) -> f64 {
    let scale = 10f64.powi(CONVERSION_PRECISION);
    (value * scale).round() / scale
}
