//! Shared foundational types used across the xdcgen constraint generator.
//!
//! This crate provides unit tables and the unit converter that normalizes
//! declared physical quantities (time, capacitance) into the base units a
//! vendor tool expects.

#![warn(missing_docs)]

pub mod units;

pub use units::{round_to_precision, Conversion, Quantity, UnitTable, UnknownUnitError};
