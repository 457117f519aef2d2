//! Timing constraint generation for Vivado.
//!
//! This crate models a design's timing intent (primary and generated clocks,
//! I/O delays, clock groups and false paths) and assembles it into an XDC
//! document. Values may be declared in any supported time unit; they are
//! translated to nanoseconds and every translation is reported.
//!
//! # Usage
//!
//! ```ignore
//! use xdcgen_timing::{build_timing_document, TimingOptions, TimingSpec};
//!
//! let options = TimingOptions::vivado("ps");
//! let doc = build_timing_document(&spec, &options, "build/timing.xdc", &sink)?;
//! DocumentWriter::new(false).write_and_report(&doc, &sink)?;
//! ```
//!
//! # Architecture
//!
//! - [`constraints`]: timing constraint types (clocks, I/O delays, exceptions)
//! - [`xdc`]: XDC section assembly
//! - [`error`]: fatal generation errors

#![warn(missing_docs)]

pub mod constraints;
pub mod error;
pub mod xdc;

pub use constraints::{
    ClockDefinition, ClockEdge, ClockGroup, ClockGroupRelation, DelayConstraint, DelayDirection,
    EndpointKind, FalsePath, GeneratedClock, ObjectKind, PathEndpoint, PrimaryClock, TimingSpec,
};
pub use error::GenerateError;
pub use xdc::{
    build_timing_document, TimingOptions, UnderspecifiedClockPolicy, XdcAssembler,
    CLOCK_UNIT_TRANSLATED, DELAY_UNIT_TRANSLATED, EDGE_SHIFT_MISMATCH,
    GENERATED_CLOCK_UNDERSPECIFIED, TIMING_XDC_FILE, VIVADO_TIME_UNIT, XDC_COMMENT_MARKER,
};
