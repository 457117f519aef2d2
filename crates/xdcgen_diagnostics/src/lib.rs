//! Diagnostic creation, severity management, and terminal rendering.
//!
//! This crate provides structured [`Diagnostic`] messages with severity levels,
//! codes, notes and help text. The thread-safe [`DiagnosticSink`] is the logging
//! collaborator every generator reports into: unit conversion advisories,
//! underspecified clocks, and file materialization outcomes all end up here.
//! [`TerminalRenderer`] formats them for human consumption.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode, ParseCodeError};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
