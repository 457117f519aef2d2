//! Vivado IP generation scripts.
//!
//! An [`IpSpec`] names a target part and a list of IP blocks. Each block is
//! rendered as its own section of a Tcl script that creates, configures,
//! generates and synthesizes the IP.

#![warn(missing_docs)]

pub mod script;

pub use script::{build_ip_document, IpBlock, IpProperty, IpSpec, IP_TCL_FILE};
