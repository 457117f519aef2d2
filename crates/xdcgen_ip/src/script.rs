//! IP script types and assembly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use xdcgen_document::{Container, Document, Section};

/// File name of the generated IP script.
pub const IP_TCL_FILE: &str = "ip.tcl";

/// A set of IP blocks to generate for one part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpSpec {
    /// Target device part, e.g. `xc7a35ticsg324-1L`.
    pub part: String,
    /// Blocks in generation order.
    #[serde(default)]
    pub blocks: Vec<IpBlock>,
}

/// One IP instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpBlock {
    /// Module name of the generated IP.
    pub name: String,
    /// Vendor:library:name:version identifier of the IP core.
    pub vlnv: String,
    /// `CONFIG.*` properties, applied in order.
    #[serde(default)]
    pub properties: Vec<IpProperty>,
}

/// A single `CONFIG.<name>` assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpProperty {
    /// Property name without the `CONFIG.` prefix.
    pub name: String,
    /// Property value, emitted verbatim.
    pub value: String,
}

impl IpBlock {
    fn get_ips(&self) -> String {
        format!("[get_ips {}]", self.name)
    }

    fn section(&self) -> Section {
        let mut section = Section::new(format!("{}: {}", self.name, self.vlnv));
        section.add_line(format!(
            "create_ip -vlnv {} -module_name {}",
            self.vlnv, self.name
        ));
        for prop in &self.properties {
            section.add_line(format!(
                "set_property CONFIG.{} {} {}",
                prop.name,
                prop.value,
                self.get_ips()
            ));
        }
        section.add_line(format!("generate_target all {}", self.get_ips()));
        section.add_line(format!("synth_ip {}", self.get_ips()));
        section.add_line(format!("report_property {}", self.get_ips()));
        section
    }
}

/// Builds the IP generation script for `spec` at `path`.
pub fn build_ip_document(spec: &IpSpec, path: impl Into<PathBuf>) -> Document {
    let mut doc = Document::new(path, "#");
    doc.add_line(format!("set_part {}", spec.part));
    for block in &spec.blocks {
        doc.add_child(block.section());
    }
    doc
}
