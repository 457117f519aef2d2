//! Timing constraint types consumed by the XDC assembler.
//!
//! This module defines the data structures that describe a design's timing
//! intent: primary and generated clocks, input/output delays, clock groups
//! and false paths. They are read-only input, deserialized once per run from
//! the generator configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete set of timing constraints for one timing XDC file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingSpec {
    /// Clocks defined with `create_clock`.
    #[serde(default)]
    pub primary_clocks: Vec<PrimaryClock>,
    /// Clocks derived from another clock with `create_generated_clock`.
    #[serde(default)]
    pub generated_clocks: Vec<GeneratedClock>,
    /// Input and output delay constraints, in declaration order.
    #[serde(default)]
    pub delays: Vec<DelayConstraint>,
    /// Clock group relations (`set_clock_groups`).
    #[serde(default)]
    pub clock_groups: Vec<ClockGroup>,
    /// False path exceptions (`set_false_path`).
    #[serde(default)]
    pub false_paths: Vec<FalsePath>,
}

impl TimingSpec {
    /// Creates an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the primary clock with the given name, if any.
    pub fn find_clock(&self, name: &str) -> Option<&PrimaryClock> {
        self.primary_clocks.iter().find(|c| c.name == name)
    }

    /// Returns the number of primary and generated clocks.
    pub fn clock_count(&self) -> usize {
        self.primary_clocks.len() + self.generated_clocks.len()
    }

    /// Iterates over the delays with the given direction, in declaration order.
    pub fn delays_in(&self, direction: DelayDirection) -> impl Iterator<Item = &DelayConstraint> {
        self.delays.iter().filter(move |d| d.direction == direction)
    }
}

/// The kind of design object a clock is attached to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A top-level port.
    Port,
    /// A cell pin, searched hierarchically.
    Pin,
    /// A net, searched hierarchically.
    Net,
}

impl ObjectKind {
    /// The Tcl search command that resolves objects of this kind.
    pub fn search_function(self) -> &'static str {
        match self {
            ObjectKind::Port => "get_ports",
            ObjectKind::Pin => "get_pins -hierarchical",
            ObjectKind::Net => "get_nets -hierarchical",
        }
    }

    /// Wraps `object` in a search command: `[get_ports clk_i]`.
    pub fn search(self, object: &str) -> String {
        format!("[{} {object}]", self.search_function())
    }
}

/// A clock defined by `create_clock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryClock {
    /// Clock name, unique within a document.
    pub name: String,
    /// Clock period in the declared unit.
    pub period: f64,
    /// Declared time unit of `period` and `waveform`; falls back to the
    /// document-wide time unit when absent.
    #[serde(default)]
    pub unit: Option<String>,
    /// The kind of object the clock is attached to.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Object name or hierarchical pattern.
    pub object: String,
    /// Rise/fall edge times, in pairs.
    #[serde(default)]
    pub waveform: Option<Vec<f64>>,
}

/// A clock derived from a source point with `create_generated_clock`.
///
/// Exactly one definition mode should be given: `edges` with `edge_shift`,
/// `multiplier`, or `divisor`. See [`GeneratedClock::definition`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedClock {
    /// Clock name.
    pub name: String,
    /// The kind of object the clock is attached to.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Object name or hierarchical pattern.
    pub object: String,
    /// The kind of the clock-generating source point.
    pub source_type: ObjectKind,
    /// Source object name or pattern.
    pub source: String,
    /// Master clock edge indices (1-based, as the tool expects).
    #[serde(default)]
    pub edges: Option<Vec<u32>>,
    /// Time shift applied to each edge, in the declared unit.
    #[serde(default)]
    pub edge_shift: Option<Vec<f64>>,
    /// Frequency multiplier.
    #[serde(default)]
    pub multiplier: Option<u32>,
    /// Frequency divisor.
    #[serde(default)]
    pub divisor: Option<u32>,
    /// Declared time unit of `edge_shift`.
    #[serde(default)]
    pub unit: Option<String>,
}

/// The period-defining clause of a generated clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockDefinition<'a> {
    /// Explicit edges, each with a time shift.
    Edges {
        /// Master clock edge indices.
        edges: &'a [u32],
        /// Shift per edge, in the declared unit.
        edge_shift: &'a [f64],
    },
    /// `-multiply_by N`.
    MultiplyBy(u32),
    /// `-divide_by N`.
    DivideBy(u32),
    /// No usable definition mode.
    Underspecified,
}

impl GeneratedClock {
    /// Resolves the definition mode in priority order: edges, multiplier, divisor.
    ///
    /// The edges mode only applies when both `edges` and `edge_shift` are
    /// present with equal length.
    pub fn definition(&self) -> ClockDefinition<'_> {
        if let (Some(edges), Some(edge_shift)) = (&self.edges, &self.edge_shift) {
            if edges.len() == edge_shift.len() {
                return ClockDefinition::Edges { edges, edge_shift };
            }
        }
        if let Some(m) = self.multiplier {
            return ClockDefinition::MultiplyBy(m);
        }
        if let Some(d) = self.divisor {
            return ClockDefinition::DivideBy(d);
        }
        ClockDefinition::Underspecified
    }

    /// Returns `true` if both edge lists are given but differ in length.
    pub fn has_mismatched_edges(&self) -> bool {
        matches!(
            (&self.edges, &self.edge_shift),
            (Some(e), Some(s)) if e.len() != s.len()
        )
    }
}

/// Whether a delay constrains an input or an output port.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayDirection {
    /// `set_input_delay`.
    Input,
    /// `set_output_delay`.
    Output,
}

impl DelayDirection {
    /// The Tcl command for this direction.
    pub fn command(self) -> &'static str {
        match self {
            DelayDirection::Input => "set_input_delay",
            DelayDirection::Output => "set_output_delay",
        }
    }
}

impl fmt::Display for DelayDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayDirection::Input => write!(f, "input"),
            DelayDirection::Output => write!(f, "output"),
        }
    }
}

/// The clock edge a delay is referenced to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockEdge {
    /// Rising edge; the tool default, never emitted.
    #[default]
    Rise,
    /// Falling edge; emitted as `-clock_fall`.
    Fall,
}

/// An input or output delay relative to a clock.
///
/// `min_delay <= max_delay` is not checked; the downstream tool decides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayConstraint {
    /// Input or output.
    pub direction: DelayDirection,
    /// Port name or pattern.
    pub port: String,
    /// Reference clock name.
    pub clock: String,
    /// Reference clock edge.
    #[serde(default)]
    pub clock_edge: ClockEdge,
    /// Minimum external delay, in the declared unit.
    pub min_delay: f64,
    /// Maximum external delay, in the declared unit.
    pub max_delay: f64,
}

/// How the clocks of different groups relate to each other.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockGroupRelation {
    /// `-asynchronous`
    Asynchronous,
    /// `-exclusive`
    Exclusive,
    /// `-physically_exclusive`
    PhysicallyExclusive,
    /// `-logically_exclusive`
    LogicallyExclusive,
}

impl ClockGroupRelation {
    /// The `set_clock_groups` flag for this relation.
    pub fn flag(self) -> &'static str {
        match self {
            ClockGroupRelation::Asynchronous => "-asynchronous",
            ClockGroupRelation::Exclusive => "-exclusive",
            ClockGroupRelation::PhysicallyExclusive => "-physically_exclusive",
            ClockGroupRelation::LogicallyExclusive => "-logically_exclusive",
        }
    }
}

/// A named set of clock groups with a common relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockGroup {
    /// Name passed to `-name`.
    pub name: String,
    /// Relation between the groups.
    #[serde(rename = "type")]
    pub relation: ClockGroupRelation,
    /// Ordered groups, each an ordered list of clock name patterns.
    pub groups: Vec<Vec<String>>,
}

/// The kind of a path endpoint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    /// A clock, searched with `get_clocks`.
    Clock,
    /// A top-level port.
    Port,
    /// A cell pin, searched hierarchically.
    Pin,
    /// A net, searched hierarchically.
    Net,
}

impl EndpointKind {
    /// The Tcl search command that resolves endpoints of this kind.
    pub fn search_function(self) -> &'static str {
        match self {
            EndpointKind::Clock => "get_clocks",
            EndpointKind::Port => ObjectKind::Port.search_function(),
            EndpointKind::Pin => ObjectKind::Pin.search_function(),
            EndpointKind::Net => ObjectKind::Net.search_function(),
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointKind::Clock => write!(f, "clock"),
            EndpointKind::Port => write!(f, "port"),
            EndpointKind::Pin => write!(f, "pin"),
            EndpointKind::Net => write!(f, "net"),
        }
    }
}

/// One end of a timing path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathEndpoint {
    /// Endpoint kind.
    #[serde(rename = "type")]
    pub kind: EndpointKind,
    /// Endpoint name or pattern.
    pub name: String,
}

impl PathEndpoint {
    /// Wraps the endpoint name in its search command.
    pub fn search(&self) -> String {
        format!("[{} {}]", self.kind.search_function(), self.name)
    }
}

/// A false path exception from `set_false_path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FalsePath {
    /// Path start point.
    pub from: PathEndpoint,
    /// Path end point.
    pub to: PathEndpoint,
}

impl FalsePath {
    /// Returns `true` for the endpoint combinations the assembler can emit:
    /// from a clock to a port or pin.
    pub fn is_supported(&self) -> bool {
        self.from.kind == EndpointKind::Clock
            && matches!(self.to.kind, EndpointKind::Port | EndpointKind::Pin)
    }
}
