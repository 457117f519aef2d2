//! Timing XDC assembly.
//!
//! [`XdcAssembler`] turns a [`TimingSpec`] into document sections using
//! Vivado's Tcl dialect. Sections are appended in a fixed order (clock
//! definitions, I/O delays, clock groups, false paths) so the output can be
//! compared against golden files. Multi-line statements end every physical
//! line but the last with a backslash.

use crate::constraints::{
    ClockDefinition, ClockEdge, ClockGroup, DelayConstraint, DelayDirection, EndpointKind,
    FalsePath, GeneratedClock, PrimaryClock, TimingSpec,
};
use crate::error::GenerateError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use xdcgen_common::UnitTable;
use xdcgen_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, Severity};
use xdcgen_document::{Container, Document, Section, Subsection};

/// A clock period, waveform edge or edge shift was translated to tool units.
pub const CLOCK_UNIT_TRANSLATED: DiagnosticCode = DiagnosticCode::new(Category::Timing, 101);

/// A delay value was translated to tool units.
pub const DELAY_UNIT_TRANSLATED: DiagnosticCode = DiagnosticCode::new(Category::Timing, 102);

/// A generated clock has no period-defining clause.
pub const GENERATED_CLOCK_UNDERSPECIFIED: DiagnosticCode =
    DiagnosticCode::new(Category::Timing, 103);

/// A generated clock lists a different number of edges and edge shifts.
pub const EDGE_SHIFT_MISMATCH: DiagnosticCode = DiagnosticCode::new(Category::Timing, 104);

/// Comment marker of XDC files.
pub const XDC_COMMENT_MARKER: &str = "#";

/// File name of the generated timing constraints.
pub const TIMING_XDC_FILE: &str = "timing.xdc";

/// Vivado's canonical time unit.
pub const VIVADO_TIME_UNIT: &str = "ns";

const CONTINUATION: &str = " \\";

/// What to do with a generated clock that has no definition mode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderspecifiedClockPolicy {
    /// Emit the clock without a period-defining clause and warn.
    #[default]
    Warn,
    /// Abort generation with an error.
    Deny,
}

/// Unit system and policies for one timing XDC run.
#[derive(Debug, Clone)]
pub struct TimingOptions {
    /// Recognized time units.
    pub time_units: UnitTable,
    /// Time unit values are declared in unless a clock overrides it.
    pub declared_time: String,
    /// Time unit the tool expects.
    pub canonical_time: String,
    /// Handling of underspecified generated clocks.
    pub policy: UnderspecifiedClockPolicy,
}

impl TimingOptions {
    /// Options targeting Vivado (nanoseconds) with values declared in `declared_time`.
    pub fn vivado(declared_time: impl Into<String>) -> Self {
        Self {
            time_units: UnitTable::time(),
            declared_time: declared_time.into(),
            canonical_time: VIVADO_TIME_UNIT.to_string(),
            policy: UnderspecifiedClockPolicy::Warn,
        }
    }

    /// Replaces the underspecified clock policy.
    pub fn with_policy(mut self, policy: UnderspecifiedClockPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self::vivado(VIVADO_TIME_UNIT)
    }
}

/// Builds timing XDC sections, reporting advisories into a sink.
///
/// The assembler performs no I/O.
pub struct XdcAssembler<'a> {
    options: &'a TimingOptions,
    sink: &'a DiagnosticSink,
}

impl<'a> XdcAssembler<'a> {
    /// Creates an assembler.
    pub fn new(options: &'a TimingOptions, sink: &'a DiagnosticSink) -> Self {
        Self { options, sink }
    }

    /// Appends every constraint section of `spec` to `doc`.
    ///
    /// On error nothing is appended.
    pub fn assemble(&self, spec: &TimingSpec, doc: &mut Document) -> Result<(), GenerateError> {
        let sections = [
            self.clock_section(spec)?,
            self.delay_section(spec)?,
            self.clock_group_section(&spec.clock_groups),
            self.false_path_section(&spec.false_paths)?,
        ];
        for section in sections {
            doc.add_child(section);
        }
        Ok(())
    }

    /// Builds the "Clock definitions" section: primary then generated clocks.
    pub fn clock_section(&self, spec: &TimingSpec) -> Result<Section, GenerateError> {
        let mut section = Section::new("Clock definitions");
        if !spec.primary_clocks.is_empty() {
            let mut primary = Subsection::new("Primary clocks");
            for clk in &spec.primary_clocks {
                self.add_primary_clock(&mut primary, clk)?;
            }
            section.add_child(primary);
        }
        if !spec.generated_clocks.is_empty() {
            let mut generated = Subsection::new("Generated clocks");
            for clk in &spec.generated_clocks {
                self.add_generated_clock(&mut generated, clk)?;
            }
            section.add_child(generated);
        }
        Ok(section)
    }

    /// Emits one `create_clock` statement.
    pub fn add_primary_clock(
        &self,
        target: &mut impl Container,
        clk: &PrimaryClock,
    ) -> Result<(), GenerateError> {
        let unit = self.clock_unit(clk.unit.as_deref());
        let period = self.translate(
            clk.period,
            unit,
            &format!("clock \"{}\" period", clk.name),
            CLOCK_UNIT_TRANSLATED,
            Severity::Warning,
        )?;
        let head = format!(
            "create_clock -name {} -verbose -period {} {}",
            clk.name,
            period,
            clk.kind.search(&clk.object)
        );
        match &clk.waveform {
            Some(waveform) => {
                let mut edges = Vec::with_capacity(waveform.len());
                for (i, edge) in waveform.iter().enumerate() {
                    edges.push(self.translate(
                        *edge,
                        unit,
                        &format!("clock \"{}\" waveform edge {i}", clk.name),
                        CLOCK_UNIT_TRANSLATED,
                        Severity::Warning,
                    )?);
                }
                target.add_line(format!("{head}{CONTINUATION}"));
                target.add_line(format!("\t-waveform {{{}}}", join_values(&edges)));
            }
            None => target.add_line(head),
        }
        Ok(())
    }

    /// Emits one `create_generated_clock` statement.
    pub fn add_generated_clock(
        &self,
        target: &mut impl Container,
        clk: &GeneratedClock,
    ) -> Result<(), GenerateError> {
        let mut lines = vec![
            format!("create_generated_clock -verbose -name {}", clk.name),
            format!("\t-source {}", clk.source_type.search(&clk.source)),
        ];

        if clk.has_mismatched_edges() {
            self.sink.emit(
                Diagnostic::warning(
                    EDGE_SHIFT_MISMATCH,
                    format!(
                        "generated clock \"{}\" lists a different number of edges and edge shifts",
                        clk.name
                    ),
                )
                .with_note("the edges definition is ignored"),
            );
        }

        match clk.definition() {
            ClockDefinition::Edges { edges, edge_shift } => {
                let unit = self.clock_unit(clk.unit.as_deref());
                let mut shifts = Vec::with_capacity(edge_shift.len());
                for (i, shift) in edge_shift.iter().enumerate() {
                    shifts.push(self.translate(
                        *shift,
                        unit,
                        &format!("generated clock \"{}\" edge shift {i}", clk.name),
                        CLOCK_UNIT_TRANSLATED,
                        Severity::Warning,
                    )?);
                }
                let edges: Vec<String> = edges.iter().map(u32::to_string).collect();
                lines.push(format!("\t-edges {{{}}}", edges.join(" ")));
                lines.push(format!("\t-edge_shift {{{}}}", join_values(&shifts)));
            }
            ClockDefinition::MultiplyBy(m) => lines.push(format!("\t-multiply_by {m}")),
            ClockDefinition::DivideBy(d) => lines.push(format!("\t-divide_by {d}")),
            ClockDefinition::Underspecified => match self.options.policy {
                UnderspecifiedClockPolicy::Deny => {
                    return Err(GenerateError::UnderspecifiedGeneratedClock {
                        name: clk.name.clone(),
                    });
                }
                UnderspecifiedClockPolicy::Warn => {
                    self.sink.emit(
                        Diagnostic::warning(
                            GENERATED_CLOCK_UNDERSPECIFIED,
                            format!(
                                "generated clock \"{}\" does not specify period and duty cycle",
                                clk.name
                            ),
                        )
                        .with_help("set `edges` with `edge_shift`, `multiplier`, or `divisor`"),
                    );
                }
            },
        }

        lines.push(format!("\t{}", clk.kind.search(&clk.object)));
        add_statement(target, lines);
        Ok(())
    }

    /// Builds the "Input/output delay constraints" section.
    pub fn delay_section(&self, spec: &TimingSpec) -> Result<Section, GenerateError> {
        let mut section = Section::new("Input/output delay constraints");
        for (direction, title) in [
            (DelayDirection::Input, "Input delays"),
            (DelayDirection::Output, "Output delays"),
        ] {
            let mut sub = Subsection::new(title);
            for con in spec.delays_in(direction) {
                self.add_delay(&mut sub, con)?;
            }
            if !sub.is_empty() {
                section.add_child(sub);
            }
        }
        Ok(section)
    }

    /// Emits the `-min` and `-max` statements of one delay constraint.
    ///
    /// Both are always emitted, even when the values are equal.
    pub fn add_delay(
        &self,
        target: &mut impl Container,
        con: &DelayConstraint,
    ) -> Result<(), GenerateError> {
        let unit = self.options.declared_time.as_str();
        for (bound, value) in [("min", con.min_delay), ("max", con.max_delay)] {
            let value = self.translate(
                value,
                unit,
                &format!("{} delay on \"{}\" {bound}", con.direction, con.port),
                DELAY_UNIT_TRANSLATED,
                Severity::Note,
            )?;
            let mut parts = vec![con.direction.command().to_string()];
            if con.clock_edge == ClockEdge::Fall {
                parts.push("-clock_fall".to_string());
            }
            parts.push("-verbose".to_string());
            parts.push(format!("-clock [get_clocks {}]", con.clock));
            parts.push(format!("-{bound} {value}"));
            parts.push(format!("[get_ports {}]", con.port));
            target.add_line(parts.join(" "));
        }
        Ok(())
    }

    /// Builds the "Clock groups" section.
    pub fn clock_group_section(&self, groups: &[ClockGroup]) -> Section {
        let mut section = Section::new("Clock groups");
        for cg in groups {
            let mut lines = vec![format!(
                "set_clock_groups -name {} {}",
                cg.name,
                cg.relation.flag()
            )];
            lines.extend(cg.groups.iter().map(|group| {
                format!(
                    "-group [get_clocks -include_generated_clocks \"{}\"]",
                    group.join(" ")
                )
            }));
            add_statement(&mut section, lines);
        }
        section
    }

    /// Builds the "False paths" section.
    pub fn false_path_section(&self, paths: &[FalsePath]) -> Result<Section, GenerateError> {
        let mut section = Section::new("False paths");
        for path in paths {
            if !path.is_supported() {
                return Err(GenerateError::UnsupportedPathEndpoint {
                    from: path.from.kind,
                    to: path.to.kind,
                });
            }
            debug_assert_eq!(path.from.kind, EndpointKind::Clock);
            add_statement(
                &mut section,
                vec![
                    "set_false_path -verbose".to_string(),
                    format!("\t-from {}", path.from.search()),
                    format!("\t-to {}", path.to.search()),
                ],
            );
        }
        Ok(section)
    }

    fn clock_unit<'u>(&'u self, unit: Option<&'u str>) -> &'u str {
        unit.unwrap_or(&self.options.declared_time)
    }

    /// Converts `value` into the canonical time unit, reporting any translation.
    fn translate(
        &self,
        value: f64,
        declared: &str,
        what: &str,
        code: DiagnosticCode,
        severity: Severity,
    ) -> Result<f64, GenerateError> {
        let conv = self
            .options
            .time_units
            .convert(value, declared, &self.options.canonical_time)?;
        if let Some(advisory) = conv.advisory {
            self.sink.log(code, format!("{what}: {advisory}"), severity);
        }
        Ok(conv.value)
    }
}

/// Builds a complete timing XDC document at `path`.
pub fn build_timing_document(
    spec: &TimingSpec,
    options: &TimingOptions,
    path: impl Into<PathBuf>,
    sink: &DiagnosticSink,
) -> Result<Document, GenerateError> {
    let mut doc = Document::new(path, XDC_COMMENT_MARKER);
    XdcAssembler::new(options, sink).assemble(spec, &mut doc)?;
    Ok(doc)
}

/// Adds a multi-line statement, continuing every line but the last.
fn add_statement(target: &mut impl Container, lines: Vec<String>) {
    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.into_iter().enumerate() {
        if i < last {
            target.add_line(format!("{line}{CONTINUATION}"));
        } else {
            target.add_line(line);
        }
    }
}

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{ClockGroupRelation, EndpointKind, ObjectKind, PathEndpoint};
    use chrono::NaiveDate;
    use xdcgen_document::Banner;

    fn clock(name: &str, period: f64, unit: &str) -> PrimaryClock {
        PrimaryClock {
            name: name.into(),
            period,
            unit: Some(unit.into()),
            kind: ObjectKind::Port,
            object: "clk_i".into(),
            waveform: None,
        }
    }

    fn generated(name: &str) -> GeneratedClock {
        GeneratedClock {
            name: name.into(),
            kind: ObjectKind::Pin,
            object: "div/q".into(),
            source_type: ObjectKind::Port,
            source: "clk_i".into(),
            edges: None,
            edge_shift: None,
            multiplier: None,
            divisor: None,
            unit: None,
        }
    }

    fn delay(direction: DelayDirection, port: &str, edge: ClockEdge) -> DelayConstraint {
        DelayConstraint {
            direction,
            port: port.into(),
            clock: "clk".into(),
            clock_edge: edge,
            min_delay: 1.0,
            max_delay: 2.0,
        }
    }

    fn endpoint(kind: EndpointKind, name: &str) -> PathEndpoint {
        PathEndpoint {
            kind,
            name: name.into(),
        }
    }

    fn body_lines(section: &Section) -> Vec<String> {
        let mut doc = Document::new("t.xdc", XDC_COMMENT_MARKER);
        doc.add_child(section.clone());
        doc.render()
            .lines()
            .filter(|l| !l.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    fn with_delays(delays: Vec<DelayConstraint>) -> TimingSpec {
        TimingSpec {
            delays,
            ..TimingSpec::default()
        }
    }

    fn primary_lines(
        clk: PrimaryClock,
        options: &TimingOptions,
        sink: &DiagnosticSink,
    ) -> Vec<String> {
        let spec = TimingSpec {
            primary_clocks: vec![clk],
            ..TimingSpec::default()
        };
        let section = XdcAssembler::new(options, sink).clock_section(&spec).unwrap();
        body_lines(&section)
    }

    #[test]
    fn primary_clock_single_line() {
        let sink = DiagnosticSink::new();
        let lines = primary_lines(clock("clk", 10.0, "ns"), &TimingOptions::default(), &sink);
        assert_eq!(
            lines,
            vec!["create_clock -name clk -verbose -period 10 [get_ports clk_i]"]
        );
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn primary_clock_translated_from_microseconds() {
        let sink = DiagnosticSink::new();
        let lines = primary_lines(clock("clk", 10.0, "us"), &TimingOptions::default(), &sink);
        assert_eq!(
            lines,
            vec!["create_clock -name clk -verbose -period 10000 [get_ports clk_i]"]
        );
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, CLOCK_UNIT_TRANSLATED);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert!(diags[0].message.contains("10 us translated to 10000 ns"));
    }

    #[test]
    fn primary_clock_uses_document_unit_when_unset() {
        let sink = DiagnosticSink::new();
        let mut clk = clock("clk", 2500.0, "ps");
        clk.unit = None;
        let options = TimingOptions::vivado("ps");
        let lines = primary_lines(clk, &options, &sink);
        assert_eq!(
            lines,
            vec!["create_clock -name clk -verbose -period 2.5 [get_ports clk_i]"]
        );
        assert_eq!(sink.warning_count(), 1);
    }

    #[test]
    fn primary_clock_with_waveform() {
        let sink = DiagnosticSink::new();
        let mut clk = clock("clk_b", 0.008, "us");
        clk.kind = ObjectKind::Pin;
        clk.object = "pll/clkout0".into();
        clk.waveform = Some(vec![0.0, 0.003]);
        let lines = primary_lines(clk, &TimingOptions::default(), &sink);
        assert_eq!(
            lines,
            vec![
                "create_clock -name clk_b -verbose -period 8 [get_pins -hierarchical pll/clkout0] \\",
                "\t-waveform {0 3}",
            ]
        );
        // period plus both edges
        assert_eq!(sink.with_code(CLOCK_UNIT_TRANSLATED).len(), 3);
    }

    #[test]
    fn primary_clock_net_search() {
        let sink = DiagnosticSink::new();
        let mut clk = clock("clk_n", 5.0, "ns");
        clk.kind = ObjectKind::Net;
        clk.object = "top/clk_net".into();
        let lines = primary_lines(clk, &TimingOptions::default(), &sink);
        assert!(lines[0].ends_with("[get_nets -hierarchical top/clk_net]"));
    }

    #[test]
    fn primary_clock_unknown_unit() {
        let sink = DiagnosticSink::new();
        let spec = TimingSpec {
            primary_clocks: vec![clock("clk", 10.0, "ms")],
            ..TimingSpec::default()
        };
        let options = TimingOptions::default();
        let err = XdcAssembler::new(&options, &sink)
            .clock_section(&spec)
            .unwrap_err();
        assert!(matches!(err, GenerateError::UnknownUnit(_)));
    }

    #[test]
    fn generated_clock_multiplier() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let mut clk = generated("clk_x2");
        clk.multiplier = Some(2);
        let mut sub = Subsection::new("Generated clocks");
        XdcAssembler::new(&options, &sink)
            .add_generated_clock(&mut sub, &clk)
            .unwrap();
        let lines: Vec<_> = sub
            .children()
            .iter()
            .map(|n| match n {
                xdcgen_document::DocumentNode::Line(l) => l.text().to_string(),
                _ => panic!("expected line"),
            })
            .collect();
        assert_eq!(
            lines,
            vec![
                "create_generated_clock -verbose -name clk_x2 \\",
                "\t-source [get_ports clk_i] \\",
                "\t-multiply_by 2 \\",
                "\t[get_pins -hierarchical div/q]",
            ]
        );
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn generated_clock_edges_translate_shift_only() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::vivado("ps");
        let mut clk = generated("clk_shift");
        clk.kind = ObjectKind::Net;
        clk.source_type = ObjectKind::Pin;
        clk.source = "mmcm/CLKOUT0".into();
        clk.edges = Some(vec![1, 2, 3]);
        clk.edge_shift = Some(vec![0.0, 500.0, 0.0]);
        let spec = TimingSpec {
            generated_clocks: vec![clk],
            ..TimingSpec::default()
        };
        let section = XdcAssembler::new(&options, &sink).clock_section(&spec).unwrap();
        assert_eq!(
            body_lines(&section),
            vec![
                "create_generated_clock -verbose -name clk_shift \\",
                "\t-source [get_pins -hierarchical mmcm/CLKOUT0] \\",
                "\t-edges {1 2 3} \\",
                "\t-edge_shift {0 0.5 0} \\",
                "\t[get_nets -hierarchical div/q]",
            ]
        );
        assert_eq!(sink.with_code(CLOCK_UNIT_TRANSLATED).len(), 3);
    }

    #[test]
    fn generated_clock_underspecified_warns() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let spec = TimingSpec {
            generated_clocks: vec![generated("gclk")],
            ..TimingSpec::default()
        };
        let section = XdcAssembler::new(&options, &sink).clock_section(&spec).unwrap();
        assert_eq!(
            body_lines(&section),
            vec![
                "create_generated_clock -verbose -name gclk \\",
                "\t-source [get_ports clk_i] \\",
                "\t[get_pins -hierarchical div/q]",
            ]
        );
        let warnings = sink.with_code(GENERATED_CLOCK_UNDERSPECIFIED);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(!sink.has_errors());
    }

    #[test]
    fn generated_clock_underspecified_denied() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default().with_policy(UnderspecifiedClockPolicy::Deny);
        let spec = TimingSpec {
            generated_clocks: vec![generated("gclk")],
            ..TimingSpec::default()
        };
        let err = XdcAssembler::new(&options, &sink)
            .clock_section(&spec)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnderspecifiedGeneratedClock { ref name } if name == "gclk"
        ));
    }

    #[test]
    fn generated_clock_mismatched_edges_warns_and_falls_through() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let mut clk = generated("gclk");
        clk.edges = Some(vec![1, 2, 3]);
        clk.edge_shift = Some(vec![0.0, 1.0]);
        clk.divisor = Some(4);
        let spec = TimingSpec {
            generated_clocks: vec![clk],
            ..TimingSpec::default()
        };
        let section = XdcAssembler::new(&options, &sink).clock_section(&spec).unwrap();
        assert!(body_lines(&section).contains(&"\t-divide_by 4 \\".to_string()));
        assert_eq!(sink.with_code(EDGE_SHIFT_MISMATCH).len(), 1);
    }

    #[test]
    fn delays_emit_min_and_max() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let mut equal = delay(DelayDirection::Input, "din", ClockEdge::Rise);
        equal.max_delay = equal.min_delay;
        let section = XdcAssembler::new(&options, &sink)
            .delay_section(&with_delays(vec![equal]))
            .unwrap();
        assert_eq!(
            body_lines(&section),
            vec![
                "set_input_delay -verbose -clock [get_clocks clk] -min 1 [get_ports din]",
                "set_input_delay -verbose -clock [get_clocks clk] -max 1 [get_ports din]",
            ]
        );
    }

    #[test]
    fn delays_fall_edge_and_subsections() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let spec = with_delays(vec![
            delay(DelayDirection::Output, "dout", ClockEdge::Fall),
            delay(DelayDirection::Input, "din", ClockEdge::Rise),
        ]);
        let section = XdcAssembler::new(&options, &sink)
            .delay_section(&spec)
            .unwrap();
        let mut doc = Document::new("t.xdc", XDC_COMMENT_MARKER);
        doc.add_child(section);
        let text = doc.render();
        let input = text.find("# Input delays").unwrap();
        let output = text.find("# Output delays").unwrap();
        assert!(input < output);
        assert!(text.contains(
            "set_output_delay -clock_fall -verbose -clock [get_clocks clk] -max 2 [get_ports dout]\n"
        ));
    }

    #[test]
    fn delays_translated_as_notes() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::vivado("us");
        let spec = with_delays(vec![delay(DelayDirection::Input, "din", ClockEdge::Rise)]);
        let section = XdcAssembler::new(&options, &sink)
            .delay_section(&spec)
            .unwrap();
        assert_eq!(
            body_lines(&section)[1],
            "set_input_delay -verbose -clock [get_clocks clk] -max 2000 [get_ports din]"
        );
        let notes = sink.with_code(DELAY_UNIT_TRANSLATED);
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|d| d.severity == Severity::Note));
    }

    #[test]
    fn empty_delays_have_no_subsections() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let section = XdcAssembler::new(&options, &sink)
            .delay_section(&TimingSpec::default())
            .unwrap();
        assert!(section.is_empty());
    }

    #[test]
    fn clock_groups_continue_all_but_last() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        for n in 1..=4 {
            let cg = ClockGroup {
                name: "async".into(),
                relation: ClockGroupRelation::Asynchronous,
                groups: (0..n).map(|i| vec![format!("clk{i}")]).collect(),
            };
            let section = XdcAssembler::new(&options, &sink).clock_group_section(&[cg]);
            let lines = body_lines(&section);
            assert_eq!(lines.len(), n + 1);
            let group_lines: Vec<_> = lines.iter().filter(|l| l.starts_with("-group")).collect();
            assert_eq!(group_lines.len(), n);
            let continued = group_lines.iter().filter(|l| l.ends_with('\\')).count();
            assert_eq!(continued, n - 1);
            assert!(!lines.last().unwrap().ends_with('\\'));
        }
    }

    #[test]
    fn clock_group_text() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let cg = ClockGroup {
            name: "excl".into(),
            relation: ClockGroupRelation::LogicallyExclusive,
            groups: vec![vec!["clk_a".into()], vec!["clk_b".into(), "clk_c".into()]],
        };
        let section = XdcAssembler::new(&options, &sink).clock_group_section(&[cg]);
        assert_eq!(
            body_lines(&section),
            vec![
                "set_clock_groups -name excl -logically_exclusive \\",
                "-group [get_clocks -include_generated_clocks \"clk_a\"] \\",
                "-group [get_clocks -include_generated_clocks \"clk_b clk_c\"]",
            ]
        );
    }

    #[test]
    fn false_path_clock_to_pin() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let fp = FalsePath {
            from: endpoint(EndpointKind::Clock, "clk"),
            to: endpoint(EndpointKind::Pin, "reg/q"),
        };
        let section = XdcAssembler::new(&options, &sink)
            .false_path_section(&[fp])
            .unwrap();
        assert_eq!(
            body_lines(&section),
            vec![
                "set_false_path -verbose \\",
                "\t-from [get_clocks clk] \\",
                "\t-to [get_pins -hierarchical reg/q]",
            ]
        );
    }

    #[test]
    fn false_path_clock_to_port() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let fp = FalsePath {
            from: endpoint(EndpointKind::Clock, "clk"),
            to: endpoint(EndpointKind::Port, "led[*]"),
        };
        let section = XdcAssembler::new(&options, &sink)
            .false_path_section(&[fp])
            .unwrap();
        assert_eq!(body_lines(&section)[2], "\t-to [get_ports led[*]]");
    }

    #[test]
    fn false_path_unsupported_endpoint() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let fp = FalsePath {
            from: endpoint(EndpointKind::Pin, "a/q"),
            to: endpoint(EndpointKind::Pin, "b/d"),
        };
        let err = XdcAssembler::new(&options, &sink)
            .false_path_section(&[fp])
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnsupportedPathEndpoint {
                from: EndpointKind::Pin,
                to: EndpointKind::Pin
            }
        ));
    }

    fn full_spec() -> TimingSpec {
        let mut clk_b = clock("clk_b", 8.0, "ns");
        clk_b.kind = ObjectKind::Pin;
        clk_b.object = "pll/clkout0".into();
        clk_b.waveform = Some(vec![0.0, 4.0]);
        let mut clk_div = generated("clk_div");
        clk_div.divisor = Some(2);
        let mut dout = delay(DelayDirection::Output, "dout", ClockEdge::Fall);
        dout.min_delay = 0.5;
        dout.max_delay = 1.5;
        TimingSpec {
            primary_clocks: vec![clock("clk", 10.0, "ns"), clk_b],
            generated_clocks: vec![clk_div],
            delays: vec![delay(DelayDirection::Input, "din", ClockEdge::Rise), dout],
            clock_groups: vec![ClockGroup {
                name: "async".into(),
                relation: ClockGroupRelation::Asynchronous,
                groups: vec![vec!["clk".into()], vec!["clk_b".into(), "clk_div".into()]],
            }],
            false_paths: vec![FalsePath {
                from: endpoint(EndpointKind::Clock, "clk"),
                to: endpoint(EndpointKind::Pin, "reg/q"),
            }],
        }
    }

    fn framed(title: &str, body: &[&str]) -> String {
        let dash = format!("#{}\n", "-".repeat(79));
        let mut s = format!("{dash}# {title}\n{dash}");
        for line in body {
            s.push_str(line);
            s.push('\n');
        }
        s.push_str(&dash);
        s
    }

    #[test]
    fn golden_timing_document() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let banner = Banner::new("jdoe", NaiveDate::from_ymd_opt(2021, 2, 4).unwrap());
        let mut doc = Document::new("/work/build/timing.xdc", XDC_COMMENT_MARKER)
            .with_banner(banner);
        XdcAssembler::new(&options, &sink)
            .assemble(&full_spec(), &mut doc)
            .unwrap();

        let eq = format!("#{}\n", "=".repeat(79));
        let mut expected = format!(
            "{eq}# User: jdoe\n# Date: 02/04/21\n# Path: /work/build/timing.xdc\n{eq}"
        );
        expected.push_str(&framed(
            "Clock definitions",
            &[
                "# Primary clocks",
                "create_clock -name clk -verbose -period 10 [get_ports clk_i]",
                "create_clock -name clk_b -verbose -period 8 [get_pins -hierarchical pll/clkout0] \\",
                "\t-waveform {0 4}",
                "# Generated clocks",
                "create_generated_clock -verbose -name clk_div \\",
                "\t-source [get_ports clk_i] \\",
                "\t-divide_by 2 \\",
                "\t[get_pins -hierarchical div/q]",
            ],
        ));
        expected.push_str(&framed(
            "Input/output delay constraints",
            &[
                "# Input delays",
                "set_input_delay -verbose -clock [get_clocks clk] -min 1 [get_ports din]",
                "set_input_delay -verbose -clock [get_clocks clk] -max 2 [get_ports din]",
                "# Output delays",
                "set_output_delay -clock_fall -verbose -clock [get_clocks clk] -min 0.5 [get_ports dout]",
                "set_output_delay -clock_fall -verbose -clock [get_clocks clk] -max 1.5 [get_ports dout]",
            ],
        ));
        expected.push_str(&framed(
            "Clock groups",
            &[
                "set_clock_groups -name async -asynchronous \\",
                "-group [get_clocks -include_generated_clocks \"clk\"] \\",
                "-group [get_clocks -include_generated_clocks \"clk_b clk_div\"]",
            ],
        ));
        expected.push_str(&framed(
            "False paths",
            &[
                "set_false_path -verbose \\",
                "\t-from [get_clocks clk] \\",
                "\t-to [get_pins -hierarchical reg/q]",
            ],
        ));

        assert_eq!(doc.render(), expected);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn assemble_is_deterministic() {
        let options = TimingOptions::default();
        let banner = Banner::new("ci", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let render = || {
            let sink = DiagnosticSink::new();
            let mut doc =
                Document::new("timing.xdc", XDC_COMMENT_MARKER).with_banner(banner.clone());
            XdcAssembler::new(&options, &sink)
                .assemble(&full_spec(), &mut doc)
                .unwrap();
            doc.render()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn assemble_failure_leaves_document_untouched() {
        let sink = DiagnosticSink::new();
        let options = TimingOptions::default();
        let mut spec = full_spec();
        spec.false_paths[0].to.kind = EndpointKind::Net;
        let mut doc = Document::new("timing.xdc", XDC_COMMENT_MARKER);
        let result = XdcAssembler::new(&options, &sink).assemble(&spec, &mut doc);
        assert!(result.is_err());
        assert!(doc.is_empty());
    }

    #[test]
    fn empty_spec_still_has_all_sections() {
        let sink = DiagnosticSink::new();
        let doc = build_timing_document(
            &TimingSpec::new(),
            &TimingOptions::default(),
            "timing.xdc",
            &sink,
        )
        .unwrap();
        let text = doc.render();
        for title in [
            "# Clock definitions",
            "# Input/output delay constraints",
            "# Clock groups",
            "# False paths",
        ] {
            assert!(text.contains(title), "missing {title}");
        }
        assert_eq!(doc.children().len(), 4);
    }

    #[test]
    fn build_and_write_timing_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TIMING_XDC_FILE);
        let sink = DiagnosticSink::new();
        let doc = build_timing_document(&full_spec(), &TimingOptions::default(), &path, &sink)
            .unwrap();
        let writer = xdcgen_document::DocumentWriter::new(false);
        assert!(writer.write(&doc).unwrap().is_written());
        assert!(!writer.write(&doc).unwrap().is_written());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("create_clock -name clk -verbose -period 10 [get_ports clk_i]"));
    }
}
