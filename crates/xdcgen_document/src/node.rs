//! Document tree nodes and their framing rules.

use crate::document::Document;

/// Total width of a comment rule, including the comment marker.
pub const RULE_WIDTH: usize = 80;

/// A node in a document tree.
///
/// Container variants own their children exclusively; the tree has no
/// shared or back references. Every variant renders with the comment marker
/// of the root document it is rendered under.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    /// A nested document, framed by its banner.
    Document(Document),
    /// A titled section, framed by dashed rules.
    Section(Section),
    /// A subsection introduced by a single comment line.
    Subsection(Subsection),
    /// A single line of literal text.
    Line(Line),
}

impl DocumentNode {
    /// Appends the full rendering of this node to `out`.
    pub fn render_into(&self, marker: &str, out: &mut String) {
        match self {
            DocumentNode::Document(doc) => doc.render_into(marker, out),
            DocumentNode::Section(section) => {
                out.push_str(&rule(marker, '-'));
                out.push_str(&comment_line(marker, &section.title));
                out.push_str(&rule(marker, '-'));
                render_children(&section.children, marker, out);
                out.push_str(&rule(marker, '-'));
            }
            DocumentNode::Subsection(subsection) => {
                out.push_str(&comment_line(marker, &subsection.title));
                render_children(&subsection.children, marker, out);
            }
            DocumentNode::Line(line) => line.render_into(marker, out),
        }
    }
}

impl From<Document> for DocumentNode {
    fn from(doc: Document) -> Self {
        DocumentNode::Document(doc)
    }
}

impl From<Section> for DocumentNode {
    fn from(section: Section) -> Self {
        DocumentNode::Section(section)
    }
}

impl From<Subsection> for DocumentNode {
    fn from(subsection: Subsection) -> Self {
        DocumentNode::Subsection(subsection)
    }
}

impl From<Line> for DocumentNode {
    fn from(line: Line) -> Self {
        DocumentNode::Line(line)
    }
}

/// Ordered child insertion shared by every container node.
///
/// Insertion order is render order. Nothing is reordered or de-duplicated.
pub trait Container {
    /// The children of this container, in insertion order.
    fn children(&self) -> &[DocumentNode];

    /// Mutable access to the children of this container.
    fn children_mut(&mut self) -> &mut Vec<DocumentNode>;

    /// Appends a child node.
    fn add_child(&mut self, node: impl Into<DocumentNode>) {
        self.children_mut().push(node.into());
    }

    /// Appends a line of literal text.
    fn add_line(&mut self, text: impl Into<String>) {
        self.add_child(Line::new(text));
    }

    /// Appends a line of literal text followed by a trailing comment.
    fn add_commented_line(&mut self, text: impl Into<String>, comment: impl Into<String>) {
        self.add_child(Line::with_comment(text, comment));
    }

    /// Returns `true` if nothing has been added yet.
    fn is_empty(&self) -> bool {
        self.children().is_empty()
    }
}

/// A titled portion of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    title: String,
    children: Vec<DocumentNode>,
}

impl Section {
    /// Creates an empty section with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// The section title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Container for Section {
    fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<DocumentNode> {
        &mut self.children
    }
}

/// A lightweight grouping inside a section, headed by one comment line.
#[derive(Debug, Clone, PartialEq)]
pub struct Subsection {
    title: String,
    children: Vec<DocumentNode>,
}

impl Subsection {
    /// Creates an empty subsection with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// The subsection title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Container for Subsection {
    fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<DocumentNode> {
        &mut self.children
    }
}

/// The smallest unit of a document: literal text with an optional comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    text: String,
    comment: Option<String>,
}

impl Line {
    /// Creates a line without a trailing comment.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            comment: None,
        }
    }

    /// Creates a line followed by `<marker> <comment>`.
    pub fn with_comment(text: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            comment: Some(comment.into()),
        }
    }

    /// The literal text of the line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The trailing comment, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    fn render_into(&self, marker: &str, out: &mut String) {
        out.push_str(&self.text);
        // An empty comment renders like no comment at all.
        if let Some(comment) = self.comment.as_deref().filter(|c| !c.is_empty()) {
            out.push(' ');
            out.push_str(marker);
            out.push(' ');
            out.push_str(comment);
        }
        out.push('\n');
    }
}

pub(crate) fn render_children(children: &[DocumentNode], marker: &str, out: &mut String) {
    for child in children {
        child.render_into(marker, out);
    }
}

/// A full-width rule: the marker followed by `fill` up to [`RULE_WIDTH`].
pub(crate) fn rule(marker: &str, fill: char) -> String {
    let width = RULE_WIDTH.saturating_sub(marker.chars().count());
    let mut s = String::with_capacity(RULE_WIDTH + 1);
    s.push_str(marker);
    s.extend(std::iter::repeat(fill).take(width));
    s.push('\n');
    s
}

pub(crate) fn comment_line(marker: &str, text: &str) -> String {
    format!("{marker} {text}\n")
}
