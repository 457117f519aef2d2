//! The root document: banner metadata, rendering, and materialization.

use crate::error::DocumentError;
use crate::node::{comment_line, render_children, rule, Container, DocumentNode};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Generation metadata printed in every document banner.
///
/// Captured once when a document is created so that rendering the same tree
/// twice always yields identical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// The user the document was generated for.
    pub user: String,
    /// The generation date.
    pub date: NaiveDate,
}

impl Banner {
    /// Creates a banner with explicit metadata.
    pub fn new(user: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user: user.into(),
            date,
        }
    }

    /// Captures the current user and local date.
    pub fn current() -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        Self::new(user, Local::now().date_naive())
    }
}

/// Outcome of writing a document to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The rendered text was written.
    Written,
    /// The target already existed and overwriting was not requested.
    Skipped,
}

impl WriteOutcome {
    /// Returns `true` if the file was written.
    pub fn is_written(self) -> bool {
        self == WriteOutcome::Written
    }
}

/// The root of a document tree.
///
/// Carries the destination path and the comment marker used to frame every
/// descendant, so markers are never mixed within one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: PathBuf,
    marker: String,
    title: Option<String>,
    banner: Banner,
    children: Vec<DocumentNode>,
}

impl Document {
    /// Creates an empty document for `path` using `marker` for comments.
    ///
    /// The banner is captured from the current environment; use
    /// [`with_banner`](Self::with_banner) for reproducible output.
    pub fn new(path: impl Into<PathBuf>, marker: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            marker: marker.into(),
            title: None,
            banner: Banner::current(),
            children: Vec::new(),
        }
    }

    /// Replaces the banner metadata.
    pub fn with_banner(mut self, banner: Banner) -> Self {
        self.banner = banner;
        self
    }

    /// Adds a title line to the banner.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The comment marker used throughout this document.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// The banner metadata.
    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Renders the full document text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&self.marker, &mut out);
        out
    }

    /// Renders under an inherited `marker`; a nested document takes the
    /// marker of the root it is rendered in.
    pub(crate) fn render_into(&self, marker: &str, out: &mut String) {
        out.push_str(&rule(marker, '='));
        if let Some(title) = &self.title {
            out.push_str(&comment_line(marker, title));
        }
        out.push_str(&comment_line(marker, &format!("User: {}", self.banner.user)));
        out.push_str(&comment_line(
            marker,
            &format!("Date: {}", self.banner.date.format("%m/%d/%y")),
        ));
        out.push_str(&comment_line(
            marker,
            &format!("Path: {}", self.path.display()),
        ));
        out.push_str(&rule(marker, '='));
        render_children(&self.children, marker, out);
    }

    /// Writes the rendered text to `path`.
    ///
    /// If `path` already exists and `overwrite` is false nothing is written
    /// and [`WriteOutcome::Skipped`] is returned. The existence check and the
    /// write are not atomic; concurrent runs must be serialized by the caller.
    pub fn materialize(
        &self,
        path: &Path,
        overwrite: bool,
    ) -> Result<WriteOutcome, DocumentError> {
        if path.exists() && !overwrite {
            return Ok(WriteOutcome::Skipped);
        }
        std::fs::write(path, self.render()).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(WriteOutcome::Written)
    }
}

impl Container for Document {
    fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<DocumentNode> {
        &mut self.children
    }
}
