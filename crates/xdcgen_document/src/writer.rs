//! The write step, kept separate from document assembly.

use crate::document::{Document, WriteOutcome};
use crate::error::DocumentError;
use xdcgen_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};

/// A document was not written because the target already exists.
pub const DOCUMENT_SKIPPED: DiagnosticCode = DiagnosticCode::new(Category::Output, 201);

/// A document was written.
pub const DOCUMENT_WRITTEN: DiagnosticCode = DiagnosticCode::new(Category::Output, 202);

/// Materializes documents at their own destination paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentWriter {
    overwrite: bool,
}

impl DocumentWriter {
    /// Creates a writer; `overwrite` replaces existing files.
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    /// Returns `true` if this writer replaces existing files.
    pub fn overwrites(&self) -> bool {
        self.overwrite
    }

    /// Writes `doc` to [`Document::path`].
    pub fn write(&self, doc: &Document) -> Result<WriteOutcome, DocumentError> {
        doc.materialize(doc.path(), self.overwrite)
    }

    /// Writes `doc` and records the outcome in `sink`.
    ///
    /// A skipped write is reported as a warning, a completed one as a note.
    /// Storage errors are returned, not reported.
    pub fn write_and_report(
        &self,
        doc: &Document,
        sink: &DiagnosticSink,
    ) -> Result<WriteOutcome, DocumentError> {
        let outcome = self.write(doc)?;
        let path = doc.path().display();
        match outcome {
            WriteOutcome::Written => {
                sink.emit(Diagnostic::note(DOCUMENT_WRITTEN, format!("generated {path}")));
            }
            WriteOutcome::Skipped => {
                sink.emit(
                    Diagnostic::warning(DOCUMENT_SKIPPED, format!("{path} not generated"))
                        .with_note("the file already exists")
                        .with_help("pass --force to regenerate it"),
                );
            }
        }
        Ok(outcome)
    }
}
