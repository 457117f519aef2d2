//! The shared diagnostic accumulator.

use crate::code::DiagnosticCode;
use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Collects diagnostics from every generation step.
///
/// Generators only need `&DiagnosticSink`; per-severity counts are kept in
/// atomics so they can be queried without taking the lock.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    counts: [AtomicUsize; 4],
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            counts: Default::default(),
        }
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.counts[diag.severity.rank()].fetch_add(1, Ordering::Relaxed);
        self.lock().push(diag);
    }

    /// Records a bare message at `severity` under `code`.
    pub fn log(&self, code: DiagnosticCode, message: impl Into<String>, severity: Severity) {
        self.emit(Diagnostic::new(severity, code, message));
    }

    /// Number of diagnostics ever emitted at `severity`.
    ///
    /// Counts survive [`take_all`](Self::take_all).
    pub fn count(&self, severity: Severity) -> usize {
        self.counts[severity.rank()].load(Ordering::Relaxed)
    }

    /// Returns `true` if an error was emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors emitted.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warnings emitted.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// The most severe level emitted so far.
    pub fn worst(&self) -> Option<Severity> {
        Severity::ALL
            .iter()
            .rev()
            .copied()
            .find(|&s| self.count(s) > 0)
    }

    /// Drains the accumulated diagnostics in emission order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// A copy of the accumulated diagnostics in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// A copy of the accumulated diagnostics carrying `code`.
    pub fn with_code(&self, code: DiagnosticCode) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.code == code)
            .cloned()
            .collect()
    }

    // A panic while pushing cannot leave the vector inconsistent.
    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
