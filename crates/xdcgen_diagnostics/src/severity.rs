//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is.
///
/// Levels compare in declaration order, so `Help < Note < Warning < Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A suggestion; nothing is wrong.
    Help,
    /// Informational output, e.g. a file was written or a value was rescaled.
    Note,
    /// Something the user should review; generation continues.
    Warning,
    /// Generation could not produce a trustworthy result.
    Error,
}

impl Severity {
    /// Every level, least severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Help,
        Severity::Note,
        Severity::Warning,
        Severity::Error,
    ];

    /// Position of this level in [`Severity::ALL`].
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Lowercase label used in rendered output.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Help => "help",
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
