//! Diagnostic codes such as `T101` or `O202`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The family a diagnostic code belongs to, shown as its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    /// General errors (`E`).
    Error,
    /// General warnings (`W`).
    Warning,
    /// Timing constraint generation (`T`).
    Timing,
    /// Generated file output (`O`).
    Output,
}

impl Category {
    const ALL: [Category; 4] = [
        Category::Error,
        Category::Warning,
        Category::Timing,
        Category::Output,
    ];

    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Timing => 'T',
            Category::Output => 'O',
        }
    }

    /// Looks up the category with the given prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.prefix() == prefix)
    }
}

/// A category plus a number, displayed zero-padded to three digits.
///
/// Serialized as its display form so JSON reports read `"T101"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// A string that is not a valid diagnostic code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid diagnostic code '{0}'")]
pub struct ParseCodeError(pub String);

impl FromStr for DiagnosticCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCodeError(s.to_string());
        let mut chars = s.chars();
        let category = chars
            .next()
            .and_then(Category::from_prefix)
            .ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number = digits.parse().map_err(|_| invalid())?;
        Ok(Self::new(category, number))
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DiagnosticCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
