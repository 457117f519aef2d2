//! Error types for timing constraint generation.

use crate::constraints::EndpointKind;
use xdcgen_common::UnknownUnitError;

/// Configuration errors that abort timing XDC generation.
///
/// Recoverable problems (unit translation, underspecified generated clocks
/// under the default policy) are reported as diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A declared time unit is missing from the unit table.
    #[error(transparent)]
    UnknownUnit(#[from] UnknownUnitError),

    /// A false path uses an endpoint combination with no search mapping.
    #[error("unsupported false path endpoints: from {from} to {to}")]
    UnsupportedPathEndpoint {
        /// Start point kind.
        from: EndpointKind,
        /// End point kind.
        to: EndpointKind,
    },

    /// A generated clock has no definition mode and the policy denies it.
    #[error("generated clock '{name}' specifies no edges, multiplier or divisor")]
    UnderspecifiedGeneratedClock {
        /// The generated clock name.
        name: String,
    },
}
