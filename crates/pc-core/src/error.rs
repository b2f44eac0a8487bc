use std::fmt;

use crate::pole::PlateId;

/// Caller errors surfaced by the plate circuit engine. Routine data gaps
/// (missing plates, dropped edges) are not errors — see
/// [`crate::diagnostics::CircuitDiagnostic`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CircuitError {
    /// Two trees combined in a stage query were built with different anchor
    /// plates. A programming mistake upstream, not a data condition.
    AnchorMismatch {
        from_anchor: PlateId,
        to_anchor: PlateId,
    },
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitError::AnchorMismatch {
                from_anchor,
                to_anchor,
            } => write!(
                f,
                "cannot combine trees with different anchor plates: {from_anchor} vs {to_anchor}"
            ),
        }
    }
}

impl std::error::Error for CircuitError {}

pub type Result<T> = std::result::Result<T, CircuitError>;
