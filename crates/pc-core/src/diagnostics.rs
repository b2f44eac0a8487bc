use std::fmt;

use crate::pole::PlateId;

/// Recoverable conditions observed while building a reconstruction tree.
///
/// None of these abort a build: the affected edge is skipped and the rest
/// of the tree assembles normally. The service layer decides whether to
/// log them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CircuitDiagnostic {
    /// A later sequence re-defined an already-selected moving plate and was
    /// ignored. The first definition wins.
    DuplicateSequence {
        moving_plate_id: PlateId,
        selected_fixed: PlateId,
        ignored_fixed: PlateId,
    },
    /// A sequence with no samples. Its moving plate stays out of the tree
    /// and reports as missing at query time.
    EmptySequence {
        moving_plate_id: PlateId,
        fixed_plate_id: PlateId,
    },
    /// An edge whose moving plate is already on a path to the anchor.
    /// Composing it would accumulate rotation around the loop, so it is
    /// dropped.
    CyclicEdge {
        moving_plate_id: PlateId,
        fixed_plate_id: PlateId,
    },
    /// An edge whose fixed-plate chain never reaches the anchor. Excluded
    /// from the tree; the moving plate reports as missing at query time.
    Disconnected {
        moving_plate_id: PlateId,
        fixed_plate_id: PlateId,
    },
}

impl fmt::Display for CircuitDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitDiagnostic::DuplicateSequence {
                moving_plate_id,
                selected_fixed,
                ignored_fixed,
            } => write!(
                f,
                "duplicate pole sequence for moving plate {moving_plate_id}: \
                 kept fixed plate {selected_fixed}, ignored fixed plate {ignored_fixed}"
            ),
            CircuitDiagnostic::EmptySequence {
                moving_plate_id,
                fixed_plate_id,
            } => write!(
                f,
                "pole sequence {moving_plate_id} rel {fixed_plate_id} has no samples"
            ),
            CircuitDiagnostic::CyclicEdge {
                moving_plate_id,
                fixed_plate_id,
            } => write!(
                f,
                "cyclic plate circuit: dropped edge {moving_plate_id} rel {fixed_plate_id}"
            ),
            CircuitDiagnostic::Disconnected {
                moving_plate_id,
                fixed_plate_id,
            } => write!(
                f,
                "edge {moving_plate_id} rel {fixed_plate_id} has no path to the anchor plate"
            ),
        }
    }
}
