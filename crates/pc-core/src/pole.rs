use serde::{Deserialize, Serialize};

use crate::interpolate::rotation_at;
use crate::quaternion::Quaternion;

/// Plate identifier. Non-negative integers; the anchor is conventionally 0.
pub type PlateId = u32;

/// A single total reconstruction pole: the finite rotation of a moving
/// plate relative to its fixed plate at one geological time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationSample {
    /// Age in millions of years ago. Larger is further in the past.
    pub time: f64,
    pub rotation: Quaternion,
}

impl RotationSample {
    pub fn new(time: f64, rotation: Quaternion) -> Self {
        Self { time, rotation }
    }
}

/// Time-ordered pole samples for one (moving, fixed) plate pair — the raw
/// input unit of the plate circuit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoleSequence {
    pub moving_plate_id: PlateId,
    pub fixed_plate_id: PlateId,
    pub samples: Vec<RotationSample>,
}

impl PoleSequence {
    /// Create a sequence, sorting samples by time. Loaders are expected to
    /// pre-sort but unsorted input is tolerated.
    pub fn new(
        moving_plate_id: PlateId,
        fixed_plate_id: PlateId,
        mut samples: Vec<RotationSample>,
    ) -> Self {
        samples.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            moving_plate_id,
            fixed_plate_id,
            samples,
        }
    }

    /// Interpolated rotation of the moving plate relative to the fixed
    /// plate at `time`. `None` when the sequence has no samples.
    pub fn rotation_at(&self, time: f64) -> Option<Quaternion> {
        rotation_at(&self.samples, time)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
