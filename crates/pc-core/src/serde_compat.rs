//! JSON wire format for pole data.
//!
//! External loaders (rotation-file parsers, bindings) hand the engine its
//! input in this format rather than the engine reading files itself. The
//! wire format uses camelCase field names and stores rotations as
//! `[w, x, y, z]` arrays; import normalizes every rotation and re-sorts
//! samples by time.

use serde::{Deserialize, Serialize};

use crate::pole::{PlateId, PoleSequence, RotationSample};
use crate::quaternion::Quaternion;

pub const WIRE_VERSION: &str = "1";

// --- Wire format types ---

#[derive(Serialize, Deserialize, Debug)]
pub struct WireExport {
    pub version: String,
    pub poles: Vec<WirePoleSequence>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WirePoleSequence {
    #[serde(rename = "movingPlateId")]
    pub moving_plate_id: PlateId,
    #[serde(rename = "fixedPlateId")]
    pub fixed_plate_id: PlateId,
    #[serde(default)]
    pub samples: Vec<WireSample>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireSample {
    pub time: f64,
    pub rotation: [f64; 4],
}

// --- Conversions ---

impl From<&PoleSequence> for WirePoleSequence {
    fn from(seq: &PoleSequence) -> Self {
        Self {
            moving_plate_id: seq.moving_plate_id,
            fixed_plate_id: seq.fixed_plate_id,
            samples: seq
                .samples
                .iter()
                .map(|s| WireSample {
                    time: s.time,
                    rotation: s.rotation.to_array(),
                })
                .collect(),
        }
    }
}

impl From<WirePoleSequence> for PoleSequence {
    fn from(wire: WirePoleSequence) -> Self {
        let samples = wire
            .samples
            .into_iter()
            .map(|s| RotationSample::new(s.time, Quaternion::from_array(s.rotation)))
            .collect();
        PoleSequence::new(wire.moving_plate_id, wire.fixed_plate_id, samples)
    }
}

/// Serialize pole data to the versioned JSON wire format.
pub fn export_json(poles: &[PoleSequence]) -> serde_json::Result<String> {
    let export = WireExport {
        version: WIRE_VERSION.to_string(),
        poles: poles.iter().map(WirePoleSequence::from).collect(),
    };
    serde_json::to_string(&export)
}

/// Deserialize pole data from the JSON wire format.
pub fn import_json(json: &str) -> serde_json::Result<Vec<PoleSequence>> {
    let export: WireExport = serde_json::from_str(json)?;
    Ok(export.poles.into_iter().map(PoleSequence::from).collect())
}
