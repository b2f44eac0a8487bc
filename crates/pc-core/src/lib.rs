//! Plate circuit reconstruction engine.
//!
//! Reconstructs the relative motion of tectonic plates through geological
//! time from discrete total reconstruction poles: quaternion rotation
//! algebra, temporal pole interpolation, anchored reconstruction-tree
//! assembly with re-rooting, and the four canonical rotation queries
//! (equivalent/relative × total/stage).
//!
//! Zero I/O — pure math engine with no opinions about transport,
//! persistence, or caching. The companion `pc-engine` crate layers the
//! bounded tree cache and query facade on top.

pub mod builder;
pub mod compose;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod interpolate;
pub mod pole;
pub mod quaternion;
pub mod serde_compat;
pub mod tree;

pub use builder::build_tree;
pub use compose::{
    MissingPlatePolicy, equivalent_stage_rotation, equivalent_total_rotation,
    relative_stage_rotation, relative_total_rotation,
};
pub use constants::{
    DEFAULT_ANCHOR_PLATE, DEFAULT_CACHE_SIZE, EPSILON, PRESENT_DAY, SLERP_THRESHOLD, TIME_EPSILON,
};
pub use diagnostics::CircuitDiagnostic;
pub use error::{CircuitError, Result};
pub use interpolate::rotation_at;
pub use pole::{PlateId, PoleSequence, RotationSample};
pub use quaternion::Quaternion;
pub use serde_compat::{WIRE_VERSION, export_json, import_json};
pub use tree::{ReconstructionTree, TreeEdge};
