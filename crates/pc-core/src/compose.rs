//! Stateless rotation queries over one or two reconstruction trees.
//!
//! The four canonical queries combine equivalent (anchor-relative)
//! rotations looked up in already-built trees. "Total" rotations run from
//! present day to a tree's time; "stage" rotations run between the times
//! of two trees sharing an anchor.

use crate::error::{CircuitError, Result};
use crate::pole::PlateId;
use crate::quaternion::Quaternion;
use crate::tree::ReconstructionTree;

/// How rotation queries treat a plate with no path to the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingPlatePolicy {
    /// Substitute the identity rotation — the "no known motion" assumption.
    #[default]
    UseIdentity,
    /// Report no result for the whole query.
    NoResult,
}

fn resolve(
    tree: &ReconstructionTree,
    plate: PlateId,
    policy: MissingPlatePolicy,
) -> Option<Quaternion> {
    match tree.get_equivalent_rotation(plate) {
        Some(q) => Some(q),
        None => match policy {
            MissingPlatePolicy::UseIdentity => Some(Quaternion::identity()),
            MissingPlatePolicy::NoResult => None,
        },
    }
}

fn check_anchors(from: &ReconstructionTree, to: &ReconstructionTree) -> Result<()> {
    if from.anchor_plate_id() != to.anchor_plate_id() {
        return Err(CircuitError::AnchorMismatch {
            from_anchor: from.anchor_plate_id(),
            to_anchor: to.anchor_plate_id(),
        });
    }
    Ok(())
}

/// Rotation of `moving` relative to the anchor, present day → the tree's
/// time.
pub fn equivalent_total_rotation(
    tree: &ReconstructionTree,
    moving: PlateId,
    policy: MissingPlatePolicy,
) -> Option<Quaternion> {
    resolve(tree, moving, policy)
}

/// Rotation of `moving` relative to `fixed`, both looked up at the tree's
/// time: `inverse(equiv(fixed)) * equiv(moving)`.
pub fn relative_total_rotation(
    tree: &ReconstructionTree,
    moving: PlateId,
    fixed: PlateId,
    policy: MissingPlatePolicy,
) -> Option<Quaternion> {
    let m = resolve(tree, moving, policy)?;
    let f = resolve(tree, fixed, policy)?;
    Some(f.inverse() * m)
}

/// Rotation carrying `moving` (anchor-relative) from its position at the
/// `from` tree's time to its position at the `to` tree's time:
/// `equiv_to(moving) * inverse(equiv_from(moving))`.
///
/// The two trees must share an anchor plate; mixing anchors is a caller
/// error, not a data condition.
pub fn equivalent_stage_rotation(
    from: &ReconstructionTree,
    to: &ReconstructionTree,
    moving: PlateId,
    policy: MissingPlatePolicy,
) -> Result<Option<Quaternion>> {
    check_anchors(from, to)?;
    let Some(q_to) = resolve(to, moving, policy) else {
        return Ok(None);
    };
    let Some(q_from) = resolve(from, moving, policy) else {
        return Ok(None);
    };
    Ok(Some(q_to * q_from.inverse()))
}

/// Stage rotation of `moving` relative to `fixed` between the two trees'
/// times: the relative-total rotation at `to` composed with the inverse of
/// the relative-total rotation at `from`.
pub fn relative_stage_rotation(
    from: &ReconstructionTree,
    to: &ReconstructionTree,
    moving: PlateId,
    fixed: PlateId,
    policy: MissingPlatePolicy,
) -> Result<Option<Quaternion>> {
    check_anchors(from, to)?;
    let Some(rel_to) = relative_total_rotation(to, moving, fixed, policy) else {
        return Ok(None);
    };
    let Some(rel_from) = relative_total_rotation(from, moving, fixed, policy) else {
        return Ok(None);
    };
    Ok(Some(rel_to * rel_from.inverse()))
}
