use std::sync::Arc;

use pc_core::{
    DEFAULT_ANCHOR_PLATE, MissingPlatePolicy, PRESENT_DAY, PlateId, PoleSequence, Quaternion,
    ReconstructionTree, TIME_EPSILON, build_tree, equivalent_stage_rotation,
    equivalent_total_rotation, relative_stage_rotation, relative_total_rotation,
};

use crate::cache::ReconstructionTreeCache;
use crate::config::EngineConfig;
use crate::error::Result;

/// Parameters for a rotation query. Construct with [`RotationQuery::total`]
/// and override fields with struct-update syntax:
///
/// ```
/// use pc_engine::RotationQuery;
///
/// let query = RotationQuery {
///     fixed_plate_id: Some(802),
///     from_time: 50.0,
///     ..RotationQuery::total(100.0, 801)
/// };
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RotationQuery {
    /// Reconstruction time the rotation targets, in Ma.
    pub to_time: f64,
    pub moving_plate_id: PlateId,
    /// Start time for stage rotations, in Ma. Present day (the default)
    /// selects a total rotation.
    pub from_time: f64,
    /// When set, the rotation is relative to this plate instead of the
    /// anchor.
    pub fixed_plate_id: Option<PlateId>,
    pub anchor_plate_id: PlateId,
    pub missing_plate_policy: MissingPlatePolicy,
}

impl RotationQuery {
    /// Total rotation of `moving_plate_id` relative to the default anchor,
    /// present day → `to_time`.
    pub fn total(to_time: f64, moving_plate_id: PlateId) -> Self {
        Self {
            to_time,
            moving_plate_id,
            from_time: PRESENT_DAY,
            fixed_plate_id: None,
            anchor_plate_id: DEFAULT_ANCHOR_PLATE,
            missing_plate_policy: MissingPlatePolicy::default(),
        }
    }
}

/// High-level facade: owns the pole data and a bounded tree cache, and
/// answers the four canonical rotation queries.
pub struct ReconstructionEngine {
    poles: Vec<PoleSequence>,
    cache: ReconstructionTreeCache,
}

impl ReconstructionEngine {
    pub fn new(poles: Vec<PoleSequence>) -> Self {
        Self::with_config(poles, EngineConfig::default())
    }

    pub fn with_config(poles: Vec<PoleSequence>, config: EngineConfig) -> Self {
        Self {
            poles,
            cache: ReconstructionTreeCache::new(config.cache_size),
        }
    }

    pub fn poles(&self) -> &[PoleSequence] {
        &self.poles
    }

    pub fn cache(&self) -> &ReconstructionTreeCache {
        &self.cache
    }

    /// The reconstruction tree for `(time, anchor_plate_id)`, reused from
    /// the cache when resident.
    pub fn tree(&self, time: f64, anchor_plate_id: PlateId) -> Arc<ReconstructionTree> {
        self.cache.get_or_build(time, anchor_plate_id, || {
            tracing::debug!(time, anchor_plate_id, "building reconstruction tree");
            let tree = build_tree(&self.poles, time, anchor_plate_id);
            for diag in tree.diagnostics() {
                tracing::warn!(%diag, "plate circuit diagnostic");
            }
            tree
        })
    }

    /// Answer a rotation query, building or reusing the trees it needs.
    ///
    /// Dispatch follows the query shape: a present-day `from_time` selects
    /// a total rotation (one tree); anything else a stage rotation (two
    /// trees, same anchor). A `fixed_plate_id` makes either kind relative
    /// to that plate instead of the anchor.
    ///
    /// `Ok(None)` means a plate had no path to the anchor and the policy
    /// was [`MissingPlatePolicy::NoResult`]: a data gap, not an error.
    pub fn rotation(&self, query: RotationQuery) -> Result<Option<Quaternion>> {
        let policy = query.missing_plate_policy;
        let to_tree = self.tree(query.to_time, query.anchor_plate_id);

        if (query.from_time - PRESENT_DAY).abs() <= TIME_EPSILON {
            return Ok(match query.fixed_plate_id {
                None => equivalent_total_rotation(&to_tree, query.moving_plate_id, policy),
                Some(fixed) => {
                    relative_total_rotation(&to_tree, query.moving_plate_id, fixed, policy)
                }
            });
        }

        let from_tree = self.tree(query.from_time, query.anchor_plate_id);
        let rotation = match query.fixed_plate_id {
            None => equivalent_stage_rotation(
                &from_tree,
                &to_tree,
                query.moving_plate_id,
                policy,
            )?,
            Some(fixed) => relative_stage_rotation(
                &from_tree,
                &to_tree,
                query.moving_plate_id,
                fixed,
                policy,
            )?,
        };
        Ok(rotation)
    }
}
