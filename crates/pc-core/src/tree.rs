use std::collections::HashMap;

use crate::diagnostics::CircuitDiagnostic;
use crate::pole::PlateId;
use crate::quaternion::Quaternion;

/// One edge of a reconstruction tree: the motion of a moving plate relative
/// to its fixed plate at the tree's time, plus the fully composed
/// anchor-relative rotation.
///
/// Edges live in an arena owned by their tree. Parent/child links are arena
/// indices resolved through the tree's navigation methods, so there are no
/// pointer cycles to manage.
#[derive(Clone, Debug)]
pub struct TreeEdge {
    pub moving_plate_id: PlateId,
    pub fixed_plate_id: PlateId,
    /// Moving plate relative to its fixed plate, at the tree's time.
    pub relative_rotation: Quaternion,
    /// Moving plate relative to the anchor plate, at the tree's time.
    pub composed_rotation: Quaternion,
    /// True when the pole data defined this pair in the opposite direction
    /// and the rotation was inverted while re-rooting at the anchor.
    pub reversed: bool,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
}

/// The plate-motion hierarchy at a single reconstruction time, rooted at an
/// anchor plate. Built once by [`crate::builder::build_tree`], immutable
/// thereafter.
#[derive(Clone, Debug)]
pub struct ReconstructionTree {
    pub(crate) time: f64,
    pub(crate) anchor_plate_id: PlateId,
    pub(crate) edges: Vec<TreeEdge>,
    pub(crate) edge_index: HashMap<PlateId, usize>,
    pub(crate) root_edges: Vec<usize>,
    pub(crate) diagnostics: Vec<CircuitDiagnostic>,
}

impl ReconstructionTree {
    /// The reconstruction time this tree was built for, in Ma.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The plate all composed rotations are relative to.
    pub fn anchor_plate_id(&self) -> PlateId {
        self.anchor_plate_id
    }

    /// The edge whose moving plate is `plate_id`, if the plate is in the
    /// circuit.
    pub fn get_edge(&self, plate_id: PlateId) -> Option<&TreeEdge> {
        self.edge_index.get(&plate_id).map(|&i| &self.edges[i])
    }

    /// All edges, in the order the builder placed them (breadth-first from
    /// the anchor). Stable within a single build only.
    pub fn edges(&self) -> impl Iterator<Item = &TreeEdge> {
        self.edges.iter()
    }

    /// Edges whose fixed plate is the anchor itself.
    pub fn root_edges(&self) -> impl Iterator<Item = &TreeEdge> {
        self.root_edges.iter().map(|&i| &self.edges[i])
    }

    /// The edge one step closer to the anchor, if `plate_id` is in the
    /// circuit and not a root.
    pub fn parent_edge(&self, plate_id: PlateId) -> Option<&TreeEdge> {
        let edge = self.get_edge(plate_id)?;
        edge.parent.map(|i| &self.edges[i])
    }

    /// Edges whose fixed plate is `plate_id`. For the anchor plate this is
    /// the set of root edges.
    pub fn child_edges(&self, plate_id: PlateId) -> impl Iterator<Item = &TreeEdge> {
        let indices: &[usize] = if plate_id == self.anchor_plate_id {
            &self.root_edges
        } else {
            self.edge_index
                .get(&plate_id)
                .map(|&i| self.edges[i].children.as_slice())
                .unwrap_or(&[])
        };
        indices.iter().map(|&i| &self.edges[i])
    }

    /// Rotation of `plate_id` relative to the anchor at this tree's time.
    /// The anchor itself never moves relative to itself; plates outside the
    /// circuit return `None` and the caller applies its missing-plate
    /// policy.
    pub fn get_equivalent_rotation(&self, plate_id: PlateId) -> Option<Quaternion> {
        if plate_id == self.anchor_plate_id {
            return Some(Quaternion::identity());
        }
        self.get_edge(plate_id).map(|e| e.composed_rotation)
    }

    /// Recoverable conditions recorded while this tree was built.
    pub fn diagnostics(&self) -> &[CircuitDiagnostic] {
        &self.diagnostics
    }

    /// Number of edges in the tree.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
