//! Assembles a reconstruction tree from raw pole sequences.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::diagnostics::CircuitDiagnostic;
use crate::pole::{PlateId, PoleSequence};
use crate::quaternion::Quaternion;
use crate::tree::{ReconstructionTree, TreeEdge};

struct Candidate {
    moving: PlateId,
    fixed: PlateId,
    relative: Quaternion,
}

/// Build the reconstruction tree for `time`, anchored at `anchor_plate_id`.
///
/// One edge is selected per distinct moving plate (first definition in
/// input order wins) and its instantaneous rotation interpolated at `time`.
/// A breadth-first traversal from the anchor then composes anchor-relative
/// rotations root-to-leaf: a root edge's composed rotation is its relative
/// rotation; a deeper edge's is `parent.composed * relative`.
///
/// The anchor may be any plate in the circuit, not just the conventional
/// absolute frame: an edge whose *moving* plate is reached first is
/// traversed in reverse, re-rooting the hierarchy with the edge's rotation
/// inverted.
///
/// Edges that would close a loop are dropped, and edges whose fixed-plate
/// chain never reaches the anchor are excluded. Both conditions are
/// recorded as diagnostics on the returned tree, never as failures.
pub fn build_tree(
    poles: &[PoleSequence],
    time: f64,
    anchor_plate_id: PlateId,
) -> ReconstructionTree {
    let mut diagnostics = Vec::new();

    // Select one candidate edge per moving plate, first definition wins.
    // An insertion-order scan, not an incidental map iteration order: the
    // duplicate policy is deliberate and observable.
    let mut selected: Vec<Candidate> = Vec::new();
    let mut selected_fixed: HashMap<PlateId, PlateId> = HashMap::new();
    for seq in poles {
        if let Some(&first_fixed) = selected_fixed.get(&seq.moving_plate_id) {
            diagnostics.push(CircuitDiagnostic::DuplicateSequence {
                moving_plate_id: seq.moving_plate_id,
                selected_fixed: first_fixed,
                ignored_fixed: seq.fixed_plate_id,
            });
            continue;
        }
        let Some(relative) = seq.rotation_at(time) else {
            diagnostics.push(CircuitDiagnostic::EmptySequence {
                moving_plate_id: seq.moving_plate_id,
                fixed_plate_id: seq.fixed_plate_id,
            });
            continue;
        };
        selected_fixed.insert(seq.moving_plate_id, seq.fixed_plate_id);
        selected.push(Candidate {
            moving: seq.moving_plate_id,
            fixed: seq.fixed_plate_id,
            relative,
        });
    }

    // Adjacency in both directions, input order preserved within each key.
    let mut by_fixed: HashMap<PlateId, Vec<usize>> = HashMap::new();
    let mut by_moving: HashMap<PlateId, Vec<usize>> = HashMap::new();
    for (i, c) in selected.iter().enumerate() {
        by_fixed.entry(c.fixed).or_default().push(i);
        by_moving.entry(c.moving).or_default().push(i);
    }

    // Breadth-first from the anchor, composing as we go. Forward candidates
    // at a plate are edges fixed to it; reversed candidates are edges that
    // move it, traversed against their data direction.
    let mut edges: Vec<TreeEdge> = Vec::new();
    let mut edge_index: HashMap<PlateId, usize> = HashMap::new();
    let mut root_edges: Vec<usize> = Vec::new();
    let mut reached: HashSet<PlateId> = HashSet::from([anchor_plate_id]);
    let mut consumed: HashSet<usize> = HashSet::new();
    let mut queue: VecDeque<(PlateId, Option<usize>)> = VecDeque::from([(anchor_plate_id, None)]);

    while let Some((plate, parent)) = queue.pop_front() {
        let forward = by_fixed.get(&plate).into_iter().flatten().map(|&ci| (ci, false));
        let reversed = by_moving.get(&plate).into_iter().flatten().map(|&ci| (ci, true));

        for (ci, reverse) in forward.chain(reversed) {
            if !consumed.insert(ci) {
                // Already placed or dropped, typically the edge we arrived
                // through seen again from its other endpoint.
                continue;
            }
            let c = &selected[ci];
            let (moving, fixed, relative) = if reverse {
                (c.fixed, c.moving, c.relative.inverse())
            } else {
                (c.moving, c.fixed, c.relative)
            };
            if reached.contains(&moving) {
                diagnostics.push(CircuitDiagnostic::CyclicEdge {
                    moving_plate_id: c.moving,
                    fixed_plate_id: c.fixed,
                });
                continue;
            }
            let composed = match parent {
                Some(p) => edges[p].composed_rotation * relative,
                None => relative,
            };
            let idx = edges.len();
            edges.push(TreeEdge {
                moving_plate_id: moving,
                fixed_plate_id: fixed,
                relative_rotation: relative,
                composed_rotation: composed,
                reversed: reverse,
                parent,
                children: Vec::new(),
            });
            edge_index.insert(moving, idx);
            match parent {
                Some(p) => edges[p].children.push(idx),
                None => root_edges.push(idx),
            }
            reached.insert(moving);
            queue.push_back((moving, Some(idx)));
        }
    }

    // Whatever was never consumed sits in a sub-circuit disconnected from
    // the anchor. Absent from the tree, not an error.
    for (i, c) in selected.iter().enumerate() {
        if !consumed.contains(&i) {
            diagnostics.push(CircuitDiagnostic::Disconnected {
                moving_plate_id: c.moving,
                fixed_plate_id: c.fixed,
            });
        }
    }

    ReconstructionTree {
        time,
        anchor_plate_id,
        edges,
        edge_index,
        root_edges,
        diagnostics,
    }
}
