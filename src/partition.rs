//! Decomposition of a truss into independent connected substructures.
//!
//! Components share no stiffness coupling, so solving them jointly would
//! either be singular or waste the block structure. Splitting them first also
//! lets the orchestrator analyse them in parallel.

use std::collections::{HashMap, HashSet};

use nalgebra::Vector3;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::geometry::{Force, Point};
use crate::truss::Truss;

/// Summed joint loads with a magnitude at or below this threshold are
/// treated as unloaded.
pub const LOAD_THRESHOLD: f64 = 1e-3;

/// A member of a substructure, with endpoints as local joint indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubMember {
    /// Handle of the member in the originating truss.
    pub handle: EdgeIndex,
    /// Local index of the first endpoint.
    pub start: usize,
    /// Local index of the second endpoint.
    pub end: usize,
}

/// One maximal connected component of a truss, snapshotted for analysis.
///
/// Joints are assigned local indices `0..n` in discovery order; all other
/// fields are keyed by those indices. The snapshot owns every value it needs,
/// so analysis never reads back into the [`Truss`] it came from.
#[derive(Clone, Debug)]
pub struct Substructure {
    /// Handles of the joints in this component, in local index order.
    pub joints: Vec<NodeIndex>,
    /// Joint positions, parallel to `joints`.
    pub positions: Vec<Point>,
    /// Per-axis restraint flags, parallel to `joints`.
    pub restraints: Vec<[bool; 3]>,
    /// Members whose endpoints both lie in this component.
    pub members: Vec<SubMember>,
    /// Neighbour lists derived from `members`.
    pub adjacency: Vec<Vec<usize>>,
    /// Local indices of joints with at least one restrained axis.
    pub supports: Vec<usize>,
    /// Summed load per loaded joint; only entries whose magnitude exceeds
    /// [`LOAD_THRESHOLD`] are present.
    pub loads: HashMap<usize, Force>,
}

impl Substructure {
    /// Number of joints in this component.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Number of members in this component.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Total translational degrees of freedom (three per joint).
    #[must_use]
    pub fn dof_count(&self) -> usize {
        self.joints.len() * 3
    }
}

/// Partition a truss into maximal connected components.
///
/// Joints are visited in arena order; each unvisited joint seeds a
/// breadth-first traversal over member adjacency. A member belongs to a
/// component exactly when both endpoints do. Components are never empty; an
/// isolated joint yields a one-joint, zero-member substructure.
#[must_use]
pub fn find_substructures(truss: &Truss) -> Vec<Substructure> {
    let graph = truss.graph();
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut components = Vec::new();

    for start in graph.node_indices() {
        if visited.contains(&start) {
            continue;
        }

        // BFS from this seed.
        let mut joints = Vec::new();
        let mut queue = std::collections::VecDeque::new();
        visited.insert(start);
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            joints.push(node);
            for neighbour in graph.neighbors(node) {
                if !visited.contains(&neighbour) {
                    visited.insert(neighbour);
                    queue.push_back(neighbour);
                }
            }
        }

        components.push(build_substructure(truss, joints));
    }

    components
}

/// Snapshot one component's joints, members, supports and loads.
fn build_substructure(truss: &Truss, joints: Vec<NodeIndex>) -> Substructure {
    let graph = truss.graph();

    let index_of: HashMap<NodeIndex, usize> = joints
        .iter()
        .enumerate()
        .map(|(idx, &node)| (node, idx))
        .collect();

    let mut positions = Vec::with_capacity(joints.len());
    let mut restraints = Vec::with_capacity(joints.len());
    let mut supports = Vec::new();
    let mut loads = HashMap::new();
    for (idx, &node) in joints.iter().enumerate() {
        let joint = &graph[node];
        positions.push(joint.position);
        restraints.push(joint.restraint);
        if joint.is_support() {
            supports.push(idx);
        }

        let total: Vector3<f64> = joint
            .loads
            .iter()
            .map(crate::geometry::Load::force_vector)
            .sum();
        if total.norm() > LOAD_THRESHOLD {
            loads.insert(idx, Force::from(total));
        }
    }

    let mut members = Vec::new();
    let mut adjacency = vec![Vec::new(); joints.len()];
    for edge in graph.edge_references() {
        let (start, end) = (
            index_of.get(&edge.source()).copied(),
            index_of.get(&edge.target()).copied(),
        );
        match (start, end) {
            (Some(start), Some(end)) => {
                members.push(SubMember {
                    handle: edge.id(),
                    start,
                    end,
                });
                adjacency[start].push(end);
                adjacency[end].push(start);
            }
            (None, None) => {} // belongs to another component
            _ => {
                // A member can never straddle two components.
                debug_assert!(false, "member endpoints split across components");
            }
        }
    }

    Substructure {
        joints,
        positions,
        restraints,
        members,
        adjacency,
        supports,
        loads,
    }
}
