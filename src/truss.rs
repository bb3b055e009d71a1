//! Editable truss model consumed by the analysis pipeline.

use petgraph::graph::{EdgeIndex, Graph, NodeIndex};

use crate::errors::TrussEditError;
use crate::geometry::{Load, Point};

/// Internal representation of a truss joint.
#[derive(Clone, Debug)]
pub(crate) struct Joint {
    /// Position of the joint in metres.
    pub(crate) position: Point,
    /// Indicator for each translational degree of freedom that is restrained.
    pub(crate) restraint: [bool; 3],
    /// Point loads applied to the joint; they sum during analysis.
    pub(crate) loads: Vec<Load>,
}

impl Joint {
    fn new(position: Point) -> Self {
        Self {
            position,
            restraint: [false, false, false],
            loads: Vec::new(),
        }
    }

    /// A joint counts as a support when any axis is restrained. A fully
    /// pinned support restrains all three.
    pub(crate) fn is_support(&self) -> bool {
        self.restraint.iter().any(|&fixed| fixed)
    }
}

/// Internal representation of a truss member.
///
/// A member is purely an axial link between two joints; material and
/// cross-section are analysis-wide parameters in this model.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Member;

/// Container for a pin-jointed truss model.
///
/// Joints and members live in a graph arena addressed by stable
/// [`NodeIndex`]/[`EdgeIndex`] handles; adjacency is derived from the graph,
/// never stored as mutual references.
#[derive(Clone, Debug, Default)]
pub struct Truss {
    /// Underlying graph storage for joints and members.
    graph: Graph<Joint, Member, petgraph::Undirected>,
}

impl Truss {
    /// Create an empty truss.
    ///
    /// # Examples
    /// ```
    /// use trussolve::Truss;
    ///
    /// let truss = Truss::new();
    /// assert_eq!(truss.joint_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: Graph::default(),
        }
    }

    /// Return the number of joints in the truss.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members in the truss.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a new joint to the truss.
    pub fn add_joint(&mut self, position: Point) -> NodeIndex {
        self.graph.add_node(Joint::new(position))
    }

    /// Update the position of an existing joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of
    /// this truss.
    pub fn move_joint(&mut self, joint: NodeIndex, position: Point) -> Result<(), TrussEditError> {
        match self.graph.node_weight_mut(joint) {
            Some(node) => {
                node.position = position;
                Ok(())
            }
            None => Err(TrussEditError::UnknownJoint(joint)),
        }
    }

    /// Remove a joint and all connected members from the truss.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of
    /// this truss.
    pub fn remove_joint(&mut self, joint: NodeIndex) -> Result<(), TrussEditError> {
        if self.graph.remove_node(joint).is_some() {
            Ok(())
        } else {
            Err(TrussEditError::UnknownJoint(joint))
        }
    }

    /// Connect two joints with a new member.
    pub fn add_member(&mut self, start: NodeIndex, end: NodeIndex) -> EdgeIndex {
        self.graph.add_edge(start, end, Member)
    }

    /// Remove a member from the truss.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownMember`] when `member` is not part of
    /// this truss.
    pub fn remove_member(&mut self, member: EdgeIndex) -> Result<(), TrussEditError> {
        if self.graph.remove_edge(member).is_some() {
            Ok(())
        } else {
            Err(TrussEditError::UnknownMember(member))
        }
    }

    /// Set the restraint state for a joint.
    ///
    /// Each entry in `restraint` corresponds to the X, Y and Z directions
    /// respectively; `true` fixes that degree of freedom. A pinned support is
    /// `[true, true, true]`.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of
    /// this truss.
    pub fn set_support(
        &mut self,
        joint: NodeIndex,
        restraint: [bool; 3],
    ) -> Result<(), TrussEditError> {
        match self.graph.node_weight_mut(joint) {
            Some(node) => {
                node.restraint = restraint;
                Ok(())
            }
            None => Err(TrussEditError::UnknownJoint(joint)),
        }
    }

    /// Apply an additional point load to a joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of
    /// this truss.
    pub fn add_load(&mut self, joint: NodeIndex, load: Load) -> Result<(), TrussEditError> {
        match self.graph.node_weight_mut(joint) {
            Some(node) => {
                node.loads.push(load);
                Ok(())
            }
            None => Err(TrussEditError::UnknownJoint(joint)),
        }
    }

    /// Remove every load from a joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of
    /// this truss.
    pub fn clear_loads(&mut self, joint: NodeIndex) -> Result<(), TrussEditError> {
        match self.graph.node_weight_mut(joint) {
            Some(node) => {
                node.loads.clear();
                Ok(())
            }
            None => Err(TrussEditError::UnknownJoint(joint)),
        }
    }

    /// Retrieve the position of a joint.
    #[must_use]
    pub fn joint_position(&self, joint: NodeIndex) -> Option<Point> {
        self.graph.node_weight(joint).map(|node| node.position)
    }

    /// Retrieve the restraint state of a joint.
    #[must_use]
    pub fn joint_restraint(&self, joint: NodeIndex) -> Option<[bool; 3]> {
        self.graph.node_weight(joint).map(|node| node.restraint)
    }

    /// The endpoints of a member, when it still exists.
    #[must_use]
    pub fn member_endpoints(&self, member: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(member)
    }

    /// Read-only access to the underlying graph for the partitioner.
    pub(crate) fn graph(&self) -> &Graph<Joint, Member, petgraph::Undirected> {
        &self.graph
    }
}
