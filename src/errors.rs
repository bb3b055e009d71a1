//! Error types produced while editing or analysing trusses.

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

/// Error returned when editing a [`Truss`](crate::Truss) with invalid handles.
///
/// Attempting to mutate the structure with a joint or member that is not part
/// of the current graph returns a descriptive variant so callers can decide
/// how to recover.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrussEditError {
    /// Returned when a joint cannot be found in the truss.
    #[error("joint {0:?} does not exist in this truss")]
    UnknownJoint(NodeIndex),
    /// Returned when a member cannot be found in the truss.
    #[error("member {0:?} does not exist in this truss")]
    UnknownMember(EdgeIndex),
}

/// Error returned by the elimination routines in [`solver`](crate::solver).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// Returned when a pivot falls below the singularity tolerance.
    #[error("matrix is singular or near-singular at column {column}")]
    Singular {
        /// Elimination column whose pivot vanished.
        column: usize,
    },
}

/// Error describing why one substructure could not be analysed.
///
/// Each variant is scoped to a single substructure; a failed component never
/// aborts the analysis of the others.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the elastic modulus is zero or negative.
    #[error("elastic modulus must be positive (received {0})")]
    NonPositiveElasticModulus(f64),
    /// Returned when the cross-sectional area is zero or negative.
    #[error("cross-sectional area must be positive (received {0})")]
    NonPositiveArea(f64),
    /// Returned when a substructure has no support joints at all.
    #[error("no support joints; structure is unstable")]
    Unsupported,
    /// Returned when every degree of freedom is constrained.
    #[error("all degrees of freedom are constrained")]
    FullyConstrained,
    /// Returned when the reduced stiffness system cannot be solved.
    #[error("failed to solve system; structure may be singular or unstable")]
    Singular {
        /// The elimination failure that triggered this error.
        #[source]
        source: SolveError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let edit = TrussEditError::UnknownJoint(NodeIndex::new(7));
        assert!(edit.to_string().contains("does not exist"));

        let solve = SolveError::Singular { column: 3 };
        assert!(solve.to_string().contains("column 3"));

        let analysis = AnalysisError::Singular { source: solve };
        assert!(analysis.to_string().contains("singular or unstable"));
    }
}
