#![warn(clippy::all)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod assembly;
pub mod errors;
pub mod geometry;
pub mod matrix;
pub mod partition;
pub mod report;
pub mod solver;
pub mod truss;

pub use analysis::{analyze, analyze_substructure, AnalysisParams, SubstructureOutcome, SubstructureResult};
pub use errors::{AnalysisError, SolveError, TrussEditError};
pub use geometry::{point, Displacement, Force, Load, Point};
pub use matrix::Matrix;
pub use partition::{find_substructures, Substructure};
pub use report::render_report;
pub use truss::Truss;
