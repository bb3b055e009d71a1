//! Member geometry and global stiffness assembly for one substructure.

use log::warn;

use crate::matrix::Matrix;
use crate::partition::Substructure;

/// Member lengths below this value are clamped to it, never a hard failure.
pub const MIN_MEMBER_LENGTH: f64 = 1e-6;

/// Geometric properties of one member, recomputed every analysis run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberProperty {
    /// Local index of the first endpoint.
    pub start: usize,
    /// Local index of the second endpoint.
    pub end: usize,
    /// Member length in metres, clamped to [`MIN_MEMBER_LENGTH`].
    pub length: f64,
    /// Direction cosine along X, from start towards end.
    pub cx: f64,
    /// Direction cosine along Y.
    pub cy: f64,
    /// Direction cosine along Z.
    pub cz: f64,
}

/// Compute length and direction cosines for every member of a substructure.
///
/// Degenerate (near zero-length) members are clamped to
/// [`MIN_MEMBER_LENGTH`] and reported with a warning; analysis continues.
#[must_use]
pub fn member_properties(substructure: &Substructure) -> Vec<MemberProperty> {
    substructure
        .members
        .iter()
        .map(|member| {
            let delta = substructure.positions[member.end].to_vector()
                - substructure.positions[member.start].to_vector();
            let mut length = delta.norm();
            if length < MIN_MEMBER_LENGTH {
                warn!(
                    "zero-length member between joints {} and {}; clamping length to {MIN_MEMBER_LENGTH}",
                    member.start, member.end
                );
                length = MIN_MEMBER_LENGTH;
            }
            MemberProperty {
                start: member.start,
                end: member.end,
                length,
                cx: delta.x / length,
                cy: delta.y / length,
                cz: delta.z / length,
            }
        })
        .collect()
}

/// The six global degree-of-freedom indices touched by a member.
pub(crate) fn member_dofs(member: &MemberProperty) -> [usize; 6] {
    [
        member.start * 3,
        member.start * 3 + 1,
        member.start * 3 + 2,
        member.end * 3,
        member.end * 3 + 1,
        member.end * 3 + 2,
    ]
}

/// 6x6 stiffness of one member in global coordinates.
///
/// With `k = EA/L` and direction cosines `c`, the matrix is the outer product
/// `k * (c ⊗ c)` repeated over the two endpoint blocks with signs
/// `[[+, -], [-, +]]`: the member resists relative motion along its own axis
/// and contributes nothing perpendicular to it.
#[must_use]
pub fn local_stiffness(member: &MemberProperty, elastic_modulus: f64, area: f64) -> Matrix {
    let k = elastic_modulus * area / member.length;
    let cosines = [member.cx, member.cy, member.cz];

    let mut stiffness = Matrix::zeros(6, 6);
    for i in 0..3 {
        for j in 0..3 {
            let value = k * cosines[i] * cosines[j];
            stiffness[(i, j)] = value;
            stiffness[(i + 3, j + 3)] = value;
            stiffness[(i, j + 3)] = -value;
            stiffness[(i + 3, j)] = -value;
        }
    }
    stiffness
}

/// Assemble the global stiffness matrix for a substructure.
///
/// Each member's 6x6 stiffness is scatter-added into the `3n x 3n` system at
/// its endpoints' degree-of-freedom indices.
#[must_use]
pub fn assemble_stiffness(
    substructure: &Substructure,
    members: &[MemberProperty],
    elastic_modulus: f64,
    area: f64,
) -> Matrix {
    let dof = substructure.dof_count();
    let mut global = Matrix::zeros(dof, dof);
    for member in members {
        let local = local_stiffness(member, elastic_modulus, area);
        let dofs = member_dofs(member);
        for (i, &row) in dofs.iter().enumerate() {
            for (j, &col) in dofs.iter().enumerate() {
                global[(row, col)] += local[(i, j)];
            }
        }
    }
    global
}

/// Assemble the global load vector from the substructure's summed joint loads.
#[must_use]
pub fn assemble_loads(substructure: &Substructure) -> Vec<f64> {
    let mut loads = vec![0.0; substructure.dof_count()];
    for (&joint, load) in &substructure.loads {
        loads[joint * 3] = load.x;
        loads[joint * 3 + 1] = load.y;
        loads[joint * 3 + 2] = load.z;
    }
    loads
}
