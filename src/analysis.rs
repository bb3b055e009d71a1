//! Per-substructure direct stiffness analysis and the whole-model driver.

use std::collections::HashMap;

use log::debug;
use rayon::prelude::*;

use crate::assembly::{assemble_loads, assemble_stiffness, member_properties, MemberProperty};
use crate::errors::AnalysisError;
use crate::geometry::{Displacement, Force};
use crate::matrix::Matrix;
use crate::partition::{find_substructures, Substructure};
use crate::solver;
use crate::truss::Truss;

/// Analysis-wide material and section parameters, applied to every member.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisParams {
    /// Modulus of elasticity in pascals. Must be strictly positive.
    pub elastic_modulus: f64,
    /// Cross-sectional area in square metres. Must be strictly positive.
    pub area: f64,
}

impl Default for AnalysisParams {
    /// Structural steel (200 GPa) with a 10 cm^2 section.
    fn default() -> Self {
        Self {
            elastic_modulus: 200.0e9,
            area: 0.01,
        }
    }
}

impl AnalysisParams {
    /// Check that both parameters are strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NonPositiveElasticModulus`] or
    /// [`AnalysisError::NonPositiveArea`] on the first violation.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.elastic_modulus <= 0.0 {
            return Err(AnalysisError::NonPositiveElasticModulus(
                self.elastic_modulus,
            ));
        }
        if self.area <= 0.0 {
            return Err(AnalysisError::NonPositiveArea(self.area));
        }
        Ok(())
    }
}

/// Solved response of one substructure.
#[derive(Clone, Debug, PartialEq)]
pub struct SubstructureResult {
    /// Joint displacements, parallel to the substructure's joint list.
    /// Restrained axes are exactly zero.
    pub displacements: Vec<Displacement>,
    /// Signed axial force per member, ordered as the substructure's member
    /// list. Positive is tension, negative is compression.
    pub member_forces: Vec<f64>,
    /// Reaction force per support joint, keyed by local joint index.
    pub reactions: HashMap<usize, Force>,
}

/// Analysis outcome for one substructure: the snapshot it was computed from
/// and either a result or the error that stopped it.
#[derive(Clone, Debug)]
pub struct SubstructureOutcome {
    /// The component this outcome belongs to.
    pub substructure: Substructure,
    /// The solved response, or the per-component failure.
    pub outcome: Result<SubstructureResult, AnalysisError>,
}

/// Analyse every independent substructure of a truss.
///
/// Components are mutually independent, so they are solved in parallel. A
/// failed component reports its own error and never aborts the others.
#[must_use]
pub fn analyze(truss: &Truss, params: AnalysisParams) -> Vec<SubstructureOutcome> {
    let substructures = find_substructures(truss);
    debug!("analysing {} independent substructure(s)", substructures.len());
    substructures
        .into_par_iter()
        .map(|substructure| {
            let outcome = analyze_substructure(&substructure, params);
            SubstructureOutcome {
                substructure,
                outcome,
            }
        })
        .collect()
}

/// Run the direct stiffness pipeline on a single substructure.
///
/// # Errors
///
/// Returns an [`AnalysisError`] when the parameters are invalid, the
/// component has no supports, every degree of freedom is constrained, or the
/// reduced stiffness system is singular.
pub fn analyze_substructure(
    substructure: &Substructure,
    params: AnalysisParams,
) -> Result<SubstructureResult, AnalysisError> {
    params.validate()?;
    if substructure.supports.is_empty() {
        return Err(AnalysisError::Unsupported);
    }

    let dof = substructure.dof_count();
    debug!(
        "direct stiffness analysis: {} joints, {} members, {dof} DOF",
        substructure.joint_count(),
        substructure.member_count()
    );

    let members = member_properties(substructure);
    let stiffness = assemble_stiffness(
        substructure,
        &members,
        params.elastic_modulus,
        params.area,
    );
    let loads = assemble_loads(substructure);

    // Fix every restrained DOF, keep the rest.
    let mut is_fixed = vec![false; dof];
    for (joint, restraint) in substructure.restraints.iter().enumerate() {
        for (axis, &fixed) in restraint.iter().enumerate() {
            if fixed {
                is_fixed[joint * 3 + axis] = true;
            }
        }
    }
    let free_dofs: Vec<usize> = (0..dof).filter(|&i| !is_fixed[i]).collect();
    if free_dofs.is_empty() {
        return Err(AnalysisError::FullyConstrained);
    }
    debug!("free DOFs: {}", free_dofs.len());

    // Reduced system K_ff * u_free = F_free.
    let n_free = free_dofs.len();
    let mut k_ff = Matrix::zeros(n_free, n_free);
    let mut f_free = vec![0.0; n_free];
    for (i, &row) in free_dofs.iter().enumerate() {
        f_free[i] = loads[row];
        for (j, &col) in free_dofs.iter().enumerate() {
            k_ff[(i, j)] = stiffness[(row, col)];
        }
    }

    let u_free =
        solver::solve(&k_ff, &f_free).map_err(|source| AnalysisError::Singular { source })?;

    let mut u_global = vec![0.0; dof];
    for (i, &dof_index) in free_dofs.iter().enumerate() {
        u_global[dof_index] = u_free[i];
    }

    let member_forces = members
        .iter()
        .map(|member| member_force(member, &u_global, params))
        .collect();

    let displacements = u_global
        .chunks_exact(3)
        .map(|axes| Displacement::new(axes[0], axes[1], axes[2]))
        .collect();

    // Reactions are the imbalance each support must supply: K*u minus the
    // externally applied load at that DOF.
    let total_forces = stiffness.mul_vector(&u_global);
    let reactions = substructure
        .supports
        .iter()
        .map(|&joint| {
            let base = joint * 3;
            let reaction = Force::new(
                total_forces[base] - loads[base],
                total_forces[base + 1] - loads[base + 1],
                total_forces[base + 2] - loads[base + 2],
            );
            (joint, reaction)
        })
        .collect();

    Ok(SubstructureResult {
        displacements,
        member_forces,
        reactions,
    })
}

/// Axial force in one member from the global displacement vector.
///
/// Positive when the endpoints move apart along the member axis (tension).
fn member_force(member: &MemberProperty, u_global: &[f64], params: AnalysisParams) -> f64 {
    let k = params.elastic_modulus * params.area / member.length;
    let start = member.start * 3;
    let end = member.end * 3;
    let relative = [
        u_global[end] - u_global[start],
        u_global[end + 1] - u_global[start + 1],
        u_global[end + 2] - u_global[start + 2],
    ];
    let axial = member.cx * relative[0] + member.cy * relative[1] + member.cz * relative[2];
    k * axial
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::*;
    use crate::geometry::{point, Load};

    fn analyze_single(truss: &Truss, params: AnalysisParams) -> Result<SubstructureResult, AnalysisError> {
        let substructure = find_substructures(truss).remove(0);
        analyze_substructure(&substructure, params)
    }

    #[test]
    fn unsupported_structure_is_rejected() {
        let mut truss = Truss::new();
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        let b = truss.add_joint(point(1.0, 0.0, 0.0));
        truss.add_member(a, b);

        let error = analyze_single(&truss, AnalysisParams::default())
            .expect_err("no supports rejected");
        assert_eq!(error, AnalysisError::Unsupported);
    }

    #[test]
    fn single_unsupported_joint_is_rejected() {
        let mut truss = Truss::new();
        truss.add_joint(point(0.0, 0.0, 0.0));

        let error = analyze_single(&truss, AnalysisParams::default())
            .expect_err("lone free joint rejected");
        assert_eq!(error, AnalysisError::Unsupported);
    }

    #[test]
    fn fully_constrained_structure_is_rejected() {
        let mut truss = Truss::new();
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        let b = truss.add_joint(point(1.0, 0.0, 0.0));
        truss.add_member(a, b);
        truss.set_support(a, [true, true, true]).unwrap();
        truss.set_support(b, [true, true, true]).unwrap();

        let error = analyze_single(&truss, AnalysisParams::default())
            .expect_err("no free DOFs rejected");
        assert_eq!(error, AnalysisError::FullyConstrained);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut truss = Truss::new();
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        truss.set_support(a, [true, true, true]).unwrap();

        let params = AnalysisParams {
            elastic_modulus: 0.0,
            area: 0.01,
        };
        let error = analyze_single(&truss, params).expect_err("zero modulus rejected");
        assert_eq!(error, AnalysisError::NonPositiveElasticModulus(0.0));

        let params = AnalysisParams {
            elastic_modulus: 200.0e9,
            area: -1.0,
        };
        let error = analyze_single(&truss, params).expect_err("negative area rejected");
        assert_eq!(error, AnalysisError::NonPositiveArea(-1.0));
    }

    #[test]
    fn under_braced_free_joint_is_singular() {
        // A fully free joint held by one member has no stiffness
        // perpendicular to it; the reduced system is singular.
        let mut truss = Truss::new();
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        let b = truss.add_joint(point(1.0, 0.0, 0.0));
        truss.add_member(a, b);
        truss.set_support(a, [true, true, true]).unwrap();
        truss
            .add_load(b, Load::from_vector(Vector3::new(-1.0e3, 0.0, 0.0)))
            .unwrap();

        let error = analyze_single(&truss, AnalysisParams::default())
            .expect_err("under-braced joint rejected");
        assert!(matches!(error, AnalysisError::Singular { .. }));
    }

    #[test]
    fn axial_bar_carries_the_applied_load() {
        // Axial DOF free at the loaded end, the two perpendicular axes
        // restrained.
        let mut truss = Truss::new();
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        let b = truss.add_joint(point(1.0, 0.0, 0.0));
        truss.add_member(a, b);
        truss.set_support(a, [true, true, true]).unwrap();
        truss.set_support(b, [false, true, true]).unwrap();
        truss
            .add_load(b, Load::from_vector(Vector3::new(-1_000.0, 0.0, 0.0)))
            .unwrap();

        let result =
            analyze_single(&truss, AnalysisParams::default()).expect("axial bar solves");

        // Pulling the free end towards the support compresses the member.
        assert_relative_eq!(result.member_forces[0], -1_000.0, epsilon = 1.0e-6);

        // Free end moves by FL/EA; the pinned end does not move at all.
        assert_eq!(result.displacements[0], Displacement::new(0.0, 0.0, 0.0));
        assert_relative_eq!(result.displacements[1].x, -5.0e-7, epsilon = 1.0e-12);
        assert_eq!(result.displacements[1].y, 0.0);
        assert_eq!(result.displacements[1].z, 0.0);

        // The pinned support supplies the negated applied load.
        let reaction = result.reactions[&0];
        assert_relative_eq!(reaction.x, 1_000.0, epsilon = 1.0e-6);
        assert_relative_eq!(reaction.y, 0.0, epsilon = 1.0e-6);
        assert_relative_eq!(reaction.z, 0.0, epsilon = 1.0e-6);
    }

    #[test]
    fn stretching_yields_positive_force() {
        let mut truss = Truss::new();
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        let b = truss.add_joint(point(2.0, 0.0, 0.0));
        truss.add_member(a, b);
        truss.set_support(a, [true, true, true]).unwrap();
        truss.set_support(b, [false, true, true]).unwrap();
        truss
            .add_load(b, Load::from_vector(Vector3::new(500.0, 0.0, 0.0)))
            .unwrap();

        let result = analyze_single(&truss, AnalysisParams::default()).expect("bar solves");
        assert_relative_eq!(result.member_forces[0], 500.0, epsilon = 1.0e-6);
    }

    #[test]
    fn degenerate_member_is_recovered_not_fatal() {
        // Coincident joints clamp to the minimum length; the member then has
        // an (arbitrary) zero direction, so it contributes no stiffness and
        // the free joint must be held some other way.
        let mut truss = Truss::new();
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        let b = truss.add_joint(point(0.0, 0.0, 0.0));
        truss.add_member(a, b);
        truss.set_support(a, [true, true, true]).unwrap();
        truss.set_support(b, [true, true, false]).unwrap();

        // The z DOF of joint b is free but carries no stiffness, so the
        // component is reported singular rather than crashing.
        let error = analyze_single(&truss, AnalysisParams::default())
            .expect_err("degenerate member leaves joint unbraced");
        assert!(matches!(error, AnalysisError::Singular { .. }));
    }

    #[test]
    fn outcomes_clone_with_their_errors() {
        // Reporting layers duplicate outcomes, failures included.
        let mut truss = Truss::new();
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        let b = truss.add_joint(point(1.0, 0.0, 0.0));
        truss.add_member(a, b);
        truss.set_support(a, [true, true, true]).unwrap();
        truss.set_support(b, [false, true, true]).unwrap();
        truss
            .add_load(b, Load::from_vector(Vector3::new(300.0, 0.0, 0.0)))
            .unwrap();
        truss.add_joint(point(5.0, 0.0, 0.0));

        let outcomes = analyze(&truss, AnalysisParams::default());
        let copies = outcomes.clone();
        assert_eq!(copies.len(), outcomes.len());
        for (copy, original) in copies.iter().zip(&outcomes) {
            assert_eq!(copy.outcome, original.outcome);
        }
        assert!(copies.iter().any(|outcome| outcome.outcome.is_err()));
    }

    #[test]
    fn failures_stay_local_to_their_substructure() {
        let mut truss = Truss::new();
        // Healthy axial bar.
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        let b = truss.add_joint(point(1.0, 0.0, 0.0));
        truss.add_member(a, b);
        truss.set_support(a, [true, true, true]).unwrap();
        truss.set_support(b, [false, true, true]).unwrap();
        truss
            .add_load(b, Load::from_vector(Vector3::new(200.0, 0.0, 0.0)))
            .unwrap();
        // Disconnected, unsupported pair.
        let c = truss.add_joint(point(5.0, 5.0, 5.0));
        let d = truss.add_joint(point(6.0, 5.0, 5.0));
        truss.add_member(c, d);

        let outcomes = analyze(&truss, AnalysisParams::default());
        assert_eq!(outcomes.len(), 2);

        let healthy = outcomes
            .iter()
            .find(|outcome| outcome.substructure.joints.contains(&a))
            .expect("healthy component present");
        let broken = outcomes
            .iter()
            .find(|outcome| outcome.substructure.joints.contains(&c))
            .expect("broken component present");

        let result = healthy.outcome.as_ref().expect("healthy component solves");
        assert_relative_eq!(result.member_forces[0], 200.0, epsilon = 1.0e-6);
        assert_eq!(broken.outcome, Err(AnalysisError::Unsupported));
    }
}
