#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use nalgebra::Vector3;
use petgraph::graph::{EdgeIndex, NodeIndex};
use trussolve::{analyze, point, AnalysisParams, Load, Truss};

#[derive(Debug, Clone, Copy)]
struct BarGeometry {
    fixed_joint: NodeIndex,
    loaded_joint: NodeIndex,
    member: EdgeIndex,
}

#[derive(Debug, Clone, Copy)]
struct BarProperties {
    params: AnalysisParams,
    axial_load: f64,
}

impl Default for BarProperties {
    fn default() -> Self {
        Self {
            params: AnalysisParams {
                elastic_modulus: 200.0e9,
                area: 0.01,
            },
            axial_load: -1_000.0,
        }
    }
}

fn build_axial_bar() -> (Truss, BarGeometry) {
    let mut truss = Truss::new();
    let fixed_joint = truss.add_joint(point(0.0, 0.0, 0.0));
    let loaded_joint = truss.add_joint(point(1.0, 0.0, 0.0));
    let member = truss.add_member(fixed_joint, loaded_joint);

    (
        truss,
        BarGeometry {
            fixed_joint,
            loaded_joint,
            member,
        },
    )
}

fn apply_bar_conditions(truss: &mut Truss, geometry: &BarGeometry) -> BarProperties {
    let properties = BarProperties::default();

    truss
        .set_support(geometry.fixed_joint, [true, true, true])
        .expect("fixed joint support assignment succeeds");
    truss
        .set_support(geometry.loaded_joint, [false, true, true])
        .expect("loaded joint support assignment succeeds");
    truss
        .add_load(
            geometry.loaded_joint,
            Load::from_vector(Vector3::new(properties.axial_load, 0.0, 0.0)),
        )
        .expect("axial load assignment succeeds");

    properties
}

#[test]
fn builds_expected_topology() {
    let (truss, geometry) = build_axial_bar();

    assert_eq!(truss.joint_count(), 2);
    assert_eq!(truss.member_count(), 1);
    assert_eq!(geometry.fixed_joint.index(), 0);
    assert_eq!(geometry.loaded_joint.index(), 1);
    assert_eq!(geometry.member.index(), 0);
}

#[test]
fn axial_bar_forms_a_single_substructure_and_solves() {
    let (mut truss, geometry) = build_axial_bar();
    let properties = apply_bar_conditions(&mut truss, &geometry);

    let outcomes = analyze(&truss, properties.params);
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].outcome.is_ok());
}

#[test]
fn member_force_equals_applied_load() {
    let (mut truss, geometry) = build_axial_bar();
    let properties = apply_bar_conditions(&mut truss, &geometry);

    let outcomes = analyze(&truss, properties.params);
    let result = outcomes[0]
        .outcome
        .as_ref()
        .expect("axial bar analysis succeeds");

    // Loading the free end along the member axis puts the whole applied load
    // into the member, compression for a pull towards the support.
    assert_eq!(result.member_forces.len(), 1);
    assert_relative_eq!(
        result.member_forces[0],
        properties.axial_load,
        epsilon = 1.0e-6
    );
}

#[test]
fn support_reaction_is_the_negated_applied_load() {
    let (mut truss, geometry) = build_axial_bar();
    let properties = apply_bar_conditions(&mut truss, &geometry);

    let outcomes = analyze(&truss, properties.params);
    let outcome = &outcomes[0];
    let result = outcome
        .outcome
        .as_ref()
        .expect("axial bar analysis succeeds");

    let fixed_local = outcome
        .substructure
        .joints
        .iter()
        .position(|&joint| joint == geometry.fixed_joint)
        .expect("fixed joint belongs to the substructure");
    let reaction = result.reactions[&fixed_local];
    assert_relative_eq!(reaction.x, -properties.axial_load, epsilon = 1.0e-6);
    assert_relative_eq!(reaction.y, 0.0, epsilon = 1.0e-6);
    assert_relative_eq!(reaction.z, 0.0, epsilon = 1.0e-6);
}

#[test]
fn displacement_free_bar_reports_zero_force() {
    let (mut truss, geometry) = build_axial_bar();
    let properties = apply_bar_conditions(&mut truss, &geometry);
    truss
        .clear_loads(geometry.loaded_joint)
        .expect("loads clear cleanly");

    let outcomes = analyze(&truss, properties.params);
    let result = outcomes[0]
        .outcome
        .as_ref()
        .expect("unloaded bar analysis succeeds");
    assert_relative_eq!(result.member_forces[0], 0.0, epsilon = 1.0e-9);
}
