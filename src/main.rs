use nalgebra::Vector3;
use trussolve::{point, AnalysisParams, Load, Truss};

fn main() {
    env_logger::init();

    let mut truss = Truss::new();

    // A hanging tripod: three pinned anchors with a loaded apex below them.
    let anchor_a = truss.add_joint(point(1.0, 0.0, 0.0));
    let anchor_b = truss.add_joint(point(-0.5, 0.0, 0.866));
    let anchor_c = truss.add_joint(point(-0.5, 0.0, -0.866));
    let apex = truss.add_joint(point(0.0, -1.0, 0.0));
    for anchor in [anchor_a, anchor_b, anchor_c] {
        truss.set_support(anchor, [true, true, true]).expect("anchor exists");
        truss.add_member(anchor, apex);
    }
    truss
        .add_load(apex, Load::new(Vector3::new(0.0, -1.0, 0.0), 1_500.0))
        .expect("apex exists");

    // A detached axial bar, analysed as its own substructure.
    let fixed = truss.add_joint(point(10.0, 0.0, 0.0));
    let free = truss.add_joint(point(11.0, 0.0, 0.0));
    truss.add_member(fixed, free);
    truss.set_support(fixed, [true, true, true]).expect("fixed joint exists");
    truss.set_support(free, [false, true, true]).expect("free joint exists");
    truss
        .add_load(free, Load::from_vector(Vector3::new(-1_000.0, 0.0, 0.0)))
        .expect("free joint exists");

    let outcomes = trussolve::analyze(&truss, AnalysisParams::default());
    print!("{}", trussolve::render_report(&outcomes));
}
