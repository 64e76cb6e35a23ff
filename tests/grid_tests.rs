use float_cmp::approx_eq;
use test_case::test_case;
use tether::{Simulation, SimulationConfig, Vec2};

fn still() -> Simulation<f64> {
    Simulation::new(SimulationConfig::new().with_gravity(Vec2::zero()).without_bounds())
}

#[test]
fn three_by_two_grid() {
    let mut sim = still();
    let nodes = sim.build_grid(Vec2::new(0.0, 0.0), 3, 2, 10.0);
    assert_eq!(nodes.len(), 6);
    assert_eq!(sim.node_count(), 6);
    assert_eq!(sim.stick_count(), 7);

    // Row-major placement.
    assert_eq!(sim.node(nodes[0]).unwrap().pos, Vec2::new(0.0, 0.0));
    assert_eq!(sim.node(nodes[2]).unwrap().pos, Vec2::new(20.0, 0.0));
    assert_eq!(sim.node(nodes[4]).unwrap().pos, Vec2::new(10.0, 10.0));

    for (_, stick) in sim.sticks() {
        assert!(approx_eq!(f64, stick.rest_length, 10.0, ulps = 2));
        let a = sim.node(stick.a).unwrap().pos;
        let b = sim.node(stick.b).unwrap().pos;
        assert!(a.x == b.x || a.y == b.y, "no diagonal sticks");
    }

    // Horizontal links come first.
    let horizontal = sim
        .sticks()
        .take(4)
        .all(|(_, s)| sim.node(s.a).unwrap().pos.y == sim.node(s.b).unwrap().pos.y);
    assert!(horizontal);
}

#[test]
fn grid_nodes_are_placed_and_free() {
    let mut sim = still();
    for handle in sim.build_grid(Vec2::new(5.0, 5.0), 4, 4, 3.0) {
        let node = sim.node(handle).unwrap();
        assert!(!node.pending);
        assert!(!node.locked);
    }
}

#[test_case(1, 1, 0; "single node")]
#[test_case(5, 1, 4; "one row")]
#[test_case(1, 5, 4; "one column")]
#[test_case(4, 3, 17; "four by three")]
#[test_case(0, 7, 0; "empty")]
fn grid_stick_count(width: usize, height: usize, sticks: usize) {
    let mut sim = still();
    sim.build_grid(Vec2::zero(), width, height, 1.0);
    assert_eq!(sim.node_count(), width * height);
    assert_eq!(sim.stick_count(), sticks);
}

#[test]
fn grid_appends() {
    let mut sim = still();
    sim.build_grid(Vec2::zero(), 3, 2, 10.0);
    sim.build_grid(Vec2::zero(), 3, 2, 10.0);
    assert_eq!(sim.node_count(), 12);
    assert_eq!(sim.stick_count(), 14);
}

#[test]
fn pinned_top_row_drapes_under_gravity() {
    let mut sim: Simulation<f64> = Simulation::new(SimulationConfig::new());
    let cols = 6;
    let nodes = sim.build_grid(Vec2::new(100.0, 50.0), cols, 5, 20.0);
    for &top in &nodes[..cols] {
        sim.set_locked(top, true).unwrap();
    }
    let bottom: Vec<_> = nodes[nodes.len() - cols..].to_vec();
    let bottom_initial: Vec<_> = bottom.iter().map(|&h| sim.node(h).unwrap().pos).collect();

    for _ in 0..120 {
        sim.step(1.0 / 60.0);
    }

    for (col, &top) in nodes[..cols].iter().enumerate() {
        let pos = sim.node(top).unwrap().pos;
        assert_eq!(pos, Vec2::new(100.0 + 20.0 * col as f64, 50.0));
    }
    let sagged: f64 = bottom.iter().map(|&h| sim.node(h).unwrap().pos.y).sum::<f64>() / cols as f64;
    let rested: f64 = bottom_initial.iter().map(|p| p.y).sum::<f64>() / cols as f64;
    assert!(sagged > rested, "bottom row should sag: {} -> {}", rested, sagged);
}
