use test_case::test_case;
use tether::{Node, Simulation, SimulationConfig, Vec2};

const RADIUS: f64 = 7.0;
const SIZE: f64 = 500.0;

fn assert_inside(sim: &Simulation<f64>) {
    for (handle, node) in sim.nodes() {
        let p = node.pos;
        assert!(
            p.x >= RADIUS && p.x <= SIZE - RADIUS && p.y >= RADIUS && p.y <= SIZE - RADIUS,
            "node {} escaped to ({}, {})",
            handle,
            p.x,
            p.y,
        );
    }
}

#[test_case(Vec2::new(250.0, 250.0), Vec2::new(240.0, 250.0); "thrown right")]
#[test_case(Vec2::new(250.0, 250.0), Vec2::new(260.0, 250.0); "thrown left")]
#[test_case(Vec2::new(250.0, 250.0), Vec2::new(250.0, 270.0); "thrown up")]
#[test_case(Vec2::new(20.0, 480.0), Vec2::new(35.0, 465.0); "into bottom left corner")]
fn thrown_node_stays_inside(pos: Vec2<f64>, prev_pos: Vec2<f64>) {
    let mut sim = Simulation::new(SimulationConfig::new());
    let mut node = Node::placed(pos);
    node.prev_pos = prev_pos;
    sim.add_node(node);
    for _ in 0..300 {
        sim.step(1.0 / 60.0);
        assert_inside(&sim);
    }
}

#[test]
fn bounce_loses_energy() {
    let mut sim = Simulation::new(SimulationConfig::new().with_gravity(Vec2::zero()));
    let mut node = Node::placed(Vec2::new(250.0, 490.0));
    node.prev_pos = Vec2::new(250.0, 480.0);
    let n = sim.add_node(node);
    sim.step(1.0 / 60.0);
    let bounced = sim.node(n).unwrap();
    assert_eq!(bounced.pos.y, SIZE - RADIUS);
    let v = bounced.displacement().y;
    assert!(v < 0.0, "velocity should reverse, got {}", v);
    assert!(v.abs() < 10.0, "bounce should be damped, got {}", v);
}

#[test]
fn falling_fabric_stays_inside() {
    let mut sim = Simulation::new(SimulationConfig::new());
    sim.build_grid(Vec2::new(150.0, 20.0), 10, 8, 20.0);
    for _ in 0..240 {
        sim.step(1.0 / 60.0);
        assert_inside(&sim);
    }
}
