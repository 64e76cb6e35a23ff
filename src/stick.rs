//! Rigid-length sticks between two nodes and their relaxation step.

use crate::float::Float;
use crate::node::Node;
use crate::simulation::NodeHandle;
use crate::vec::Vec2;

/// Floor applied to every distance so direction vectors stay finite.
pub const MIN_DISTANCE: f64 = 0.001;

/// Distance between two points, floored at [`MIN_DISTANCE`].
pub fn floored_distance<F: Float>(a: Vec2<F>, b: Vec2<F>) -> F {
    a.distance(b).max(F::from_f64(MIN_DISTANCE))
}

/// A stick keeps two nodes at the distance they had when it was created.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stick<F: Float> {
    pub a: NodeHandle,
    pub b: NodeHandle,
    pub rest_length: F,
}

impl<F: Float> Stick<F> {
    /// Create a stick whose rest length is the current distance between `a` and `b`.
    pub fn between(a: NodeHandle, b: NodeHandle, node_a: &Node<F>, node_b: &Node<F>) -> Self {
        Stick { a, b, rest_length: floored_distance(node_a.pos, node_b.pos) }
    }

    pub fn length(&self, node_a: &Node<F>, node_b: &Node<F>) -> F {
        floored_distance(node_a.pos, node_b.pos)
    }

    /// Positive when stretched, negative when compressed.
    pub fn stress(&self, node_a: &Node<F>, node_b: &Node<F>) -> F {
        self.length(node_a, node_b) - self.rest_length
    }

    pub fn midpoint(&self, node_a: &Node<F>, node_b: &Node<F>) -> Vec2<F> {
        node_a.pos.midpoint(node_b.pos)
    }

    /// One relaxation pass: move the movable endpoints so they sit `rest_length` apart.
    ///
    /// With both endpoints movable, each is placed `rest_length / 2` from the
    /// midpoint along the B->A direction. With one endpoint locked or pending,
    /// that endpoint anchors and the other is placed `rest_length` away from it.
    pub fn relax(&self, node_a: &mut Node<F>, node_b: &mut Node<F>) {
        let move_a = node_a.is_movable();
        let move_b = node_b.is_movable();
        if !move_a && !move_b {
            return;
        }

        let dist = self.length(node_a, node_b);
        let dir = (node_a.pos - node_b.pos).scale(F::one() / dist);

        match (move_a, move_b) {
            (true, true) => {
                let center = node_a.pos.midpoint(node_b.pos);
                let half = dir.scale(self.rest_length * F::half());
                node_a.pos = center + half;
                node_b.pos = center - half;
            }
            (true, false) => {
                node_a.pos = node_b.pos + dir.scale(self.rest_length);
            }
            (false, true) => {
                node_b.pos = node_a.pos - dir.scale(self.rest_length);
            }
            (false, false) => {}
        }
    }
}
