//! Verlet nodes: point masses whose velocity lives in their position history.

use crate::float::Float;
use crate::vec::{Bounds, Vec2};

/// How a node responds to the environmental acceleration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Receives the configured gravity unchanged.
    #[default]
    Standard,
    /// A balloon: receives gravity scaled by the configured buoyancy factor.
    Buoyant,
}

/// A point mass integrated with position Verlet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub locked: bool,
    /// Still being placed by the user; physics ignores it until finalized.
    pub pending: bool,
    pub kind: NodeKind,
}

impl<F: Float> Node<F> {
    /// A node that is still being placed. It starts at rest.
    pub fn new(pos: Vec2<F>) -> Self {
        Node {
            pos,
            prev_pos: pos,
            locked: false,
            pending: true,
            kind: NodeKind::Standard,
        }
    }

    /// A node that takes part in physics immediately.
    pub fn placed(pos: Vec2<F>) -> Self {
        Node { pending: false, ..Node::new(pos) }
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn buoyant(mut self) -> Self {
        self.kind = NodeKind::Buoyant;
        self
    }

    /// Whether integration and relaxation may move this node.
    pub fn is_movable(&self) -> bool {
        !self.locked && !self.pending
    }

    /// Advance one Verlet step: `pos' = 2*pos - prev + a*dt²`.
    pub fn integrate(&mut self, dt: F, acceleration: Vec2<F>) {
        if !self.is_movable() {
            return;
        }
        let new_pos = self.pos.scale(F::two()) - self.prev_pos + acceleration.scale(dt * dt);
        self.prev_pos = self.pos;
        self.pos = new_pos;
    }

    /// Bounce off the walls of `bounds`, keeping the node's disc of `radius` inside.
    ///
    /// The previous position is reflected so that the implied velocity reverses
    /// and shrinks by `restitution`; the penetration depth is folded back in so
    /// the bounce does not lose the distance travelled past the wall.
    pub fn apply_boundary(&mut self, bounds: &Bounds<F>, radius: F, restitution: F) {
        let hi = bounds.max - Vec2::new(radius, radius);
        let lo = bounds.min + Vec2::new(radius, radius);

        if self.pos.x > hi.x {
            self.bounce_x(hi.x, restitution);
        } else if self.pos.x < lo.x {
            self.bounce_x(lo.x, restitution);
        }

        if self.pos.y > hi.y {
            self.bounce_y(hi.y, restitution);
        } else if self.pos.y < lo.y {
            self.bounce_y(lo.y, restitution);
        }
    }

    fn bounce_x(&mut self, wall: F, restitution: F) {
        let excess = self.pos.x - wall;
        self.prev_pos.x = self.pos.x + restitution * (self.pos.x - self.prev_pos.x) - excess;
        self.pos.x = wall;
    }

    fn bounce_y(&mut self, wall: F, restitution: F) {
        let excess = self.pos.y - wall;
        self.prev_pos.y = self.pos.y + restitution * (self.pos.y - self.prev_pos.y) - excess;
        self.pos.y = wall;
    }

    /// Clamp the position into `bounds` shrunk by `radius` without touching history.
    pub fn confine(&mut self, bounds: &Bounds<F>, radius: F) {
        self.pos.x = self.pos.x.clamp(bounds.min.x + radius, bounds.max.x - radius);
        self.pos.y = self.pos.y.clamp(bounds.min.y + radius, bounds.max.y - radius);
    }

    /// Distance travelled during the last step.
    pub fn displacement(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    pub fn velocity(&self, dt: F) -> Vec2<F> {
        if dt.is_near_zero(F::from_f64(1e-30)) {
            return Vec2::zero();
        }
        self.displacement().scale(F::one() / dt)
    }

    pub fn lock(&mut self) {
        self.locked = true;
        self.prev_pos = self.pos;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
        self.prev_pos = self.pos;
    }

    pub fn toggle_lock(&mut self) {
        if self.locked {
            self.unlock();
        } else {
            self.lock();
        }
    }

    /// End placement; the node joins the simulation at rest.
    pub fn finalize(&mut self) {
        self.pending = false;
        self.prev_pos = self.pos;
    }

    /// Move without imparting velocity.
    pub fn teleport(&mut self, pos: Vec2<F>) {
        self.pos = pos;
        self.prev_pos = pos;
    }
}
