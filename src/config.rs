//! Configuration for a simulation.

use crate::float::Float;
use crate::vec::{Bounds, Vec2};

/// Parameters a [`Simulation`](crate::Simulation) is constructed with.
///
/// Defaults describe a 500×500 screen with +y pointing down.
///
/// # Builder Pattern
/// ```
/// use tether::config::SimulationConfig;
/// use tether::vec::Vec2;
///
/// let config: SimulationConfig<f64> = SimulationConfig::new()
///     .with_gravity(Vec2::new(0.0, 981.0))
///     .with_breakage(6.0)
///     .with_relaxation_passes(4);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig<F: Float> {
    /// Environmental acceleration applied to every movable node. Default: (0, 500).
    pub gravity: Vec2<F>,
    /// Walls nodes bounce off. `None` lets nodes fall forever. Default: 500×500.
    pub bounds: Option<Bounds<F>>,
    /// Collision radius of a node against the walls. Default: 7.
    pub node_radius: F,
    /// Fraction of the velocity kept (and reversed) by a wall bounce. Default: 0.5.
    pub restitution: F,
    /// Remove sticks stretched past `max_stress`. Default: false.
    pub breakage: bool,
    /// Stretch beyond the rest length at which a stick breaks. Default: 4.5.
    pub max_stress: F,
    /// Lower bound on the step duration in seconds. Default: 0.01.
    pub min_dt: F,
    /// Relaxation passes over all sticks per step. Default: 1.
    pub relaxation_passes: usize,
    /// Gravity multiplier for buoyant nodes. Default: -1 (they rise).
    pub buoyancy: F,
    /// Hover radius the shell uses to snap onto existing nodes. Not used by the kernel.
    pub snap_radius: F,
    /// Eraser radius the shell uses. Not used by the kernel.
    pub delete_radius: F,
    /// Spacing of the shell's placement grid. Not used by the kernel.
    pub grid_size: F,
}

impl<F: Float> SimulationConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimulationConfig {
            gravity: Vec2::new(F::zero(), F::from_f64(500.0)),
            bounds: Some(Bounds::from_size(F::from_f64(500.0), F::from_f64(500.0))),
            node_radius: F::from_f64(7.0),
            restitution: F::half(),
            breakage: false,
            max_stress: F::from_f64(4.5),
            min_dt: F::from_f64(0.01),
            relaxation_passes: 1,
            buoyancy: -F::one(),
            snap_radius: F::from_f64(20.0),
            delete_radius: F::from_f64(10.0),
            grid_size: F::from_f64(25.0),
        }
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds<F>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn without_bounds(mut self) -> Self {
        self.bounds = None;
        self
    }

    pub fn with_node_radius(mut self, radius: F) -> Self {
        self.node_radius = radius;
        self
    }

    pub fn with_restitution(mut self, restitution: F) -> Self {
        self.restitution = restitution;
        self
    }

    /// Enable breakage with the given stress threshold.
    pub fn with_breakage(mut self, max_stress: F) -> Self {
        self.breakage = true;
        self.max_stress = max_stress;
        self
    }

    pub fn without_breakage(mut self) -> Self {
        self.breakage = false;
        self
    }

    pub fn with_min_dt(mut self, min_dt: F) -> Self {
        self.min_dt = min_dt;
        self
    }

    /// Set the number of relaxation passes; at least one pass always runs.
    pub fn with_relaxation_passes(mut self, passes: usize) -> Self {
        self.relaxation_passes = passes.max(1);
        self
    }

    pub fn with_buoyancy(mut self, buoyancy: F) -> Self {
        self.buoyancy = buoyancy;
        self
    }

    pub fn with_snap_radius(mut self, radius: F) -> Self {
        self.snap_radius = radius;
        self
    }

    pub fn with_delete_radius(mut self, radius: F) -> Self {
        self.delete_radius = radius;
        self
    }

    pub fn with_grid_size(mut self, size: F) -> Self {
        self.grid_size = size;
        self
    }

    /// Off-screen distance past which a node counts as fallen out of the world.
    ///
    /// Width plus height of the bounds, or `None` when the world is unbounded.
    pub fn cull_limit(&self) -> Option<F> {
        self.bounds.map(|b| b.width() + b.height())
    }
}

impl<F: Float> Default for SimulationConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
