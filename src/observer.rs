//! Step observer trait for monitoring simulation progress.

use crate::simulation::{NodeHandle, StickHandle};

/// Trait for observing simulation steps.
///
/// Implement this trait to watch the solver (e.g., to spawn debris where a
/// stick snapped, or to profile a frame). All methods have default no-op
/// implementations.
pub trait StepObserver<F> {
    /// Called after all nodes have been integrated and bounced off the walls.
    fn on_integrate(&mut self) {}

    /// Called for every stick removed by breakage, with the stress that broke it.
    fn on_stick_broken(&mut self, _stick: StickHandle, _stress: F) {}

    /// Called after each relaxation pass over all sticks.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// Called for every node removed by [`Simulation::cull_out_of_bounds_observed`](crate::Simulation::cull_out_of_bounds_observed).
    fn on_node_culled(&mut self, _node: NodeHandle) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Used by [`Simulation::step`](crate::Simulation::step).
pub struct NoOpStepObserver;

impl<F> StepObserver<F> for NoOpStepObserver {}
