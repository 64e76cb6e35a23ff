//! Error types for simulation editing operations.

use core::fmt;

use crate::simulation::NodeHandle;

/// Errors reported by operations that edit the simulation's topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    /// A stick cannot connect a node to itself.
    SelfLoop,
    /// The two nodes are already connected by a stick.
    DuplicateStick { a: NodeHandle, b: NodeHandle },
    /// The node handle does not refer to a live node.
    NodeNotFound(NodeHandle),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::SelfLoop => write!(f, "a stick cannot connect a node to itself"),
            SimulationError::DuplicateStick { a, b } => {
                write!(f, "nodes {} and {} are already connected", a, b)
            }
            SimulationError::NodeNotFound(h) => write!(f, "node {} not found", h),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SimulationError {}
