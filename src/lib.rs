//! Verlet point masses and rigid sticks for interactive rope and cloth toys.
//!
//! `tether` is the physics kernel behind a "draw some sticks and watch them
//! fall" sandbox. A host shell (window, input, renderer) creates nodes and
//! sticks, calls [`Simulation::step`] once per frame and reads the state back
//! for drawing and hit-testing.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Stick relaxation**: Jakobsen-style projection, tunable pass count
//! - **Damped wall bounces**: Inelastic response against an axis-aligned box
//! - **Breakage**: Sticks snap when stretched past a threshold
//! - **Fabric**: `build_grid` lays out a cloth of nodes and sticks
//! - **Stable handles**: Stale handles read as "not found", never alias
//! - **Observable**: Monitor steps via the `StepObserver` trait and `log`
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! ```
//! use tether::{Simulation, SimulationConfig, Vec2};
//!
//! let mut sim: Simulation<f64> = Simulation::new(SimulationConfig::new().with_breakage(6.0));
//! let fabric = sim.build_grid(Vec2::new(100.0, 50.0), 8, 6, 20.0);
//! for &top in &fabric[..8] {
//!     sim.set_locked(top, true).unwrap();
//! }
//! for _ in 0..60 {
//!     sim.step(1.0 / 60.0);
//! }
//! assert_eq!(sim.node_count(), 48);
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod float;
pub mod vec;
pub mod node;
pub mod stick;
pub mod simulation;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Bounds, Vec2};
pub use node::{Node, NodeKind};
pub use stick::{Stick, MIN_DISTANCE};
pub use simulation::{NodeHandle, Simulation, StickHandle};
pub use config::SimulationConfig;
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::SimulationError;
