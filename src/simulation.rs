//! The simulation: an arena of nodes and sticks stepped with Verlet integration.

use alloc::collections::BTreeMap;
use alloc::vec::Vec as AllocVec;
use core::fmt;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::Undirected;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::float::Float;
use crate::node::{Node, NodeKind};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::stick::{floored_distance, Stick};
use crate::vec::Vec2;

/// Opaque, never-reused reference to a node owned by a [`Simulation`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(u64);

/// Opaque, never-reused reference to a stick owned by a [`Simulation`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StickHandle(u64);

impl NodeHandle {
    pub fn from_raw(raw: u64) -> Self { NodeHandle(raw) }
    pub fn raw(self) -> u64 { self.0 }
}

impl StickHandle {
    pub fn from_raw(raw: u64) -> Self { StickHandle(raw) }
    pub fn raw(self) -> u64 { self.0 }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for StickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Owns every node and stick and advances them through time.
///
/// Storage is a `StableGraph` so that removing a node drops its incident
/// sticks with it. The handle maps are ordered by creation, which fixes the
/// iteration order of integration and relaxation.
pub struct Simulation<F: Float> {
    graph: StableGraph<Node<F>, (StickHandle, Stick<F>), Undirected>,
    nodes: BTreeMap<NodeHandle, NodeIndex>,
    sticks: BTreeMap<StickHandle, EdgeIndex>,
    next_node: u64,
    next_stick: u64,
    config: SimulationConfig<F>,
}

impl<F: Float> Simulation<F> {
    pub fn new(config: SimulationConfig<F>) -> Self {
        Simulation {
            graph: StableGraph::default(),
            nodes: BTreeMap::new(),
            sticks: BTreeMap::new(),
            next_node: 0,
            next_stick: 0,
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig<F> { &self.config }
    pub fn config_mut(&mut self) -> &mut SimulationConfig<F> { &mut self.config }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: F) {
        self.step_observed(dt, &mut NoOpStepObserver);
    }

    /// Advance the simulation by `dt` seconds, reporting progress to `observer`.
    ///
    /// `dt` is raised to `config.min_dt`. Nodes are integrated and bounced off
    /// the walls, overstressed sticks break (when enabled), then every stick is
    /// relaxed `config.relaxation_passes` times in creation order.
    pub fn step_observed<O: StepObserver<F>>(&mut self, dt: F, observer: &mut O) {
        let dt = dt.max(self.config.min_dt);
        let gravity = self.config.gravity;
        let lift = gravity.scale(self.config.buoyancy);
        let bounds = self.config.bounds;
        let radius = self.config.node_radius;
        let restitution = self.config.restitution;

        for &index in self.nodes.values() {
            let node = &mut self.graph[index];
            if !node.is_movable() {
                continue;
            }
            let acceleration = match node.kind {
                NodeKind::Standard => gravity,
                NodeKind::Buoyant => lift,
            };
            node.integrate(dt, acceleration);
            if let Some(bounds) = &bounds {
                node.apply_boundary(bounds, radius, restitution);
            }
        }
        observer.on_integrate();

        if self.config.breakage {
            self.break_overstressed(observer);
        }

        for pass in 0..self.config.relaxation_passes.max(1) {
            for &edge in self.sticks.values() {
                let Some((ia, ib)) = self.graph.edge_endpoints(edge) else {
                    continue;
                };
                let stick = self.graph[edge].1;
                let (a, b) = self.graph.index_twice_mut(ia, ib);
                stick.relax(a, b);
            }
            observer.on_relaxation_pass(pass);
        }

        if let Some(bounds) = &bounds {
            for &index in self.nodes.values() {
                let node = &mut self.graph[index];
                if node.is_movable() {
                    node.confine(bounds, radius);
                }
            }
        }

        log::trace!(
            "stepped {} nodes, {} sticks, dt = {}",
            self.nodes.len(),
            self.sticks.len(),
            dt
        );
        observer.on_step_complete();
    }

    fn break_overstressed<O: StepObserver<F>>(&mut self, observer: &mut O) {
        let max_stress = self.config.max_stress;
        let broken: AllocVec<(StickHandle, F)> = self
            .sticks
            .iter()
            .filter_map(|(&handle, &edge)| {
                let (ia, ib) = self.graph.edge_endpoints(edge)?;
                let stress = self.graph[edge].1.stress(&self.graph[ia], &self.graph[ib]);
                (stress > max_stress).then_some((handle, stress))
            })
            .collect();

        for (handle, stress) in broken {
            if self.remove_stick(handle) {
                log::debug!("stick {} broke at stress {}", handle, stress);
                observer.on_stick_broken(handle, stress);
            }
        }
    }

    // ---- nodes ----

    /// Insert a node as-is and return its handle.
    pub fn add_node(&mut self, node: Node<F>) -> NodeHandle {
        let handle = NodeHandle(self.next_node);
        self.next_node += 1;
        let index = self.graph.add_node(node);
        self.nodes.insert(handle, index);
        handle
    }

    /// Create a node that is still being placed. Call [`finalize_node`](Self::finalize_node)
    /// once placement is done so physics picks it up.
    pub fn create_node(&mut self, pos: Vec2<F>, locked: bool) -> NodeHandle {
        self.add_node(Node::new(pos).with_locked(locked))
    }

    /// Remove a node and every stick attached to it. Returns `false` for a stale handle.
    pub fn remove_node(&mut self, handle: NodeHandle) -> bool {
        let Some(index) = self.nodes.remove(&handle) else {
            return false;
        };
        for edge in self.graph.edges(index) {
            self.sticks.remove(&edge.weight().0);
        }
        self.graph.remove_node(index);
        true
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&Node<F>> {
        let index = self.nodes.get(&handle)?;
        self.graph.node_weight(*index)
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node<F>> {
        let index = self.nodes.get(&handle)?;
        self.graph.node_weight_mut(*index)
    }

    fn node_or_err(&mut self, handle: NodeHandle) -> Result<&mut Node<F>, SimulationError> {
        self.node_mut(handle).ok_or(SimulationError::NodeNotFound(handle))
    }

    /// Finish placing a pending node; it starts at rest.
    pub fn finalize_node(&mut self, handle: NodeHandle) -> Result<(), SimulationError> {
        self.node_or_err(handle)?.finalize();
        Ok(())
    }

    pub fn toggle_lock(&mut self, handle: NodeHandle) -> Result<bool, SimulationError> {
        let node = self.node_or_err(handle)?;
        node.toggle_lock();
        Ok(node.locked)
    }

    pub fn set_locked(&mut self, handle: NodeHandle, locked: bool) -> Result<(), SimulationError> {
        let node = self.node_or_err(handle)?;
        if locked {
            node.lock();
        } else {
            node.unlock();
        }
        Ok(())
    }

    /// Move a node without giving it velocity (dragging, repositioning a pin).
    pub fn move_node(&mut self, handle: NodeHandle, pos: Vec2<F>) -> Result<(), SimulationError> {
        self.node_or_err(handle)?.teleport(pos);
        Ok(())
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node<F>)> + '_ {
        self.nodes.iter().map(move |(&h, &i)| (h, &self.graph[i]))
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.nodes().map(|(_, n)| n.pos).collect()
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }

    // ---- sticks ----

    /// Connect two nodes at their current distance.
    ///
    /// Fails for a self-loop, for a pair that is already connected (in either
    /// order) and for stale handles; the simulation is left untouched.
    pub fn create_stick(&mut self, a: NodeHandle, b: NodeHandle) -> Result<StickHandle, SimulationError> {
        if a == b {
            return Err(SimulationError::SelfLoop);
        }
        let ia = *self.nodes.get(&a).ok_or(SimulationError::NodeNotFound(a))?;
        let ib = *self.nodes.get(&b).ok_or(SimulationError::NodeNotFound(b))?;
        if self.graph.find_edge(ia, ib).is_some() {
            return Err(SimulationError::DuplicateStick { a, b });
        }

        let stick = Stick::between(a, b, &self.graph[ia], &self.graph[ib]);
        let handle = StickHandle(self.next_stick);
        self.next_stick += 1;
        let edge = self.graph.add_edge(ia, ib, (handle, stick));
        self.sticks.insert(handle, edge);
        Ok(handle)
    }

    /// Remove a stick. Removing a stick twice is a no-op that returns `false`.
    pub fn remove_stick(&mut self, handle: StickHandle) -> bool {
        let Some(edge) = self.sticks.remove(&handle) else {
            return false;
        };
        self.graph.remove_edge(edge);
        true
    }

    fn stick_nodes(&self, handle: StickHandle) -> Option<(&Stick<F>, &Node<F>, &Node<F>)> {
        let edge = *self.sticks.get(&handle)?;
        let (ia, ib) = self.graph.edge_endpoints(edge)?;
        Some((&self.graph[edge].1, &self.graph[ia], &self.graph[ib]))
    }

    pub fn stick(&self, handle: StickHandle) -> Option<&Stick<F>> {
        let edge = self.sticks.get(&handle)?;
        self.graph.edge_weight(*edge).map(|(_, stick)| stick)
    }

    /// Current length minus rest length; positive when stretched.
    pub fn stress(&self, handle: StickHandle) -> Option<F> {
        self.stick_nodes(handle).map(|(s, a, b)| s.stress(a, b))
    }

    pub fn stick_length(&self, handle: StickHandle) -> Option<F> {
        self.stick_nodes(handle).map(|(s, a, b)| s.length(a, b))
    }

    pub fn stick_midpoint(&self, handle: StickHandle) -> Option<Vec2<F>> {
        self.stick_nodes(handle).map(|(s, a, b)| s.midpoint(a, b))
    }

    /// Sticks in creation order.
    pub fn sticks(&self) -> impl Iterator<Item = (StickHandle, &Stick<F>)> + '_ {
        self.sticks.iter().map(move |(&h, &e)| (h, &self.graph[e].1))
    }

    /// Sticks attached to `handle`, sorted by handle. Empty for a stale handle.
    pub fn incident_sticks(&self, handle: NodeHandle) -> AllocVec<StickHandle> {
        let Some(&index) = self.nodes.get(&handle) else {
            return AllocVec::new();
        };
        let mut incident: AllocVec<StickHandle> =
            self.graph.edges(index).map(|e| e.weight().0).collect();
        incident.sort();
        incident
    }

    pub fn stick_count(&self) -> usize { self.sticks.len() }

    // ---- bulk operations ----

    /// Append a `width × height` fabric of placed nodes starting at `origin`.
    ///
    /// Horizontal neighbours are linked first, then vertical ones; there are no
    /// diagonals. Returns the new node handles in row-major order.
    pub fn build_grid(&mut self, origin: Vec2<F>, width: usize, height: usize, spacing: F) -> AllocVec<NodeHandle> {
        let mut grid = AllocVec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let x = origin.x + F::from_usize(col) * spacing;
                let y = origin.y + F::from_usize(row) * spacing;
                grid.push(self.add_node(Node::placed(Vec2::new(x, y))));
            }
        }

        let mut links = AllocVec::new();
        for row in 0..height {
            for col in 0..width.saturating_sub(1) {
                links.push((grid[row * width + col], grid[row * width + col + 1]));
            }
        }
        for row in 0..height.saturating_sub(1) {
            for col in 0..width {
                links.push((grid[row * width + col], grid[(row + 1) * width + col]));
            }
        }
        for (a, b) in links {
            // Fresh, distinct nodes: neither a self-loop nor a duplicate is possible.
            if let Err(err) = self.create_stick(a, b) {
                log::warn!("grid link {} - {} skipped: {}", a, b, err);
            }
        }

        log::debug!("built {}x{} grid at ({}, {})", width, height, origin.x, origin.y);
        grid
    }

    /// Remove every node with a coordinate beyond `±limit`, with its sticks.
    ///
    /// Returns the number of nodes removed.
    pub fn cull_out_of_bounds(&mut self, limit: F) -> usize {
        self.cull_out_of_bounds_observed(limit, &mut NoOpStepObserver)
    }

    /// Like [`cull_out_of_bounds`](Self::cull_out_of_bounds), reporting each removal to `observer`.
    pub fn cull_out_of_bounds_observed<O: StepObserver<F>>(&mut self, limit: F, observer: &mut O) -> usize {
        let fallen: AllocVec<NodeHandle> = self
            .nodes()
            .filter(|(_, n)| n.pos.x.abs() > limit || n.pos.y.abs() > limit)
            .map(|(h, _)| h)
            .collect();
        for &handle in &fallen {
            self.remove_node(handle);
            log::debug!("node {} fell out of the world", handle);
            observer.on_node_culled(handle);
        }
        fallen.len()
    }

    /// Remove every stick whose midpoint lies strictly within `radius` of `point`.
    pub fn remove_sticks_near(&mut self, point: Vec2<F>, radius: F) -> usize {
        let hit: AllocVec<StickHandle> = self
            .sticks
            .keys()
            .copied()
            .filter(|&h| {
                self.stick_midpoint(h)
                    .is_some_and(|m| floored_distance(m, point) < radius)
            })
            .collect();
        for &handle in &hit {
            self.remove_stick(handle);
        }
        hit.len()
    }

    // ---- hit testing ----

    /// Closest node strictly within `max_radius` of `point`.
    pub fn nearest_node(&self, point: Vec2<F>, max_radius: F) -> Option<NodeHandle> {
        let mut best = None;
        let mut best_dist = max_radius;
        for (handle, node) in self.nodes() {
            let dist = floored_distance(node.pos, point);
            if dist < best_dist {
                best = Some(handle);
                best_dist = dist;
            }
        }
        best
    }

    /// Stick whose midpoint is closest to `point`, strictly within `max_radius`.
    pub fn nearest_stick(&self, point: Vec2<F>, max_radius: F) -> Option<StickHandle> {
        let mut best = None;
        let mut best_dist = max_radius;
        for &handle in self.sticks.keys() {
            let Some(mid) = self.stick_midpoint(handle) else {
                continue;
            };
            let dist = floored_distance(mid, point);
            if dist < best_dist {
                best = Some(handle);
                best_dist = dist;
            }
        }
        best
    }

    /// Remove all nodes and sticks. Handles are still never reused.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.nodes.clear();
        self.sticks.clear();
    }
}

impl<F: Float> Default for Simulation<F> {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
