//! The `Vehicle` trait and the state every vehicle model shares.

use std::fmt;

use ts_core::{DepartProcedure, EdgeId, LaneId, Position, StopId, TransportableId, VehicleClass, VehicleId};
use ts_network::Network;

use crate::{Route, VehicleError, VehicleResult};

// ── VehicleParameter ──────────────────────────────────────────────────────────

/// Scenario-defined attributes of a vehicle; fixed once the vehicle exists.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleParameter {
    pub id: VehicleId,

    /// Public-transport line label; empty for private vehicles.
    pub line: String,

    pub depart_procedure: DepartProcedure,

    pub vclass: VehicleClass,

    /// Offset on the first route edge at which the vehicle enters.
    pub depart_pos: f64,
}

impl VehicleParameter {
    pub fn new(id: impl Into<VehicleId>) -> Self {
        Self {
            id:               id.into(),
            line:             String::new(),
            depart_procedure: DepartProcedure::Given,
            vclass:           VehicleClass::Passenger,
            depart_pos:       0.0,
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = line.into();
        self
    }

    pub fn with_class(mut self, vclass: VehicleClass) -> Self {
        self.vclass = vclass;
        self
    }

    pub fn with_depart_procedure(mut self, procedure: DepartProcedure) -> Self {
        self.depart_procedure = procedure;
        self
    }

    pub fn with_depart_pos(mut self, pos: f64) -> Self {
        self.depart_pos = pos;
        self
    }
}

// ── VehicleStop ───────────────────────────────────────────────────────────────

/// A planned halt: a stretch of an edge, optionally a named stopping place.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleStop {
    pub edge:      EdgeId,
    pub stop:      Option<StopId>,
    pub start_pos: f64,
    pub end_pos:   f64,
}

impl VehicleStop {
    /// A halt covering the whole of stopping place `stop`.
    pub fn at_stop(network: &Network, stop: &StopId) -> VehicleResult<Self> {
        let place = network
            .stop(stop)
            .ok_or_else(|| VehicleError::UnknownStop(stop.clone()))?;
        let edge = network
            .lane_edge(&place.lane)
            .ok_or_else(|| VehicleError::UnknownStop(stop.clone()))?;
        Ok(Self {
            edge:      edge.clone(),
            stop:      Some(stop.clone()),
            start_pos: place.begin_pos,
            end_pos:   place.end_pos,
        })
    }

    /// A halt on `edge` between two offsets, not bound to a stopping place.
    pub fn on_edge(edge: impl Into<EdgeId>, start_pos: f64, end_pos: f64) -> Self {
        Self { edge: edge.into(), stop: None, start_pos, end_pos }
    }

    #[inline]
    pub fn contains(&self, pos: f64, tolerance: f64) -> bool {
        pos >= self.start_pos - tolerance && pos <= self.end_pos + tolerance
    }
}

// ── VehicleCore ───────────────────────────────────────────────────────────────

/// State shared by every vehicle model.
#[derive(Debug, Clone)]
pub struct VehicleCore {
    pub parameter: VehicleParameter,

    pub route: Route,

    /// Index into `route.edges` of the edge the vehicle is on.
    pub route_index: usize,

    /// Offset along the current edge/lane.
    pub pos: f64,

    pub speed: f64,

    pub departed: bool,

    /// `true` while halted at `stops[0]`.
    pub stopped: bool,

    /// Remaining planned halts; the front is the next (or current) one.
    pub stops: Vec<VehicleStop>,

    /// Persons and containers aboard, in boarding order.
    pub transportables: Vec<TransportableId>,
}

impl VehicleCore {
    pub fn new(parameter: VehicleParameter, route: Route) -> Self {
        let pos = parameter.depart_pos;
        Self {
            parameter,
            route,
            route_index:    0,
            pos,
            speed:          0.0,
            departed:       false,
            stopped:        false,
            stops:          Vec::new(),
            transportables: Vec::new(),
        }
    }
}

// ── Vehicle trait ─────────────────────────────────────────────────────────────

/// Everything a ride needs from the vehicle carrying it.
///
/// Implementors provide access to their [`VehicleCore`] plus the
/// model-specific operations (`lane`, `position`, `move_to`, `heading`);
/// all other methods have default implementations on top of the core.
pub trait Vehicle: fmt::Debug {
    fn core(&self) -> &VehicleCore;

    fn core_mut(&mut self) -> &mut VehicleCore;

    /// The lane the vehicle drives on, if the model resolves lanes.
    fn lane(&self) -> Option<&LaneId>;

    /// Spatial position.
    fn position(&self, network: &Network) -> Position;

    /// Place the vehicle at `pos` on route edge `route_index`, driving at
    /// `speed`.
    fn move_to(&mut self, network: &Network, route_index: usize, pos: f64, speed: f64) -> VehicleResult<()>;

    /// Direction of travel in radians, for models that track one.
    fn heading(&self) -> Option<f64> {
        None
    }

    // ── Provided ──────────────────────────────────────────────────────────

    #[inline]
    fn id(&self) -> &VehicleId {
        &self.core().parameter.id
    }

    #[inline]
    fn parameter(&self) -> &VehicleParameter {
        &self.core().parameter
    }

    #[inline]
    fn vclass(&self) -> VehicleClass {
        self.core().parameter.vclass
    }

    #[inline]
    fn route(&self) -> &Route {
        &self.core().route
    }

    #[inline]
    fn route_index(&self) -> usize {
        self.core().route_index
    }

    /// The route edge the vehicle is logically on.
    fn current_edge(&self) -> Option<&EdgeId> {
        let core = self.core();
        core.route.edges.get(core.route_index)
    }

    #[inline]
    fn depart_pos(&self) -> f64 {
        self.core().parameter.depart_pos
    }

    #[inline]
    fn position_on_lane(&self) -> f64 {
        self.core().pos
    }

    #[inline]
    fn speed(&self) -> f64 {
        self.core().speed
    }

    #[inline]
    fn is_stopped(&self) -> bool {
        self.core().stopped
    }

    #[inline]
    fn has_departed(&self) -> bool {
        self.core().departed
    }

    fn stops(&self) -> &[VehicleStop] {
        &self.core().stops
    }

    /// `true` if a remaining halt is at stopping place `stop`.
    fn stops_at(&self, stop: &StopId) -> bool {
        self.stops().iter().any(|s| s.stop.as_ref() == Some(stop))
    }

    /// `true` if a remaining halt is on `edge`.
    fn stops_at_edge(&self, edge: &EdgeId) -> bool {
        self.stops().iter().any(|s| &s.edge == edge)
    }

    /// The halt the vehicle currently stands at.
    fn current_stop(&self) -> Option<&VehicleStop> {
        if self.is_stopped() { self.stops().first() } else { None }
    }

    /// `true` if halted at a stop whose range covers `pos`.
    fn is_stopped_in_range(&self, pos: f64, tolerance: f64) -> bool {
        self.current_stop().is_some_and(|s| s.contains(pos, tolerance))
    }

    /// Distance driven since departure.
    fn driven_distance(&self, network: &Network) -> f64 {
        self.route().distance_between(
            network,
            self.depart_pos(),
            self.position_on_lane(),
            0,
            self.route_index(),
        )
    }

    fn transportables(&self) -> &[TransportableId] {
        &self.core().transportables
    }

    /// Take `t` aboard.  No-op if it already is.
    fn add_transportable(&mut self, t: TransportableId) {
        let list = &mut self.core_mut().transportables;
        if !list.contains(&t) {
            list.push(t);
        }
    }

    /// Returns `true` if `t` was aboard.
    fn remove_transportable(&mut self, t: &TransportableId) -> bool {
        let list = &mut self.core_mut().transportables;
        let before = list.len();
        list.retain(|x| x != t);
        before != list.len()
    }

    /// Append a planned halt.
    fn add_stop(&mut self, stop: VehicleStop) {
        self.core_mut().stops.push(stop);
    }

    /// Mark the vehicle as entered into the network.
    fn depart(&mut self) {
        self.core_mut().departed = true;
    }

    /// Halt at the front stop.  Returns `false` if no stop is planned.
    fn halt(&mut self) -> bool {
        let core = self.core_mut();
        if core.stops.is_empty() {
            return false;
        }
        core.stopped = true;
        core.speed = 0.0;
        true
    }

    /// Leave the current halt, dropping it from the plan.
    fn resume(&mut self) {
        let core = self.core_mut();
        if core.stopped {
            core.stopped = false;
            core.stops.remove(0);
        }
    }
}
