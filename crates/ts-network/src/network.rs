//! Road network representation and builder.
//!
//! # Data layout
//!
//! Edges, lanes and stopping places are kept in `BTreeMap`s keyed by their
//! IDs, so every iteration over the network is in name order and therefore
//! deterministic across runs.
//!
//! # Geometry
//!
//! Positions "on an edge" are offsets along the edge's first (rightmost)
//! lane.  Entities waiting beside an edge are drawn [`ROADSIDE_OFFSET`]
//! metres to the curb side, which is the right side of travel unless the
//! network drives on the left.

use std::collections::BTreeMap;

use log::debug;
use ts_core::{EdgeId, LaneId, Polyline, Position, StopId};

use crate::stop::{StoppingPlace, WAITING_DEPTH};
use crate::{NetworkError, NetworkResult};

/// Lateral distance between an edge's centre line and an entity waiting
/// at its side.
pub const ROADSIDE_OFFSET: f64 = 3.0;

/// Default lane width in metres.
pub const DEFAULT_LANE_WIDTH: f64 = 3.2;

// ── Edge / Lane ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id: EdgeId,
    /// Lanes from right to left; never empty.
    pub lanes: Vec<LaneId>,
    pub length: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane {
    pub id: LaneId,
    pub edge: EdgeId,
    /// Index within the edge, 0 is rightmost.
    pub index: usize,
    pub shape: Polyline,
    pub length: f64,
    pub width: f64,
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Immutable road network: edges, their lanes, and the stopping places
/// placed on those lanes.
///
/// Do not construct directly; use [`NetworkBuilder`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Network {
    edges: BTreeMap<EdgeId, Edge>,
    lanes: BTreeMap<LaneId, Lane>,
    stops: BTreeMap<StopId, StoppingPlace>,

    /// `true` if traffic keeps left; mirrors every curb-side offset.
    pub lefthand: bool,
}

impl Network {
    /// Construct an empty network with no edges.
    pub fn empty() -> Self {
        Self::default()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    #[inline]
    pub fn lane(&self, id: &LaneId) -> Option<&Lane> {
        self.lanes.get(id)
    }

    #[inline]
    pub fn stop(&self, id: &StopId) -> Option<&StoppingPlace> {
        self.stops.get(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    pub fn stops(&self) -> impl Iterator<Item = &StoppingPlace> + '_ {
        self.stops.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Length of `edge`, or `None` if it does not exist.
    #[inline]
    pub fn edge_length(&self, edge: &EdgeId) -> Option<f64> {
        self.edge(edge).map(|e| e.length)
    }

    /// The edge a lane belongs to.
    #[inline]
    pub fn lane_edge(&self, lane: &LaneId) -> Option<&EdgeId> {
        self.lane(lane).map(|l| &l.edge)
    }

    /// The edge a stopping place sits on.
    pub fn stop_edge(&self, stop: &StopId) -> Option<&EdgeId> {
        self.stop(stop).and_then(|s| self.lane_edge(&s.lane))
    }

    fn first_lane(&self, edge: &EdgeId) -> Option<&Lane> {
        self.edge(edge)
            .and_then(|e| e.lanes.first())
            .and_then(|l| self.lane(l))
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Signed roadside offset: positive (right) for right-hand traffic.
    #[inline]
    pub fn roadside_offset(&self) -> f64 {
        if self.lefthand { -ROADSIDE_OFFSET } else { ROADSIDE_OFFSET }
    }

    /// Point `pos` metres along `edge`, shifted `lateral` metres to the right.
    pub fn edge_position(&self, edge: &EdgeId, pos: f64, lateral: f64) -> Option<Position> {
        self.first_lane(edge)
            .map(|l| l.shape.position_at_offset(pos, lateral))
    }

    /// Direction of travel of `edge` at `pos`, in radians.
    pub fn edge_angle(&self, edge: &EdgeId, pos: f64) -> Option<f64> {
        self.first_lane(edge).map(|l| l.shape.rotation_at_offset(pos))
    }

    /// Where an entity holding `slot` at `stop` physically stands: on the
    /// curb beside the stop, one row further back per filled row.
    pub fn stop_wait_position(&self, stop: &StopId, slot: Option<usize>) -> Option<Position> {
        let stop = self.stop(stop)?;
        let lane = self.lane(&stop.lane)?;
        let row = stop.waiting_row(slot) as f64;
        let lateral = lane.width / 2.0 + row * WAITING_DEPTH;
        let side = if self.lefthand { -1.0 } else { 1.0 };
        Some(lane.shape.position_at_offset(stop.waiting_position_on_lane(slot), lateral * side))
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ts_core::{Polyline, Position};
/// use ts_network::{NetworkBuilder, StoppingPlace};
///
/// let mut b = NetworkBuilder::new();
/// b.add_edge("E0", Polyline::new(vec![Position::new(0.0, 0.0), Position::new(200.0, 0.0)]), 1);
/// b.add_stop(StoppingPlace::new("stop0", "E0_0", 80.0, 100.0));
/// let net = b.build().unwrap();
/// assert_eq!(net.edge_count(), 1);
/// ```
#[derive(Default)]
pub struct NetworkBuilder {
    edges:    Vec<(EdgeId, Polyline, usize)>,
    stops:    Vec<StoppingPlace>,
    lefthand: bool,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge with `lane_count` parallel lanes sharing `shape`.  Lanes
    /// are named `<edge>_<index>`.
    pub fn add_edge(&mut self, id: impl Into<EdgeId>, shape: Polyline, lane_count: usize) -> &mut Self {
        self.edges.push((id.into(), shape, lane_count));
        self
    }

    pub fn add_stop(&mut self, stop: StoppingPlace) -> &mut Self {
        self.stops.push(stop);
        self
    }

    pub fn lefthand(&mut self, lefthand: bool) -> &mut Self {
        self.lefthand = lefthand;
        self
    }

    /// Consume the builder, validating edge shapes and stop ranges.
    pub fn build(self) -> NetworkResult<Network> {
        let mut edges = BTreeMap::new();
        let mut lanes = BTreeMap::new();

        for (id, shape, lane_count) in self.edges {
            if edges.contains_key(&id) {
                return Err(NetworkError::DuplicateEdge(id));
            }
            if shape.points.len() < 2 || lane_count == 0 {
                return Err(NetworkError::DegenerateEdge(id));
            }
            let length = shape.length();
            let lane_ids: Vec<LaneId> = (0..lane_count)
                .map(|i| LaneId::new(format!("{id}_{i}")))
                .collect();
            for (index, lane_id) in lane_ids.iter().enumerate() {
                lanes.insert(lane_id.clone(), Lane {
                    id:    lane_id.clone(),
                    edge:  id.clone(),
                    index,
                    shape: shape.clone(),
                    length,
                    width: DEFAULT_LANE_WIDTH,
                });
            }
            edges.insert(id.clone(), Edge { id, lanes: lane_ids, length });
        }

        let mut stops = BTreeMap::new();
        for stop in self.stops {
            let Some(lane) = lanes.get(&stop.lane) else {
                return Err(NetworkError::UnknownLane { stop: stop.id, lane: stop.lane });
            };
            if stop.begin_pos < 0.0 || stop.begin_pos > stop.end_pos || stop.end_pos > lane.length {
                return Err(NetworkError::InvalidStopRange {
                    length: lane.length,
                    begin:  stop.begin_pos,
                    end:    stop.end_pos,
                    stop:   stop.id,
                });
            }
            if stops.contains_key(&stop.id) {
                return Err(NetworkError::DuplicateStop(stop.id));
            }
            stops.insert(stop.id.clone(), stop);
        }

        debug!("built network with {} edges, {} lanes, {} stops", edges.len(), lanes.len(), stops.len());
        Ok(Network { edges, lanes, stops, lefthand: self.lefthand })
    }
}
