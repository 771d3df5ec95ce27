//! The generic stage abstraction and the non-driving stage kinds.
//!
//! An itinerary is a sequence of [`Stage`]s.  Stage 0 is always a
//! [`WaitingStage`] of type `WaitingForDepart` that holds the entity until
//! its departure; later stages are waits, trip placeholders or rides.

use std::fmt;

use ts_core::{EdgeId, SimTime, StopId};

use crate::{DrivingStage, ReservationDispatcher, SimNet, StageResult, TransportableInfo};

// ── StageType ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StageType {
    /// Placeholder holding the entity until it departs.
    WaitingForDepart,
    Waiting,
    Driving,
    /// A door-to-door leg not yet broken down into concrete stages.
    Trip,
}

impl StageType {
    pub fn as_str(self) -> &'static str {
        match self {
            StageType::WaitingForDepart => "waitingForDepart",
            StageType::Waiting          => "waiting",
            StageType::Driving          => "driving",
            StageType::Trip             => "trip",
        }
    }
}

impl fmt::Display for StageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── StageCommon ───────────────────────────────────────────────────────────────

/// Fields every stage carries.
#[derive(Clone, Debug, PartialEq)]
pub struct StageCommon {
    pub destination:      EdgeId,
    /// When set, arrival geometry comes from this stop rather than the edge.
    pub destination_stop: Option<StopId>,
    /// Offset along `destination` at which the stage ends.
    pub arrival_pos:      f64,
    pub departed:         Option<SimTime>,
    pub arrived:          Option<SimTime>,
}

impl StageCommon {
    pub fn new(destination: EdgeId, destination_stop: Option<StopId>, arrival_pos: f64) -> Self {
        Self {
            destination,
            destination_stop,
            arrival_pos,
            departed: None,
            arrived:  None,
        }
    }

    /// Record the departure time; later calls keep the first value.
    pub fn set_departed(&mut self, now: SimTime) {
        if self.departed.is_none() {
            self.departed = Some(now);
        }
    }

    pub fn set_arrived(&mut self, now: SimTime) {
        self.arrived = Some(now);
    }
}

// ── WaitingStage ──────────────────────────────────────────────────────────────

/// Standing still at a position on an edge.
///
/// The waiting position is the stage's `arrival_pos` on its `destination`
/// edge: the entity is already where it waits.
#[derive(Clone, Debug, PartialEq)]
pub struct WaitingStage {
    pub common:   StageCommon,
    stage_type:   StageType,
    /// How long to wait once started; `None` waits until told otherwise.
    pub duration: Option<SimTime>,
    pub started:  Option<SimTime>,
}

impl WaitingStage {
    /// The placeholder every itinerary starts with.
    pub fn for_depart(edge: EdgeId, pos: f64) -> Self {
        Self {
            common:     StageCommon::new(edge, None, pos),
            stage_type: StageType::WaitingForDepart,
            duration:   None,
            started:    None,
        }
    }

    pub fn new(edge: EdgeId, stop: Option<StopId>, pos: f64, duration: Option<SimTime>) -> Self {
        Self {
            common:     StageCommon::new(edge, stop, pos),
            stage_type: StageType::Waiting,
            duration,
            started:    None,
        }
    }

    #[inline]
    pub fn stage_type(&self) -> StageType {
        self.stage_type
    }

    pub fn proceed(&mut self, now: SimTime) {
        self.started = Some(now);
        self.common.set_departed(now);
    }

    /// When a timed wait is over.
    pub fn ends_at(&self) -> Option<SimTime> {
        Some(self.started? + self.duration?)
    }
}

// ── TripStage ─────────────────────────────────────────────────────────────────

/// An unresolved leg from an origin to the destination.
#[derive(Clone, Debug, PartialEq)]
pub struct TripStage {
    pub common:      StageCommon,
    pub origin:      EdgeId,
    pub origin_stop: Option<StopId>,
    pub depart_pos:  f64,
}

impl TripStage {
    pub fn new(origin: EdgeId, origin_stop: Option<StopId>, depart_pos: f64, common: StageCommon) -> Self {
        Self { common, origin, origin_stop, depart_pos }
    }
}

// ── Stage ─────────────────────────────────────────────────────────────────────

/// One leg of an itinerary.
#[derive(Clone, Debug)]
pub enum Stage {
    Waiting(WaitingStage),
    Trip(TripStage),
    Driving(DrivingStage),
}

impl Stage {
    pub fn stage_type(&self) -> StageType {
        match self {
            Stage::Waiting(w) => w.stage_type(),
            Stage::Trip(_)    => StageType::Trip,
            Stage::Driving(_) => StageType::Driving,
        }
    }

    pub fn common(&self) -> &StageCommon {
        match self {
            Stage::Waiting(w) => &w.common,
            Stage::Trip(t)    => &t.common,
            Stage::Driving(d) => &d.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut StageCommon {
        match self {
            Stage::Waiting(w) => &mut w.common,
            Stage::Trip(t)    => &mut t.common,
            Stage::Driving(d) => &mut d.common,
        }
    }

    #[inline]
    pub fn destination(&self) -> &EdgeId {
        &self.common().destination
    }

    #[inline]
    pub fn destination_stop(&self) -> Option<&StopId> {
        self.common().destination_stop.as_ref()
    }

    /// Where a trip placeholder starts; other stages have no origin stop.
    pub fn origin_stop(&self) -> Option<&StopId> {
        match self {
            Stage::Trip(t) => t.origin_stop.as_ref(),
            _ => None,
        }
    }

    pub fn as_driving(&self) -> Option<&DrivingStage> {
        match self {
            Stage::Driving(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_driving_mut(&mut self) -> Option<&mut DrivingStage> {
        match self {
            Stage::Driving(d) => Some(d),
            _ => None,
        }
    }

    /// The edge the entity is on while this stage is active.
    pub fn edge<'a, D: ReservationDispatcher>(&'a self, net: &'a SimNet<D>) -> Option<&'a EdgeId> {
        match self {
            Stage::Waiting(w) => Some(&w.common.destination),
            Stage::Trip(t)    => Some(&t.origin),
            Stage::Driving(d) => d.edge(net),
        }
    }

    /// Offset of the entity along [`edge`](Self::edge).
    pub fn edge_pos<D: ReservationDispatcher>(&self, net: &SimNet<D>, now: SimTime) -> f64 {
        match self {
            Stage::Waiting(w) => w.common.arrival_pos,
            Stage::Trip(t)    => t.depart_pos,
            Stage::Driving(d) => d.edge_pos(net, now),
        }
    }

    /// Activate the stage after `previous` ended.
    pub fn proceed<D: ReservationDispatcher>(
        &mut self,
        net:      &mut SimNet<D>,
        info:     &TransportableInfo,
        now:      SimTime,
        previous: &Stage,
    ) -> StageResult<()> {
        match self {
            Stage::Waiting(w) => w.proceed(now),
            Stage::Trip(t)    => t.common.set_departed(now),
            Stage::Driving(d) => d.proceed(net, info, now, previous)?,
        }
        Ok(())
    }

    /// Finish the stage normally.  Returns a message if bookkeeping could
    /// not be completed.
    pub fn set_arrived<D: ReservationDispatcher>(
        &mut self,
        net:  &SimNet<D>,
        info: &TransportableInfo,
        now:  SimTime,
    ) -> Option<String> {
        match self {
            Stage::Driving(d) => d.set_arrived(net, info, now),
            other => {
                other.common_mut().set_arrived(now);
                None
            }
        }
    }

    /// Cut the stage short, detaching the entity from whatever holds it.
    pub fn abort<D: ReservationDispatcher>(&mut self, net: &mut SimNet<D>, info: &TransportableInfo) {
        if let Stage::Driving(d) = self {
            d.abort(net, info);
        }
    }
}
