//! `DrivingStage` — a ride aboard a vehicle, from waiting to alighting.
//!
//! # Lifecycle
//!
//! ```text
//! new ──proceed──▶ waiting ──set_vehicle──▶ riding ──set_arrived──▶ done
//!                     │                        │
//!                     └────────abort───────────┴──▶ done
//! ```
//!
//! A stage is *waiting* exactly while it has no [`BoundVehicle`]; there is
//! no separate status flag.  Binding happens once, either inside
//! [`proceed`](DrivingStage::proceed) when a suitable vehicle is already
//! at hand, or later through a dispatcher calling
//! [`set_vehicle`](DrivingStage::set_vehicle).
//!
//! | Module     | Contents                                          |
//! |------------|---------------------------------------------------|
//! | (this)     | state, activation, binding, termination           |
//! | [`query`]  | position / angle / speed / descriptions           |
//! | [`report`] | trip statistics record and route fragment output  |

mod query;
mod report;

use std::collections::BTreeSet;

use log::{debug, info, warn};
use ts_core::{DepartProcedure, EdgeId, Position, SimTime, StopId, VehicleClass, VehicleId};
use ts_network::Network;
use ts_vehicle::Vehicle;

use crate::{
    ReservationDispatcher, ReservationRequest, SimNet, Stage, StageCommon, StageError, StageResult,
    TransportableInfo,
};

/// Accepted-lines wildcard: any vehicle that stops at the destination.
pub const ANY_LINE: &str = "ANY";

/// Accepted-lines entry requesting an on-demand vehicle.
pub const TAXI_LINE: &str = "taxi";

/// Vehicle id reported for a ride that never boarded.
pub const NO_VEHICLE: &str = "NULL";

// ── BoundVehicle ──────────────────────────────────────────────────────────────

/// The vehicle carrying the entity, with its identity captured at boarding.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundVehicle {
    pub vehicle: VehicleId,
    pub line:    String,
    pub vclass:  VehicleClass,
}

// ── TravelledDistance ─────────────────────────────────────────────────────────

/// Distance bookkeeping over the life of a ride.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum TravelledDistance {
    /// Never boarded.
    #[default]
    Unset,
    /// Distance the vehicle had driven when the entity boarded.
    Baseline(f64),
    /// Distance ridden by the entity.
    Net(f64),
}

impl TravelledDistance {
    /// The stored value; `-1` when unset.
    pub fn value(self) -> f64 {
        match self {
            TravelledDistance::Unset => -1.0,
            TravelledDistance::Baseline(d) | TravelledDistance::Net(d) => d,
        }
    }
}

// ── DrivingStage ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct DrivingStage {
    pub common: StageCommon,

    /// Vehicle ids, line labels, [`ANY_LINE`] or [`TAXI_LINE`].  Fixed at
    /// construction; iterates in sorted order.
    lines: BTreeSet<String>,

    intended_vehicle: Option<VehicleId>,
    intended_depart:  Option<SimTime>,

    vehicle:  Option<BoundVehicle>,
    distance: TravelledDistance,

    waiting_since: Option<SimTime>,

    // Where the entity waited.  Kept after boarding as the ride's origin.
    waiting_edge:          Option<EdgeId>,
    waiting_pos:           f64,
    waiting_stop_position: Option<Position>,
    origin_stop:           Option<StopId>,
}

impl DrivingStage {
    pub fn new<I, S>(destination: EdgeId, destination_stop: Option<StopId>, arrival_pos: f64, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            common:                StageCommon::new(destination, destination_stop, arrival_pos),
            lines:                 lines.into_iter().map(Into::into).collect(),
            intended_vehicle:      None,
            intended_depart:       None,
            vehicle:               None,
            distance:              TravelledDistance::Unset,
            waiting_since:         None,
            waiting_edge:          None,
            waiting_pos:           0.0,
            waiting_stop_position: None,
            origin_stop:           None,
        }
    }

    /// Hint which vehicle, departing when, the entity means to take.
    pub fn with_intended(mut self, vehicle: Option<VehicleId>, depart: Option<SimTime>) -> Self {
        self.intended_vehicle = vehicle;
        self.intended_depart = depart;
        self
    }

    /// A fresh copy of the planned leg: destination, lines and intent only.
    pub fn clone_unbound(&self) -> Self {
        Self::new(
            self.common.destination.clone(),
            self.common.destination_stop.clone(),
            self.common.arrival_pos,
            self.lines.iter().cloned(),
        )
        .with_intended(self.intended_vehicle.clone(), self.intended_depart)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn lines(&self) -> &BTreeSet<String> {
        &self.lines
    }

    pub fn intended_vehicle(&self) -> Option<&VehicleId> {
        self.intended_vehicle.as_ref()
    }

    pub fn intended_depart(&self) -> Option<SimTime> {
        self.intended_depart
    }

    pub fn vehicle(&self) -> Option<&BoundVehicle> {
        self.vehicle.as_ref()
    }

    /// Id of the carrying vehicle, or `"NULL"` if none was ever bound.
    pub fn vehicle_id(&self) -> &str {
        self.vehicle.as_ref().map_or(NO_VEHICLE, |b| b.vehicle.as_str())
    }

    pub fn distance(&self) -> TravelledDistance {
        self.distance
    }

    pub fn waiting_since(&self) -> Option<SimTime> {
        self.waiting_since
    }

    pub fn origin_stop(&self) -> Option<&StopId> {
        self.origin_stop.as_ref()
    }

    #[inline]
    pub fn arrival_pos(&self) -> f64 {
        self.common.arrival_pos
    }

    /// `true` until a vehicle is bound.
    #[inline]
    pub fn is_waiting_for_vehicle(&self) -> bool {
        self.vehicle.is_none()
    }

    fn is_taxi_request(&self) -> bool {
        self.lines.len() == 1 && self.lines.contains(TAXI_LINE)
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// May `vehicle` carry this entity?
    ///
    /// Yes if its id or line label is accepted, or if [`ANY_LINE`] is
    /// accepted and the vehicle halts at the destination (the stop if one
    /// is set, else the destination edge).
    pub fn is_waiting_for(&self, vehicle: &dyn Vehicle) -> bool {
        self.lines.contains(vehicle.id().as_str())
            || self.lines.contains(vehicle.parameter().line.as_str())
            || (self.lines.contains(ANY_LINE)
                && match &self.common.destination_stop {
                    Some(stop) => vehicle.stops_at(stop),
                    None => vehicle.stops_at_edge(&self.common.destination),
                })
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Bind `vehicle` and remember how far it had driven so far.
    pub fn set_vehicle(&mut self, vehicle: &dyn Vehicle, network: &Network) {
        self.vehicle = Some(BoundVehicle {
            vehicle: vehicle.id().clone(),
            line:    vehicle.parameter().line.clone(),
            vclass:  vehicle.vclass(),
        });
        self.distance = TravelledDistance::Baseline(vehicle.driven_distance(network));
    }

    /// Activate the stage after `previous` ended.
    ///
    /// Boards immediately when the entity starts its itinerary inside a
    /// triggered vehicle, or when a triggered vehicle stands ready at the
    /// waiting location; otherwise registers the entity as waiting.
    ///
    /// # Errors
    ///
    /// [`StageError::MissingTriggerVehicle`] if the entity departs
    /// triggered and the vehicle named by its lines does not exist.  The
    /// stage is left untouched in that case.
    pub fn proceed<D: ReservationDispatcher>(
        &mut self,
        net:      &mut SimNet<D>,
        info:     &TransportableInfo,
        now:      SimTime,
        previous: &Stage,
    ) -> StageResult<()> {
        let start = match previous {
            Stage::Trip(_) => previous.origin_stop(),
            _ => previous.destination_stop(),
        }
        .cloned();
        let prev_edge = previous.edge(net).cloned();
        let prev_pos = previous.edge_pos(net, now);

        if info.depart_procedure == DepartProcedure::Triggered && info.is_first_real_stage() {
            let vehicle_id = VehicleId::new(self.lines.first().cloned().unwrap_or_default());
            let vehicle = net
                .vehicles
                .get_mut(&vehicle_id)
                .ok_or_else(|| StageError::MissingTriggerVehicle {
                    vehicle:       vehicle_id.clone(),
                    transportable: info.id.clone(),
                    kind:          info.kind,
                })?;
            // Never waits, so no waiting location (and no `from`) is recorded.
            self.waiting_since = Some(now);
            self.set_vehicle(&*vehicle, &net.network);
            vehicle.add_transportable(info.id.clone());
            info!("{} '{}' starts inside triggered vehicle '{vehicle_id}'", info.kind, info.id);
            return Ok(());
        }

        // Resolve the waiting location before touching any state.
        let at_stop = start.and_then(|stop| match net.network.stop_edge(&stop) {
            Some(edge) => Some((stop, edge.clone())),
            None => {
                warn!("{} '{}' waits for unknown stop '{stop}'; using its current edge", info.kind, info.id);
                None
            }
        });
        let (edge, origin_stop) = match at_stop {
            Some((stop, edge)) => (edge, Some(stop)),
            None => {
                let edge = prev_edge.ok_or_else(|| StageError::NoWaitingEdge {
                    transportable: info.id.clone(),
                    kind:          info.kind,
                })?;
                (edge, None)
            }
        };

        self.waiting_since = Some(now);
        match &origin_stop {
            Some(stop) => {
                let slot = net.occupancy.stop_mut(stop).add_transportable(info.id.clone());
                self.waiting_pos = net
                    .network
                    .stop(stop)
                    .map_or(prev_pos, |s| s.waiting_position_on_lane(Some(slot)));
                self.waiting_stop_position = net.network.stop_wait_position(stop, Some(slot));
            }
            None => {
                self.waiting_pos = prev_pos;
                self.waiting_stop_position = None;
            }
        }
        self.waiting_edge = Some(edge.clone());
        self.origin_stop = origin_stop;

        if let Some(vehicle_id) = net.waiting_vehicle(&edge, self, self.waiting_pos) {
            if let Some(vehicle) = net.vehicles.get_mut(&vehicle_id) {
                let triggered = vehicle.parameter().depart_procedure == info.kind.triggering_procedure();
                if triggered && !vehicle.has_departed() {
                    self.set_vehicle(&*vehicle, &net.network);
                    vehicle.add_transportable(info.id.clone());
                    self.leave_origin_stop(net, info);
                    net.insertion.add(vehicle_id.clone());
                    net.occupancy.edge_mut(&edge).remove_waiting_vehicle(&vehicle_id);
                    net.vehicles.unregister_one_waiting(info.kind);
                    debug!("{} '{}' triggers vehicle '{vehicle_id}' on '{edge}'", info.kind, info.id);
                    return Ok(());
                }
            }
        }

        self.register_waiting(net, info, now, edge);
        Ok(())
    }

    fn register_waiting<D: ReservationDispatcher>(
        &self,
        net:  &mut SimNet<D>,
        info: &TransportableInfo,
        now:  SimTime,
        edge: EdgeId,
    ) {
        net.waiting_registry_mut(info.kind).add_waiting(edge.clone(), info.id.clone());
        net.occupancy.edge_mut(&edge).add_transportable(info.kind, info.id.clone());
        debug!("{} '{}' waits on '{edge}' for {}", info.kind, info.id, self.joined_lines(","));

        if info.kind.is_person() && self.is_taxi_request() {
            net.reservations.add_reservation(ReservationRequest {
                person:       info.id.clone(),
                reserved_at:  now,
                pickup_after: now,
                from:         edge,
                from_pos:     self.waiting_pos,
                to:           self.common.destination.clone(),
                to_pos:       self.common.arrival_pos,
            });
            info!("person '{}' reserved a taxi to '{}'", info.id, self.common.destination);
        }
    }

    /// Release the waiting slot held at the origin stop, if any.
    pub(crate) fn leave_origin_stop<D: ReservationDispatcher>(&self, net: &mut SimNet<D>, info: &TransportableInfo) {
        if let Some(stop) = &self.origin_stop {
            net.occupancy.stop_mut(stop).remove_transportable(&info.id);
        }
    }

    /// Finish the ride: fix the net distance ridden and, if the vehicle is
    /// halted, the actual alighting position.
    ///
    /// Returns a message if the bound vehicle no longer exists; the
    /// distance ridden is then unknown.
    pub fn set_arrived<D: ReservationDispatcher>(
        &mut self,
        net:  &SimNet<D>,
        info: &TransportableInfo,
        now:  SimTime,
    ) -> Option<String> {
        self.common.set_arrived(now);
        let Some(bound) = &self.vehicle else {
            self.distance = TravelledDistance::Unset;
            return None;
        };
        let Some(vehicle) = net.vehicles.get(&bound.vehicle) else {
            let msg = format!(
                "vehicle '{}' carrying {} '{}' vanished before arrival",
                bound.vehicle, info.kind, info.id
            );
            warn!("{msg}");
            self.distance = TravelledDistance::Unset;
            return Some(msg);
        };
        let baseline = match self.distance {
            TravelledDistance::Baseline(d) => d,
            _ => 0.0,
        };
        self.distance = TravelledDistance::Net(vehicle.driven_distance(&net.network) - baseline);
        if vehicle.is_stopped() {
            self.common.arrival_pos = vehicle.position_on_lane();
        }
        debug!("{} '{}' left vehicle '{}' at {now}", info.kind, info.id, bound.vehicle);
        None
    }

    /// Cut the ride short.  A riding entity jumps out of its vehicle; a
    /// waiting one is removed from the waiting registries.  Distance and
    /// arrival fields are left as they are.
    pub fn abort<D: ReservationDispatcher>(&mut self, net: &mut SimNet<D>, info: &TransportableInfo) {
        match &self.vehicle {
            Some(bound) => match net.vehicles.get_mut(&bound.vehicle) {
                Some(vehicle) => {
                    vehicle.remove_transportable(&info.id);
                }
                None => warn!("{} '{}' aborts in vanished vehicle '{}'", info.kind, info.id, bound.vehicle),
            },
            None => {
                net.waiting_registry_mut(info.kind).abort_waiting_for_vehicle(&info.id);
                if let Some(edge) = &self.waiting_edge {
                    net.occupancy.edge_mut(edge).remove_transportable(info.kind, &info.id);
                }
                self.leave_origin_stop(net, info);
            }
        }
    }

    pub(crate) fn joined_lines(&self, sep: &str) -> String {
        self.lines.iter().map(String::as_str).collect::<Vec<_>>().join(sep)
    }
}
