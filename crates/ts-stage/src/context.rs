//! `SimNet` — the services a stage talks to, passed explicitly.
//!
//! Everything a stage needs from the running simulation (static network,
//! live occupancy, vehicle registry, insertion scheduler, waiting
//! registries, reservation dispatcher, clock) lives here.  Stages never
//! reach for globals; callers hand them `&SimNet` for queries and
//! `&mut SimNet` for transitions.

use ts_core::{DepartProcedure, EdgeId, SimClock, SimConfig, SimTime, TransportableKind, VehicleId};
use ts_network::{Network, Occupancy};
use ts_vehicle::{InsertionControl, Vehicle, VehicleControl};

use crate::{DrivingStage, ReservationBook, ReservationDispatcher, StageResult, WaitingRegistry};

/// How far (metres) an entity may stand from a halted vehicle's stop range
/// and still board it.
pub const STOP_TOLERANCE: f64 = 10.0;

/// Simulation context handed to every stage operation.
pub struct SimNet<D: ReservationDispatcher = ReservationBook> {
    pub network:      Network,
    pub occupancy:    Occupancy,
    pub vehicles:     VehicleControl,
    pub insertion:    InsertionControl,
    pub persons:      WaitingRegistry,
    pub containers:   WaitingRegistry,
    pub reservations: D,
    pub clock:        SimClock,
    pub config:       SimConfig,
}

impl SimNet<ReservationBook> {
    /// A context whose reservations are only recorded.
    pub fn new(network: Network, config: SimConfig) -> StageResult<Self> {
        Self::with_dispatcher(network, config, ReservationBook::new())
    }
}

impl<D: ReservationDispatcher> SimNet<D> {
    pub fn with_dispatcher(network: Network, config: SimConfig, reservations: D) -> StageResult<Self> {
        config.validate()?;
        Ok(Self {
            network,
            occupancy:  Occupancy::new(),
            vehicles:   VehicleControl::new(),
            insertion:  InsertionControl::new(),
            persons:    WaitingRegistry::new(TransportableKind::Person),
            containers: WaitingRegistry::new(TransportableKind::Container),
            reservations,
            clock:      config.make_clock(),
            config,
        })
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn waiting_registry(&self, kind: TransportableKind) -> &WaitingRegistry {
        match kind {
            TransportableKind::Person    => &self.persons,
            TransportableKind::Container => &self.containers,
        }
    }

    pub fn waiting_registry_mut(&mut self, kind: TransportableKind) -> &mut WaitingRegistry {
        match kind {
            TransportableKind::Person    => &mut self.persons,
            TransportableKind::Container => &mut self.containers,
        }
    }

    /// The first vehicle parked on `edge` that `stage` accepts and that can
    /// take a passenger standing at `pos`: either halted with `pos` inside
    /// its stop range, or not yet departed and waiting for a trigger.
    pub fn waiting_vehicle(&self, edge: &EdgeId, stage: &DrivingStage, pos: f64) -> Option<VehicleId> {
        let occupancy = self.occupancy.edge(edge)?;
        occupancy
            .waiting_vehicles()
            .iter()
            .filter_map(|id| self.vehicles.get(id))
            .find(|v| {
                stage.is_waiting_for(*v)
                    && (v.is_stopped_in_range(pos, STOP_TOLERANCE) || awaits_trigger(*v))
            })
            .map(|v| v.id().clone())
    }

    /// Park an undeparted triggered vehicle on its first edge until the
    /// entity it waits for shows up.  Returns `false` if the vehicle is
    /// unknown, already departed or not triggered.
    pub fn park_triggered(&mut self, vehicle: &VehicleId) -> bool {
        let Some(v) = self.vehicles.get(vehicle) else {
            return false;
        };
        if !awaits_trigger(v) {
            return false;
        }
        let kind = match v.parameter().depart_procedure {
            DepartProcedure::ContainerTriggered => TransportableKind::Container,
            _ => TransportableKind::Person,
        };
        let Some(edge) = v.current_edge().cloned() else {
            return false;
        };
        self.occupancy.edge_mut(&edge).add_waiting_vehicle(vehicle.clone());
        self.vehicles.register_one_waiting(kind);
        true
    }
}

fn awaits_trigger(v: &dyn Vehicle) -> bool {
    !v.has_departed()
        && matches!(
            v.parameter().depart_procedure,
            DepartProcedure::Triggered | DepartProcedure::ContainerTriggered
        )
}
