//! Lane-resolved vehicle model.

use ts_core::{LaneId, Position};
use ts_network::Network;

use crate::{Route, Vehicle, VehicleCore, VehicleError, VehicleParameter, VehicleResult};

/// A vehicle that drives on a concrete lane and tracks its spatial position
/// and heading.
#[derive(Debug, Clone)]
pub struct MicroVehicle {
    core:     VehicleCore,
    lane:     Option<LaneId>,
    position: Position,
    angle:    f64,
}

impl MicroVehicle {
    /// Create a vehicle placed at its departure position on the first lane
    /// of its route.
    pub fn new(parameter: VehicleParameter, route: Route, network: &Network) -> VehicleResult<Self> {
        let mut vehicle = Self {
            core:     VehicleCore::new(parameter, route),
            lane:     None,
            position: Position::default(),
            angle:    0.0,
        };
        let pos = vehicle.core.pos;
        Vehicle::move_to(&mut vehicle, network, 0, pos, 0.0)?;
        Ok(vehicle)
    }

    /// Leave the network: the vehicle keeps its logical edge but no longer
    /// occupies a lane.
    pub fn leave_lane(&mut self) {
        self.lane = None;
    }
}

impl Vehicle for MicroVehicle {
    fn core(&self) -> &VehicleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VehicleCore {
        &mut self.core
    }

    fn lane(&self) -> Option<&LaneId> {
        self.lane.as_ref()
    }

    fn position(&self, _network: &Network) -> Position {
        self.position
    }

    fn heading(&self) -> Option<f64> {
        Some(self.angle)
    }

    /// Place the vehicle at `pos` on the rightmost lane of route edge
    /// `route_index`, driving at `speed`.
    fn move_to(&mut self, network: &Network, route_index: usize, pos: f64, speed: f64) -> VehicleResult<()> {
        let len = self.core.route.len();
        let edge_id = self
            .core
            .route
            .edges
            .get(route_index)
            .ok_or(VehicleError::RouteIndex { index: route_index, len })?;
        let edge = network
            .edge(edge_id)
            .ok_or_else(|| VehicleError::UnknownEdge(edge_id.clone()))?;
        let lane = edge.lanes.first().and_then(|l| network.lane(l));

        self.position = lane.map_or_else(Position::default, |l| l.shape.position_at_offset(pos, 0.0));
        self.angle = lane.map_or(0.0, |l| l.shape.rotation_at_offset(pos));
        self.lane = lane.map(|l| l.id.clone());
        self.core.route_index = route_index;
        self.core.pos = pos;
        self.core.speed = speed;
        Ok(())
    }
}
