//! Edge-based queue vehicle model.

use ts_core::{LaneId, Position};
use ts_network::Network;

use crate::{Route, Vehicle, VehicleCore, VehicleError, VehicleParameter, VehicleResult};

/// A vehicle of the mesoscopic model: it lives in an edge queue, has no lane
/// and no heading.  Its position is derived from the edge geometry.
#[derive(Debug, Clone)]
pub struct MesoVehicle {
    core: VehicleCore,
}

impl MesoVehicle {
    pub fn new(parameter: VehicleParameter, route: Route) -> Self {
        Self { core: VehicleCore::new(parameter, route) }
    }
}

impl Vehicle for MesoVehicle {
    fn core(&self) -> &VehicleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VehicleCore {
        &mut self.core
    }

    fn lane(&self) -> Option<&LaneId> {
        None
    }

    fn position(&self, network: &Network) -> Position {
        self.current_edge()
            .and_then(|e| network.edge_position(e, self.core.pos, 0.0))
            .unwrap_or_default()
    }

    /// Only the logical position changes; meso vehicles have no lane.
    fn move_to(&mut self, _network: &Network, route_index: usize, pos: f64, speed: f64) -> VehicleResult<()> {
        let len = self.core.route.len();
        if route_index >= len {
            return Err(VehicleError::RouteIndex { index: route_index, len });
        }
        self.core.route_index = route_index;
        self.core.pos = pos;
        self.core.speed = speed;
        Ok(())
    }
}
