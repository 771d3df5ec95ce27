//! Vehicle routes and distances along them.

use ts_core::EdgeId;
use ts_network::Network;

use crate::{VehicleError, VehicleResult};

/// The ordered edges a vehicle drives along.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub edges: Vec<EdgeId>,
}

impl Route {
    /// Build a route, checking that it is non-empty and every edge exists.
    pub fn new(network: &Network, edges: Vec<EdgeId>) -> VehicleResult<Self> {
        if edges.is_empty() {
            return Err(VehicleError::EmptyRoute);
        }
        if let Some(missing) = edges.iter().find(|e| network.edge(e).is_none()) {
            return Err(VehicleError::UnknownEdge(missing.clone()));
        }
        Ok(Self { edges })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn contains(&self, edge: &EdgeId) -> bool {
        self.edges.contains(edge)
    }

    /// Driving distance from `from_pos` on the edge at `from_index` to
    /// `to_pos` on the edge at `to_index`.
    ///
    /// Returns `0.0` when the target lies behind the origin.
    pub fn distance_between(
        &self,
        network:    &Network,
        from_pos:   f64,
        to_pos:     f64,
        from_index: usize,
        to_index:   usize,
    ) -> f64 {
        if to_index < from_index || to_index >= self.edges.len() {
            return 0.0;
        }
        if from_index == to_index {
            return (to_pos - from_pos).max(0.0);
        }
        let length = |i: usize| network.edge_length(&self.edges[i]).unwrap_or_default();
        let mut distance = length(from_index) - from_pos;
        for i in from_index + 1..to_index {
            distance += length(i);
        }
        distance + to_pos
    }
}
