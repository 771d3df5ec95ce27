//! On-demand ("taxi") pickup requests.

use ts_core::{EdgeId, SimTime, TransportableId};

/// A request for an on-demand vehicle to fetch a waiting person.
#[derive(Clone, Debug, PartialEq)]
pub struct ReservationRequest {
    pub person:       TransportableId,
    /// When the request was made.
    pub reserved_at:  SimTime,
    /// Earliest time the person may be picked up.
    pub pickup_after: SimTime,
    pub from:         EdgeId,
    pub from_pos:     f64,
    pub to:           EdgeId,
    pub to_pos:       f64,
}

/// Receiver of pickup requests; a fleet dispatcher in a full simulation.
pub trait ReservationDispatcher {
    fn add_reservation(&mut self, request: ReservationRequest);
}

/// Records requests in submission order without serving them.
#[derive(Clone, Debug, Default)]
pub struct ReservationBook {
    requests: Vec<ReservationRequest>,
}

impl ReservationBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[ReservationRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl ReservationDispatcher for ReservationBook {
    fn add_reservation(&mut self, request: ReservationRequest) {
        self.requests.push(request);
    }
}
