//! Per-kind registries of entities waiting for a vehicle.
//!
//! Entities are kept per edge in registration order; dispatchers scan them
//! front to back, so the first to arrive is the first offered a seat.

use std::collections::BTreeMap;

use log::debug;
use ts_core::{EdgeId, TransportableId, TransportableKind};

/// Entities of one kind currently waiting for a ride.
#[derive(Clone, Debug)]
pub struct WaitingRegistry {
    kind:    TransportableKind,
    by_edge: BTreeMap<EdgeId, Vec<TransportableId>>,
}

impl WaitingRegistry {
    pub fn new(kind: TransportableKind) -> Self {
        Self { kind, by_edge: BTreeMap::new() }
    }

    #[inline]
    pub fn kind(&self) -> TransportableKind {
        self.kind
    }

    /// Append `id` to the queue of `edge`.  No-op if it already waits there.
    pub fn add_waiting(&mut self, edge: EdgeId, id: TransportableId) {
        let queue = self.by_edge.entry(edge).or_default();
        if !queue.contains(&id) {
            queue.push(id);
        }
    }

    /// Remove `id` from whichever queue holds it.  Returns `true` if it was
    /// waiting.
    pub fn remove_waiting(&mut self, id: &TransportableId) -> bool {
        let mut found = false;
        self.by_edge.retain(|_, queue| {
            let before = queue.len();
            queue.retain(|t| t != id);
            found |= before != queue.len();
            !queue.is_empty()
        });
        found
    }

    /// Cancel the wait of `id`, e.g. because it is removed from the
    /// simulation.
    pub fn abort_waiting_for_vehicle(&mut self, id: &TransportableId) -> bool {
        let found = self.remove_waiting(id);
        if found {
            debug!("{} '{id}' stops waiting for a vehicle", self.kind);
        }
        found
    }

    /// Entities waiting on `edge`, first-registered first.
    pub fn waiting_on(&self, edge: &EdgeId) -> &[TransportableId] {
        self.by_edge.get(edge).map_or(&[], Vec::as_slice)
    }

    pub fn is_waiting(&self, id: &TransportableId) -> bool {
        self.by_edge.values().any(|q| q.contains(id))
    }

    /// Total number of waiting entities.
    pub fn count(&self) -> usize {
        self.by_edge.values().map(Vec::len).sum()
    }
}
