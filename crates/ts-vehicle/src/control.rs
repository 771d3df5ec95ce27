//! Vehicle registry and insertion scheduler.

use std::collections::BTreeMap;

use log::debug;
use ts_core::{TransportableKind, VehicleId};

use crate::{Vehicle, VehicleError, VehicleResult};

// ── VehicleControl ────────────────────────────────────────────────────────────

/// Owns every vehicle of the run, keyed by ID.
///
/// Also counts vehicles that sit on an edge waiting for a person or
/// container to trigger their departure.
#[derive(Debug, Default)]
pub struct VehicleControl {
    vehicles:              BTreeMap<VehicleId, Box<dyn Vehicle>>,
    waiting_for_person:    usize,
    waiting_for_container: usize,
}

impl VehicleControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vehicle under its own ID.
    pub fn add(&mut self, vehicle: Box<dyn Vehicle>) -> VehicleResult<()> {
        let id = vehicle.id().clone();
        if self.vehicles.contains_key(&id) {
            return Err(VehicleError::DuplicateVehicle(id));
        }
        debug!("registered vehicle '{id}'");
        self.vehicles.insert(id, vehicle);
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: &VehicleId) -> Option<&dyn Vehicle> {
        self.vehicles.get(id).map(|v| &**v)
    }

    #[inline]
    pub fn get_mut(&mut self, id: &VehicleId) -> Option<&mut (dyn Vehicle + 'static)> {
        self.vehicles.get_mut(id).map(|v| &mut **v)
    }

    pub fn remove(&mut self, id: &VehicleId) -> Option<Box<dyn Vehicle>> {
        self.vehicles.remove(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &VehicleId> + '_ {
        self.vehicles.keys()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    // ── Triggered-departure counters ──────────────────────────────────────

    /// Count one more vehicle waiting for a `kind` entity to board.
    pub fn register_one_waiting(&mut self, kind: TransportableKind) {
        match kind {
            TransportableKind::Person    => self.waiting_for_person += 1,
            TransportableKind::Container => self.waiting_for_container += 1,
        }
    }

    /// A vehicle waiting for a `kind` entity got it.  Saturates at zero.
    pub fn unregister_one_waiting(&mut self, kind: TransportableKind) {
        let counter = match kind {
            TransportableKind::Person    => &mut self.waiting_for_person,
            TransportableKind::Container => &mut self.waiting_for_container,
        };
        *counter = counter.saturating_sub(1);
    }

    pub fn waiting_for(&self, kind: TransportableKind) -> usize {
        match kind {
            TransportableKind::Person    => self.waiting_for_person,
            TransportableKind::Container => self.waiting_for_container,
        }
    }
}

// ── InsertionControl ──────────────────────────────────────────────────────────

/// Vehicles admitted for insertion into the running simulation, in
/// admission order.
#[derive(Debug, Default, Clone)]
pub struct InsertionControl {
    pending: Vec<VehicleId>,
}

impl InsertionControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit `vehicle`.  No-op if it is already pending.
    pub fn add(&mut self, vehicle: VehicleId) {
        if !self.pending.contains(&vehicle) {
            self.pending.push(vehicle);
        }
    }

    pub fn pending(&self) -> &[VehicleId] {
        &self.pending
    }

    /// Hand all pending vehicles to the caller.
    pub fn drain(&mut self) -> Vec<VehicleId> {
        std::mem::take(&mut self.pending)
    }
}
