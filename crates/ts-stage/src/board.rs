//! Vehicle-side dispatch: boarding waiting entities, departing, alighting.
//!
//! These run when a vehicle halts, departs or reaches a stop.  Waiting
//! entities on the vehicle's edge are offered seats persons first, each kind
//! in the order it started waiting.

use log::debug;
use ts_core::{SimTime, TransportableId, TransportableKind, VehicleId};
use ts_vehicle::{Vehicle, VehicleError};

use crate::{ReservationDispatcher, SimNet, StageResult, TransportableStore, STOP_TOLERANCE};

/// Board every entity waiting on `vehicle`'s current edge that accepts the
/// vehicle and stands within its current stop range.  Returns the boarded
/// ids in boarding order.
pub fn board_waiting<D: ReservationDispatcher>(
    net:     &mut SimNet<D>,
    store:   &mut TransportableStore,
    vehicle: &VehicleId,
    now:     SimTime,
) -> StageResult<Vec<TransportableId>> {
    let edge = net
        .vehicles
        .get(vehicle)
        .ok_or_else(|| VehicleError::UnknownVehicle(vehicle.clone()))?
        .current_edge()
        .cloned();
    let Some(edge) = edge else {
        return Ok(Vec::new());
    };

    let mut boarded = Vec::new();
    for kind in [TransportableKind::Person, TransportableKind::Container] {
        let queue = net.waiting_registry(kind).waiting_on(&edge).to_vec();
        for tid in queue {
            let Some(t) = store.get_mut(&tid) else {
                continue;
            };
            let info = t.info();
            let Some(stage) = t.current_driving_mut() else {
                continue;
            };
            let pos = stage.edge_pos(net, now);
            let Some(v) = net.vehicles.get_mut(vehicle) else {
                break;
            };
            if !stage.is_waiting_for(&*v) || !v.is_stopped_in_range(pos, STOP_TOLERANCE) {
                continue;
            }
            stage.set_vehicle(&*v, &net.network);
            v.add_transportable(tid.clone());
            stage.common.set_departed(now);
            stage.leave_origin_stop(net, &info);
            net.waiting_registry_mut(kind).remove_waiting(&tid);
            net.occupancy.edge_mut(&edge).remove_transportable(kind, &tid);
            debug!("{kind} '{tid}' boards '{vehicle}' on '{edge}' at {now}");
            boarded.push(tid);
        }
    }
    Ok(boarded)
}

/// Stamp the departure time on every ride aboard `vehicle` that has none
/// yet.  Call when the vehicle enters the network.
pub fn notify_departed(store: &mut TransportableStore, vehicle: &dyn Vehicle, now: SimTime) {
    for tid in vehicle.transportables() {
        if let Some(stage) = store.get_mut(tid).and_then(|t| t.current_driving_mut()) {
            stage.common.set_departed(now);
        }
    }
}

/// Let every entity aboard `vehicle` whose destination it has reached step
/// off and start its next stage.  Returns the ids that alighted.
///
/// A destination stop is reached when the vehicle halts at that stop; a
/// destination edge when the vehicle halts on it.
pub fn alight_arrived<D: ReservationDispatcher>(
    net:     &mut SimNet<D>,
    store:   &mut TransportableStore,
    vehicle: &VehicleId,
    now:     SimTime,
) -> StageResult<Vec<TransportableId>> {
    let v = net
        .vehicles
        .get(vehicle)
        .ok_or_else(|| VehicleError::UnknownVehicle(vehicle.clone()))?;
    let Some(halt) = v.current_stop().cloned() else {
        return Ok(Vec::new());
    };
    let aboard = v.transportables().to_vec();

    let mut alighted = Vec::new();
    for tid in aboard {
        let Some(t) = store.get_mut(&tid) else {
            continue;
        };
        let Some(stage) = t.current_driving() else {
            continue;
        };
        let reached = match &stage.common.destination_stop {
            Some(stop) => halt.stop.as_ref() == Some(stop),
            None => halt.edge == stage.common.destination,
        };
        if !reached {
            continue;
        }
        if let Some(v) = net.vehicles.get_mut(vehicle) {
            v.remove_transportable(&tid);
        }
        t.proceed(net, now)?;
        debug!("{} '{tid}' alights from '{vehicle}' at {now}", t.kind);
        alighted.push(tid);
    }
    Ok(alighted)
}
