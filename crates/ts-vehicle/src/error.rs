use thiserror::Error;

use ts_core::{EdgeId, StopId, VehicleId};

#[derive(Debug, Error, PartialEq)]
pub enum VehicleError {
    #[error("vehicle '{0}' already exists")]
    DuplicateVehicle(VehicleId),

    #[error("vehicle '{0}' not found")]
    UnknownVehicle(VehicleId),

    #[error("route is empty")]
    EmptyRoute,

    #[error("route references unknown edge '{0}'")]
    UnknownEdge(EdgeId),

    #[error("stop '{0}' is not part of the network")]
    UnknownStop(StopId),

    #[error("route index {index} out of range for a route of {len} edges")]
    RouteIndex { index: usize, len: usize },
}

pub type VehicleResult<T> = Result<T, VehicleError>;
