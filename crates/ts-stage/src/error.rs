//! Error types for ts-stage.

use thiserror::Error;
use ts_core::{CoreError, EdgeId, StopId, TransportableId, TransportableKind, VehicleId};
use ts_output::OutputError;
use ts_vehicle::VehicleError;

/// Errors that can occur while running or reporting itinerary stages.
#[derive(Debug, Error)]
pub enum StageError {
    /// A triggered departure names a vehicle that does not exist.  The
    /// scenario cannot be satisfied by waiting, so callers usually halt.
    #[error("vehicle '{vehicle}' not found for triggered departure of {kind} '{transportable}'")]
    MissingTriggerVehicle {
        vehicle:       VehicleId,
        transportable: TransportableId,
        kind:          TransportableKind,
    },

    #[error("{kind} '{transportable}' has no location to wait at")]
    NoWaitingEdge {
        transportable: TransportableId,
        kind:          TransportableKind,
    },

    #[error("unknown transportable '{0}'")]
    UnknownTransportable(TransportableId),

    #[error("duplicate transportable '{0}'")]
    DuplicateTransportable(TransportableId),

    #[error("transportable '{0}' has an empty plan")]
    EmptyPlan(TransportableId),

    #[error("transportable '{0}' has already departed")]
    AlreadyDeparted(TransportableId),

    #[error("unknown edge '{0}'")]
    UnknownEdge(EdgeId),

    #[error("unknown stopping place '{0}'")]
    UnknownStop(StopId),

    #[error("<{tag}> is missing attribute '{attr}'")]
    MissingAttribute { tag: String, attr: &'static str },

    #[error("invalid value '{value}' for attribute '{attr}'")]
    InvalidAttribute { attr: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Vehicle(#[from] VehicleError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Alias for `Result<T, StageError>`.
pub type StageResult<T> = Result<T, StageError>;
