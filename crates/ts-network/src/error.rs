//! Network error type.

use thiserror::Error;

use ts_core::{EdgeId, LaneId, StopId};

/// Errors produced while assembling a `Network`.
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("edge '{0}' defined twice")]
    DuplicateEdge(EdgeId),

    #[error("edge '{0}' needs at least two shape points and one lane")]
    DegenerateEdge(EdgeId),

    #[error("stop '{stop}' references unknown lane '{lane}'")]
    UnknownLane { stop: StopId, lane: LaneId },

    #[error("stop '{stop}' range {begin:.2}..{end:.2} does not fit its lane of length {length:.2}")]
    InvalidStopRange {
        stop:   StopId,
        begin:  f64,
        end:    f64,
        length: f64,
    },

    #[error("stop '{0}' defined twice")]
    DuplicateStop(StopId),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
