//! `ts-core` — foundational types for the transportable-stage simulation.
//!
//! This crate is a dependency of every other `ts-*` crate.  It intentionally
//! has no `ts-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `EdgeId`, `LaneId`, `StopId`, `VehicleId`, `TransportableId` |
//! | [`geo`]         | `Position`, `Polyline`                                    |
//! | [`time`]        | `SimTime`, `SimClock`, `SimConfig`, `OutputConfig`        |
//! | [`transport`]   | `TransportableKind`, `DepartProcedure`, `VehicleClass`    |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Polyline, Position};
pub use ids::{EdgeId, LaneId, StopId, TransportableId, VehicleId};
pub use time::{OutputConfig, SimClock, SimConfig, SimTime};
pub use transport::{DepartProcedure, TransportableKind, VehicleClass};
