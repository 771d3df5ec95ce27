//! `ts-vehicle` — vehicles that carry transportables, and their registry.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                           |
//! |-------------|--------------------------------------------------------------------|
//! | [`route`]   | `Route` — edge sequence with distance queries                      |
//! | [`vehicle`] | `Vehicle` trait, `VehicleCore`, `VehicleParameter`, `VehicleStop`  |
//! | [`micro`]   | `MicroVehicle` — lane-based, exposes a heading                     |
//! | [`meso`]    | `MesoVehicle` — edge-based queue model, no lane, no heading        |
//! | [`control`] | `VehicleControl` registry, `InsertionControl` scheduler            |
//! | [`error`]   | `VehicleError`, `VehicleResult<T>`                                 |
//!
//! # Movement
//!
//! Movement mechanics are not modelled here: the owner of a vehicle places
//! it (`move_to`), halts it at its next stop (`halt`) and releases it
//! (`resume`).  Everything a ride needs to know about the vehicle is read
//! back through the [`Vehicle`] trait.

pub mod control;
pub mod error;
pub mod meso;
pub mod micro;
pub mod route;
pub mod vehicle;


pub use control::{InsertionControl, VehicleControl};
pub use error::{VehicleError, VehicleResult};
pub use meso::MesoVehicle;
pub use micro::MicroVehicle;
pub use route::Route;
pub use vehicle::{Vehicle, VehicleCore, VehicleParameter, VehicleStop};
