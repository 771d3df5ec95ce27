//! `ts-stage` — itineraries of persons and containers, and the ride stage.
//!
//! The centre of this crate is [`DrivingStage`]: the leg of an itinerary in
//! which an entity waits for a suitable vehicle, rides it, and steps off at
//! its destination.  Around it sit the generic stage types, the entities
//! that own itineraries, and the services stages talk to.
//!
//! | Module            | Contents                                                     |
//! |-------------------|--------------------------------------------------------------|
//! | [`driving`]       | `DrivingStage`: activation, binding, queries, reporting      |
//! | [`stage`]         | `Stage` enum, `StageType`, `StageCommon`, waiting/trip legs  |
//! | [`transportable`] | `Transportable`, `TransportableInfo`, `TransportableStore`   |
//! | [`context`]       | `SimNet` service bundle, `STOP_TOLERANCE`                    |
//! | [`waiting`]       | `WaitingRegistry` — per-kind FIFO queues per edge            |
//! | [`reservation`]   | `ReservationDispatcher` trait, `ReservationBook`             |
//! | [`board`]         | vehicle-side boarding, departure and alighting               |
//! | [`loader`]        | parse `<ride>`/`<transport>` fragments into stages           |
//! | [`error`]         | `StageError`, `StageResult<T>`                               |
//!
//! # Step protocol
//!
//! ```text
//! person.depart(net, t)              ─▶ first DrivingStage::proceed
//!                                        (board now, or wait on an edge)
//! board_waiting(net, store, veh, t)  ─▶ DrivingStage::set_vehicle per match
//! notify_departed(store, veh, t)     ─▶ departure times of passengers
//! alight_arrived(net, store, veh, t) ─▶ DrivingStage::set_arrived + next stage
//! ```

pub mod board;
pub mod context;
pub mod driving;
pub mod error;
pub mod loader;
pub mod reservation;
pub mod stage;
pub mod transportable;
pub mod waiting;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use board::{alight_arrived, board_waiting, notify_departed};
pub use context::{SimNet, STOP_TOLERANCE};
pub use driving::{BoundVehicle, DrivingStage, TravelledDistance, ANY_LINE, NO_VEHICLE, TAXI_LINE};
pub use error::{StageError, StageResult};
pub use loader::{load_rides, load_rides_from_path, LoadedRide};
pub use reservation::{ReservationBook, ReservationDispatcher, ReservationRequest};
pub use stage::{Stage, StageCommon, StageType, TripStage, WaitingStage};
pub use transportable::{Transportable, TransportableInfo, TransportableStore};
pub use waiting::WaitingRegistry;
