//! `ts-network` — static topology plus live occupancy.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`network`]   | `Network`, `Edge`, `Lane`, `NetworkBuilder`, edge geometry    |
//! | [`stop`]      | `StoppingPlace` and its waiting-slot layout                   |
//! | [`occupancy`] | `Occupancy` — who waits on which edge and at which stop       |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                            |
//!
//! The `Network` is immutable once built; everything that changes while the
//! simulation runs lives in [`Occupancy`] so the topology can be shared
//! read-only while occupancy is mutated.
//!
//! The `serde` feature derives `Serialize`/`Deserialize` on the network and
//! occupancy types and enables the same feature on `ts-core`.

pub mod error;
pub mod network;
pub mod occupancy;
pub mod stop;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use network::{Edge, Lane, Network, NetworkBuilder, ROADSIDE_OFFSET};
pub use occupancy::{EdgeOccupancy, Occupancy, StopOccupancy};
pub use stop::StoppingPlace;
