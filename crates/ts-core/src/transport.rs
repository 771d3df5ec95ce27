//! Classification enums shared across the vehicle and stage crates.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── TransportableKind ─────────────────────────────────────────────────────────

/// Whether an itinerary belongs to a person or a freight container.
///
/// The kind selects the waiting coordinator, the triggered-departure mode a
/// vehicle must carry to pick the entity up, and the tag names used in
/// output.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportableKind {
    Person,
    Container,
}

impl TransportableKind {
    #[inline]
    pub fn is_person(self) -> bool {
        matches!(self, TransportableKind::Person)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportableKind::Person    => "person",
            TransportableKind::Container => "container",
        }
    }

    /// Tag used for a ride in trip statistics and route files.
    pub fn ride_tag(self) -> &'static str {
        match self {
            TransportableKind::Person    => "ride",
            TransportableKind::Container => "transport",
        }
    }

    /// The vehicle departure procedure that waits for this kind of entity.
    pub fn triggering_procedure(self) -> DepartProcedure {
        match self {
            TransportableKind::Person    => DepartProcedure::Triggered,
            TransportableKind::Container => DepartProcedure::ContainerTriggered,
        }
    }
}

impl fmt::Display for TransportableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DepartProcedure ───────────────────────────────────────────────────────────

/// How the departure time of a vehicle or transportable is determined.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepartProcedure {
    /// Departs at the scheduled time.
    #[default]
    Given,
    /// Departs once a person boarded (vehicles) or together with the vehicle
    /// it is scheduled to ride (transportables).
    Triggered,
    /// Vehicle departs once a container was loaded.
    ContainerTriggered,
}

impl DepartProcedure {
    pub fn as_str(self) -> &'static str {
        match self {
            DepartProcedure::Given              => "given",
            DepartProcedure::Triggered          => "triggered",
            DepartProcedure::ContainerTriggered => "containerTriggered",
        }
    }
}

impl FromStr for DepartProcedure {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "given"              => Ok(DepartProcedure::Given),
            "triggered"          => Ok(DepartProcedure::Triggered),
            "containerTriggered" => Ok(DepartProcedure::ContainerTriggered),
            other => Err(CoreError::UnknownDepartProcedure(other.to_owned())),
        }
    }
}

// ── VehicleClass ──────────────────────────────────────────────────────────────

/// Abstract vehicle class, used to break ride statistics down by mode.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum VehicleClass {
    /// No class recorded (e.g. a ride that never boarded).
    #[default]
    Ignoring,
    Passenger,
    Taxi,
    Bus,
    Tram,
    RailUrban,
    Rail,
    Bicycle,
    Delivery,
    Ship,
}

impl VehicleClass {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Ignoring  => "ignoring",
            VehicleClass::Passenger => "passenger",
            VehicleClass::Taxi      => "taxi",
            VehicleClass::Bus       => "bus",
            VehicleClass::Tram      => "tram",
            VehicleClass::RailUrban => "rail_urban",
            VehicleClass::Rail      => "rail",
            VehicleClass::Bicycle   => "bicycle",
            VehicleClass::Delivery  => "delivery",
            VehicleClass::Ship      => "ship",
        }
    }

    /// `true` for tracked classes.
    #[inline]
    pub fn is_rail(self) -> bool {
        matches!(self, VehicleClass::Tram | VehicleClass::RailUrban | VehicleClass::Rail)
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleClass {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Ok(match s {
            "ignoring"   => VehicleClass::Ignoring,
            "passenger"  => VehicleClass::Passenger,
            "taxi"       => VehicleClass::Taxi,
            "bus"        => VehicleClass::Bus,
            "tram"       => VehicleClass::Tram,
            "rail_urban" => VehicleClass::RailUrban,
            "rail"       => VehicleClass::Rail,
            "bicycle"    => VehicleClass::Bicycle,
            "delivery"   => VehicleClass::Delivery,
            "ship"       => VehicleClass::Ship,
            other => return Err(CoreError::UnknownVehicleClass(other.to_owned())),
        })
    }
}
