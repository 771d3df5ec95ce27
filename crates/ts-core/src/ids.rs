//! Strongly typed string identifiers.
//!
//! Every object in the simulation is addressed by the name it carries in the
//! scenario files, so IDs wrap a `String` rather than an arena index.  The
//! wrappers keep an edge name from being passed where a vehicle name is
//! expected, and order lexicographically so ID-keyed `BTreeMap`s iterate
//! deterministically.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed ID wrapper around a `String`.
macro_rules! named_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

named_id! {
    /// Name of a directed network edge.
    pub struct EdgeId;
}

named_id! {
    /// Name of a lane; lanes belong to exactly one edge.
    pub struct LaneId;
}

named_id! {
    /// Name of a stopping place (bus stop, container stop, …).
    pub struct StopId;
}

named_id! {
    /// Name of a vehicle.  Also matched against a ride's accepted lines.
    pub struct VehicleId;
}

named_id! {
    /// Name of a person or container.
    pub struct TransportableId;
}
