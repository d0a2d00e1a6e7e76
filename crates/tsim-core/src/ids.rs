//! Strongly typed identifier wrappers.
//!
//! Route, trip and driver identifiers are opaque strings assigned by the
//! route service.  Wrapping them keeps a `TripId` from being passed where a
//! `RouteId` is expected.  All IDs serialize transparently as plain strings.

use std::fmt;

/// Generate a typed ID wrapper around a `String`.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub String);

        impl $name {
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
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id! {
    /// Identifier of a scheduled route (e.g. `"R"`, `"T100"`).
    pub struct RouteId;
}

string_id! {
    /// Identifier of one registered trip, issued by the trip service.
    pub struct TripId;
}

string_id! {
    /// Identifier of the driver assigned to a departure slot.
    pub struct DriverId;
}
