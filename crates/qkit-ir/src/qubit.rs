//! Qubit and classical bit handles.
//!
//! A circuit addresses its bits by id. Callers that splice operations refer
//! to bits by [`Bit`] handle, which also records the register the bit was
//! declared in, so a handle from another circuit with a clashing id is still
//! told apart.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! bit_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                $name(id)
            }
        }
    };
}

bit_id!(
    /// Circuit-wide qubit id, displayed as `q<n>`.
    QubitId,
    "q"
);

bit_id!(
    /// Circuit-wide classical bit id, displayed as `c<n>`.
    ClbitId,
    "c"
);

/// A bit handle: an id plus the register slot it was declared in.
///
/// Two handles are the same bit only if id, register and index all agree.
/// Ordering follows the id first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bit<I> {
    /// Circuit-wide id.
    pub id: I,
    /// Declaring register, if any.
    pub register: Option<String>,
    /// Slot within the declaring register.
    pub index: Option<u32>,
}

/// Qubit handle.
pub type Qubit = Bit<QubitId>;

/// Classical bit handle.
pub type Clbit = Bit<ClbitId>;

impl<I> Bit<I> {
    /// A handle that belongs to no register.
    pub fn new(id: I) -> Self {
        Self {
            id,
            register: None,
            index: None,
        }
    }

    /// A handle for slot `index` of `register`.
    pub fn with_register(id: I, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some(register.into()),
            index: Some(index),
        }
    }
}

impl<I: fmt::Display> fmt::Display for Bit<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.register, self.index) {
            (Some(reg), Some(idx)) => write!(f, "{reg}[{idx}]"),
            _ => fmt::Display::fmt(&self.id, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_falls_back_to_id() {
        assert_eq!(Qubit::new(QubitId(0)).to_string(), "q0");
        assert_eq!(Clbit::new(ClbitId(3)).to_string(), "c3");
        assert_eq!(Qubit::with_register(QubitId(1), "qr", 0).to_string(), "qr[0]");
        assert_eq!(Clbit::with_register(ClbitId(1), "cr", 2).to_string(), "cr[2]");
    }

    #[test]
    fn test_handle_identity_includes_register() {
        let a = Qubit::with_register(QubitId(0), "qr1", 0);
        let b = Qubit::with_register(QubitId(0), "qr2", 0);
        assert_ne!(a, b);
        assert_ne!(a, Qubit::new(QubitId(0)));
        assert!(Qubit::new(QubitId(1)) > a);
    }

    #[test]
    fn test_handles_serialize_with_register() {
        let q = Qubit::with_register(QubitId(2), "anc", 1);
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, r#"{"id":2,"register":"anc","index":1}"#);
        let back: Qubit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}
