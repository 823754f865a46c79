//! The `Participant` value type.

use super::position::Position;
use std::fmt;

/// An immutable member of the roster.
///
/// Equality and hashing are by identifier alone. Lab-sharing is a separate,
/// explicitly symmetric predicate (`shares_lab_with`) rather than folded
/// into equality.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub labs: Vec<String>,
}

impl Participant {
    /// Builds a participant, rejecting an empty name or an empty lab list.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        labs: Vec<String>,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("participant name must not be empty".to_string());
        }
        if labs.is_empty() {
            return Err("participant lab list must not be empty".to_string());
        }
        Ok(Participant {
            id: id.into(),
            name,
            position,
            labs,
        })
    }

    /// Two participants "share a lab" iff their lab lists intersect. This is
    /// symmetric by construction, unlike a one-sided containment check.
    pub fn shares_lab_with(&self, other: &Participant) -> bool {
        self.labs.iter().any(|l| other.labs.contains(l))
    }

    /// Labs shared between `self` and `other`, for conflict bookkeeping.
    pub fn shared_labs_with<'a>(&'a self, other: &Participant) -> Vec<&'a str> {
        self.labs
            .iter()
            .filter(|l| other.labs.contains(l))
            .map(String::as_str)
            .collect()
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Participant {}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
