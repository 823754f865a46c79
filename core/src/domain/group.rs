//! `Group` and the `Groups` first-class collection.

use super::participant::Participant;
use crate::error::EngineError;

/// A single group's output roster: an identifier plus an ordered,
/// duplicate-free list of participants.
#[derive(Debug, Clone)]
pub struct Group {
    pub id: String,
    participants: Vec<Participant>,
}

impl Group {
    pub fn new(id: impl Into<String>, participants: Vec<Participant>) -> Result<Self, EngineError> {
        let mut seen = std::collections::HashSet::new();
        for p in &participants {
            if !seen.insert(p.id.clone()) {
                return Err(EngineError::InvalidInput(format!(
                    "duplicate participant {} in group",
                    p.id
                )));
            }
        }
        Ok(Group {
            id: id.into(),
            participants,
        })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Ordered sequence of `Group` with distinct identifiers; insertion order is
/// the observable group order.
#[derive(Debug, Clone, Default)]
pub struct Groups {
    groups: Vec<Group>,
}

impl Groups {
    pub fn new(groups: Vec<Group>) -> Result<Self, EngineError> {
        let mut seen = std::collections::HashSet::new();
        for g in &groups {
            if !seen.insert(g.id.clone()) {
                return Err(EngineError::InvalidInput(format!(
                    "duplicate group id {} in Groups",
                    g.id
                )));
            }
        }
        Ok(Groups { groups })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Group> {
        self.groups.get(idx)
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
