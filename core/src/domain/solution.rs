//! `Solution`: a complete per-session partition of the roster.

use super::group::Groups;
use super::program::Program;
use crate::error::EngineError;
use std::collections::HashSet;

/// Mapping from session-index to `Groups`, indexed positionally to match
/// `Program::sessions`.
#[derive(Debug, Clone)]
pub struct Solution {
    by_session: Vec<Groups>,
}

impl Solution {
    /// Wraps per-session `Groups`, checking the partition invariants: every
    /// session roster is covered exactly once, every group size is within
    /// bounds, and the group count matches `group_num`.
    pub fn new(program: &Program, by_session: Vec<Groups>) -> Result<Self, EngineError> {
        if by_session.len() != program.sessions.len() {
            return Err(EngineError::InvalidInput(format!(
                "solution has {} sessions, program declares {}",
                by_session.len(),
                program.sessions.len()
            )));
        }
        for (session, groups) in program.sessions.iter().zip(by_session.iter()) {
            if groups.len() != session.group_num as usize {
                return Err(EngineError::InvalidInput(format!(
                    "session {} expects {} groups, got {}",
                    session.id,
                    session.group_num,
                    groups.len()
                )));
            }
            let mut covered = HashSet::new();
            for group in groups {
                let size = group.len();
                if size < session.min as usize || size > session.max as usize {
                    return Err(EngineError::InvalidInput(format!(
                        "session {} group {} has size {size}, outside [{}, {}]",
                        session.id, group.id, session.min, session.max
                    )));
                }
                for p in group.participants() {
                    if !covered.insert(p.id.clone()) {
                        return Err(EngineError::InvalidInput(format!(
                            "session {} assigns {} to more than one group",
                            session.id, p.id
                        )));
                    }
                }
            }
            let expected: HashSet<&String> = session.participants.iter().collect();
            let got: HashSet<&String> = covered.iter().collect();
            if expected != got {
                return Err(EngineError::InvalidInput(format!(
                    "session {} does not partition its declared roster",
                    session.id
                )));
            }
        }
        Ok(Solution { by_session })
    }

    pub fn session(&self, idx: usize) -> &Groups {
        &self.by_session[idx]
    }

    pub fn sessions(&self) -> &[Groups] {
        &self.by_session
    }

    pub fn num_sessions(&self) -> usize {
        self.by_session.len()
    }
}
