//! The `Program` aggregate: a roster plus the sessions run over it.

use super::participant::Participant;
use super::session::Session;
use crate::error::EngineError;
use std::collections::HashSet;

/// The full collection of participants and sessions processed in one
/// assignment request.
#[derive(Debug, Clone)]
pub struct Program {
    pub id: String,
    pub participants: Vec<Participant>,
    pub sessions: Vec<Session>,
}

impl Program {
    /// Validates that every session's roster is a subset of the program's
    /// participants, that participant ids are unique, and — when a session
    /// carries explicit `position_targets` — that the column sums match the
    /// session roster's actual position counts.
    pub fn new(
        id: impl Into<String>,
        participants: Vec<Participant>,
        sessions: Vec<Session>,
    ) -> Result<Self, EngineError> {
        let mut ids = HashSet::new();
        for p in &participants {
            if !ids.insert(p.id.clone()) {
                return Err(EngineError::InvalidInput(format!(
                    "duplicate participant id {}",
                    p.id
                )));
            }
        }

        for (idx, session) in sessions.iter().enumerate() {
            for pid in &session.participants {
                if !ids.contains(pid) {
                    return Err(EngineError::InvalidInput(format!(
                        "session {} references unknown participant {pid}",
                        session.id
                    )));
                }
            }
            if !session.is_feasible() {
                return Err(EngineError::Infeasible {
                    session: idx,
                    reason: format!(
                        "{} participants cannot fill {} groups within [{}, {}]",
                        session.roster_len(),
                        session.group_num,
                        session.min,
                        session.max
                    ),
                });
            }
            if let Some(ref targets) = session.position_targets {
                let by_id: std::collections::HashMap<&str, &Participant> =
                    participants.iter().map(|p| (p.id.as_str(), p)).collect();
                let mut actual: std::collections::HashMap<super::position::Position, u32> =
                    std::collections::HashMap::new();
                for pid in &session.participants {
                    let pos = by_id[pid.as_str()].position;
                    *actual.entry(pos).or_insert(0) += 1;
                }
                let mut claimed: std::collections::HashMap<super::position::Position, u32> =
                    std::collections::HashMap::new();
                for row in targets {
                    for (&pos, &count) in row {
                        *claimed.entry(pos).or_insert(0) += count;
                    }
                }
                for pos in super::position::Position::ORDER {
                    let a = actual.get(&pos).copied().unwrap_or(0);
                    let c = claimed.get(&pos).copied().unwrap_or(0);
                    if a != c {
                        return Err(EngineError::InvalidInput(format!(
                            "session {} position_targets column sum for {pos} is {c}, roster has {a}",
                            session.id
                        )));
                    }
                }
            }
        }

        Ok(Program {
            id: id.into(),
            participants,
            sessions,
        })
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Participants belonging to a session, in the session's declared order.
    pub fn session_roster(&self, session: &Session) -> Vec<&Participant> {
        session
            .participants
            .iter()
            .map(|pid| self.participant(pid).expect("validated at construction"))
            .collect()
    }
}
