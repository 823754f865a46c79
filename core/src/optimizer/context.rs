//! Frozen, precomputed per-session data shared (read-only) across the whole
//! population for the lifetime of one optimizer run.

use crate::domain::{Participant, Program, Session};

/// One session's roster plus the program-wide indices its members occupy,
/// computed once so fitness evaluation never re-derives them.
pub struct SessionContext<'a> {
    pub roster: Vec<&'a Participant>,
    pub global_idx: Vec<usize>,
    pub group_num: usize,
    pub min: usize,
    pub max: usize,
}

pub fn build_contexts<'a>(program: &'a Program) -> Vec<SessionContext<'a>> {
    let global_idx_of: std::collections::HashMap<&str, usize> = program
        .participants
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();

    program
        .sessions
        .iter()
        .map(|session: &Session| {
            let roster = program.session_roster(session);
            let global_idx = roster.iter().map(|p| global_idx_of[p.id.as_str()]).collect();
            SessionContext {
                roster,
                global_idx,
                group_num: session.group_num as usize,
                min: session.min as usize,
                max: session.max as usize,
            }
        })
        .collect()
}
