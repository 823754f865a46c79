//! The optimizer's working representation and its conversion to/from
//! `Solution` at the domain boundary.
//!
//! `individual[s][g]` holds the participant *indices into session s's
//! roster* assigned to group `g`. Indices, not ids, so that the hot
//! crossover/mutation/repair loops never touch strings.

use super::group::{Group, Groups};
use super::program::Program;
use crate::error::EngineError;
use super::solution::Solution;

pub type Individual = Vec<Vec<Vec<usize>>>;

/// Builds the (empty-group-shaped) skeleton for a program: one `Vec` of
/// `group_num` empty groups per session.
pub fn empty_individual(program: &Program) -> Individual {
    program
        .sessions
        .iter()
        .map(|s| vec![Vec::new(); s.group_num as usize])
        .collect()
}

/// Converts a working-representation individual back into a `Solution`,
/// validating partition invariants along the way.
pub fn individual_to_solution(program: &Program, individual: &Individual) -> Result<Solution, EngineError> {
    let mut by_session = Vec::with_capacity(program.sessions.len());
    for (session, group_lists) in program.sessions.iter().zip(individual.iter()) {
        let roster = program.session_roster(session);
        let mut groups = Vec::with_capacity(group_lists.len());
        for (g_idx, members) in group_lists.iter().enumerate() {
            let participants = members
                .iter()
                .map(|&idx| roster[idx].clone())
                .collect::<Vec<_>>();
            groups.push(Group::new(format!("{}-g{}", session.id, g_idx), participants)?);
        }
        by_session.push(Groups::new(groups)?);
    }
    Solution::new(program, by_session)
}

/// Inverse of `individual_to_solution`: projects a `Solution` back onto
/// roster-relative indices for the optimizer to resume work on (e.g. when
/// seeding the population from an externally supplied schedule).
pub fn solution_to_individual(program: &Program, solution: &Solution) -> Individual {
    program
        .sessions
        .iter()
        .enumerate()
        .map(|(s_idx, session)| {
            let roster = program.session_roster(session);
            solution
                .session(s_idx)
                .iter()
                .map(|group| {
                    group
                        .participants()
                        .iter()
                        .map(|p| roster.iter().position(|r| r.id == p.id).expect("roster subset"))
                        .collect()
                })
                .collect()
        })
        .collect()
}
