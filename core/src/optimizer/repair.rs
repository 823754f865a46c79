//! Feasibility repair applied after crossover and after mutation: dedup,
//! fill missing participants, rebalance sizes, then rebalance Faculty
//! coverage.

use super::context::SessionContext;
use super::fitness::is_faculty;
use crate::domain::Individual;
use std::collections::HashSet;

pub fn repair(individual: &mut Individual, contexts: &[SessionContext]) {
    for (ctx, groups) in contexts.iter().zip(individual.iter_mut()) {
        dedup(groups);
        fill_missing(groups, ctx);
        balance_sizes(groups, ctx);
        rebalance_faculty(groups, ctx);
    }
}

fn dedup(groups: &mut [Vec<usize>]) {
    let mut seen: HashSet<usize> = HashSet::new();
    for group in groups.iter_mut() {
        group.retain(|li| seen.insert(*li));
    }
}

fn fill_missing(groups: &mut [Vec<usize>], ctx: &SessionContext) {
    let present: HashSet<usize> = groups.iter().flatten().copied().collect();
    let missing: Vec<usize> = (0..ctx.roster.len()).filter(|li| !present.contains(li)).collect();

    for li in missing {
        let target = (0..groups.len())
            .filter(|&g| groups[g].len() < ctx.max)
            .min_by_key(|&g| groups[g].len())
            .unwrap_or_else(|| (0..groups.len()).min_by_key(|&g| groups[g].len()).unwrap());
        groups[target].push(li);
    }
}

fn balance_sizes(groups: &mut [Vec<usize>], ctx: &SessionContext) {
    let guard = groups.len() * groups.len() + ctx.roster.len();
    for _ in 0..guard {
        let over = groups.iter().position(|g| g.len() > ctx.max);
        let under = groups.iter().position(|g| g.len() < ctx.min);
        match (over, under) {
            (Some(o), Some(u)) if o != u => {
                let member = groups[o].pop().expect("over-sized group is non-empty");
                groups[u].push(member);
            }
            _ => break,
        }
    }
}

/// If the session holds at least one Faculty per group worth of Faculty
/// members, redistributes them so every group gets at least one, extras
/// going round-robin; otherwise leaves Faculty placement as-is (no amount of
/// shuffling can give every group one when there aren't enough to go
/// around).
fn rebalance_faculty(groups: &mut [Vec<usize>], ctx: &SessionContext) {
    let total_faculty = ctx.roster.iter().filter(|p| is_faculty(p.position)).count();
    if total_faculty < groups.len() {
        return;
    }

    let mut pool: Vec<usize> = Vec::new();
    for group in groups.iter_mut() {
        let mut i = 0;
        while i < group.len() {
            if is_faculty(ctx.roster[group[i]].position) {
                pool.push(group.remove(i));
            } else {
                i += 1;
            }
        }
    }

    let mut g = 0;
    while let Some(li) = pool.pop() {
        groups[g % groups.len()].push(li);
        g += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Participant, Position, Program, Session};

    fn participant(id: &str, pos: Position) -> Participant {
        Participant::new(id, id, pos, vec!["Lab".to_string()]).unwrap()
    }

    #[test]
    fn dedup_and_fill_restores_a_partition() {
        let participants = vec![
            participant("a", Position::Faculty),
            participant("b", Position::Doctoral),
            participant("c", Position::Master),
            participant("d", Position::Bachelor),
        ];
        let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
        let session = Session::new("s0", 2, 2, 2, ids, None).unwrap();
        let program = Program::new("p", participants, vec![session]).unwrap();
        let contexts = super::super::context::build_contexts(&program);

        // 0 duplicated into both groups, 3 missing entirely.
        let mut individual: Individual = vec![vec![vec![0, 1], vec![0, 2]]];
        repair(&mut individual, &contexts);

        let mut all: Vec<usize> = individual[0].iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3]);
        for group in &individual[0] {
            assert_eq!(group.len(), 2);
        }
    }

    #[test]
    fn faculty_rebalance_gives_every_group_one() {
        let participants = vec![
            participant("f1", Position::Faculty),
            participant("f2", Position::Faculty),
            participant("d1", Position::Doctoral),
            participant("m1", Position::Master),
        ];
        let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
        let session = Session::new("s0", 2, 2, 2, ids, None).unwrap();
        let program = Program::new("p", participants, vec![session]).unwrap();
        let contexts = super::super::context::build_contexts(&program);

        let mut individual: Individual = vec![vec![vec![0, 1], vec![2, 3]]];
        repair(&mut individual, &contexts);

        for group in &individual[0] {
            let has_faculty = group.iter().any(|&li| contexts[0].roster[li].position == Position::Faculty);
            assert!(has_faculty, "every group should have at least one Faculty member");
        }
    }
}
