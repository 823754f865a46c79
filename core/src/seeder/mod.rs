//! The constructive heuristic seeder: for each session independently, fill
//! groups position-by-position against a target matrix, then run a
//! same-position swap local search, all while tracking a program-long memo
//! of already-formed pairs and lab collisions so later sessions steer away
//! from repeating them.

mod local_search;
mod placement;
mod score;

use crate::apportionment::{apportion, default_group_sizes};
use crate::domain::{Individual, Participant, Position, Program};
use crate::error::EngineError;
use rand::Rng;
use score::PairKey;
use std::collections::{HashMap, HashSet};

/// Builds complete, feasible per-session partitions via constructive fill
/// plus local search. Stateless: every call starts a fresh `used_pairs`/
/// `lab_conflicts` memo, so seeds drawn from independent RNG streams are
/// themselves independent.
#[derive(Debug, Clone)]
pub struct HeuristicSeeder {
    /// Cap on accepted swaps in the per-session local-search pass.
    pub local_search_iterations: usize,
}

impl Default for HeuristicSeeder {
    fn default() -> Self {
        HeuristicSeeder {
            local_search_iterations: 200,
        }
    }
}

impl HeuristicSeeder {
    pub fn new(local_search_iterations: usize) -> Self {
        HeuristicSeeder {
            local_search_iterations,
        }
    }

    /// Produces one full seeded individual for `program`, consuming `rng`
    /// for pool shuffling only (all other steps are deterministic given the
    /// shuffle order).
    pub fn seed_one(&self, program: &Program, rng: &mut impl Rng) -> Result<Individual, EngineError> {
        let global_idx_of: HashMap<&str, usize> = program
            .participants
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.as_str(), i))
            .collect();

        let mut used_pairs: HashSet<PairKey> = HashSet::new();
        let mut lab_conflicts: HashMap<String, u32> = HashMap::new();
        let mut individual: Individual = Vec::with_capacity(program.sessions.len());

        for session in &program.sessions {
            let roster: Vec<&Participant> = program.session_roster(session);
            let global_idx: Vec<usize> = roster.iter().map(|p| global_idx_of[p.id.as_str()]).collect();

            let target_matrix: Vec<[u32; 4]> = match &session.position_targets {
                Some(targets) => targets
                    .iter()
                    .map(|row| {
                        let mut arr = [0u32; 4];
                        for (i, &pos) in Position::ORDER.iter().enumerate() {
                            arr[i] = *row.get(&pos).unwrap_or(&0);
                        }
                        arr
                    })
                    .collect(),
                None => {
                    let mut totals: HashMap<Position, u32> = HashMap::new();
                    for p in &roster {
                        *totals.entry(p.position).or_insert(0) += 1;
                    }
                    let sizes = default_group_sizes(roster.len(), session.group_num as usize);
                    apportion(&totals, &sizes)
                }
            };

            let used_pairs_before_session = used_pairs.clone();
            let mut groups = placement::fill_session(
                &roster,
                &global_idx,
                session.group_num as usize,
                session.min as usize,
                session.max as usize,
                &target_matrix,
                &mut used_pairs,
                &mut lab_conflicts,
                rng,
            );
            local_search::local_search(
                &mut groups,
                &roster,
                &global_idx,
                &used_pairs_before_session,
                self.local_search_iterations,
            );

            individual.push(groups);
        }

        Ok(individual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{individual_to_solution, Session};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn participant(id: &str, pos: Position, labs: &[&str]) -> Participant {
        Participant::new(
            id,
            id,
            pos,
            labs.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    // S1: 4 participants, one of each position, distinct labs, 1 session of
    // group_num=1 min=max=4.
    #[test]
    fn s1_single_group_of_four() {
        let participants = vec![
            participant("f1", Position::Faculty, &["LabA"]),
            participant("d1", Position::Doctoral, &["LabB"]),
            participant("m1", Position::Master, &["LabC"]),
            participant("b1", Position::Bachelor, &["LabD"]),
        ];
        let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
        let session = Session::new("s0", 1, 4, 4, ids, None).unwrap();
        let program = Program::new("p", participants, vec![session]).unwrap();

        let seeder = HeuristicSeeder::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let individual = seeder.seed_one(&program, &mut rng).unwrap();
        let solution = individual_to_solution(&program, &individual).unwrap();
        assert_eq!(solution.session(0).len(), 1);
        assert_eq!(solution.session(0).get(0).unwrap().len(), 4);
    }

    // S2: 8 participants, 2 of each position, distinct labs, 2 sessions of
    // group_num=2 min=max=4 -> every group should end up with one of each
    // position and no lab collisions.
    #[test]
    fn s2_balanced_groups_no_lab_collisions() {
        let mut participants = Vec::new();
        for (i, pos) in [
            Position::Faculty,
            Position::Doctoral,
            Position::Master,
            Position::Bachelor,
        ]
        .iter()
        .enumerate()
        {
            for j in 0..2 {
                participants.push(participant(
                    &format!("p{i}{j}"),
                    *pos,
                    &[Box::leak(format!("Lab{i}{j}").into_boxed_str())],
                ));
            }
        }
        let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
        let sessions = vec![
            Session::new("s0", 2, 4, 4, ids.clone(), None).unwrap(),
            Session::new("s1", 2, 4, 4, ids, None).unwrap(),
        ];
        let program = Program::new("p", participants, sessions).unwrap();

        let seeder = HeuristicSeeder::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let individual = seeder.seed_one(&program, &mut rng).unwrap();
        let solution = individual_to_solution(&program, &individual).unwrap();

        for session_groups in solution.sessions() {
            for group in session_groups {
                assert_eq!(group.len(), 4);
                let mut seen_positions = HashSet::new();
                for p in group.participants() {
                    assert!(seen_positions.insert(p.position), "duplicate position in group");
                }
                for (i, a) in group.participants().iter().enumerate() {
                    for b in group.participants().iter().skip(i + 1) {
                        assert!(!a.shares_lab_with(b), "lab collision within a group");
                    }
                }
            }
        }
    }
}
