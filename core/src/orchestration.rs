//! Use-case orchestration: wires a chosen assigner to the evaluator and
//! returns both the resulting groups and their score. Mirrors a
//! dependency-injected assigner abstraction translated to a closed enum, the
//! idiom this codebase favors over trait objects for a small, fixed set of
//! strategies.

use crate::config::HybridConfig;
use crate::domain::{individual_to_solution, Program, Solution};
use crate::error::EngineError;
use crate::evaluation::{average_repeat_per_person, partner_statistics, theoretical_min_avg_repeat, PartnerStats};
use crate::optimizer::HybridOptimizer;
use crate::rng;
use crate::seeder::HeuristicSeeder;
use std::collections::HashMap;

/// Which assignment strategy `execute` should run.
#[derive(Debug, Clone, Copy)]
pub enum Assigner {
    /// A single heuristic seed, no genetic refinement.
    Heuristic,
    /// The full hybrid genetic optimizer, seeded from heuristic individuals.
    Hybrid(HybridConfig),
}

/// The score attached to a completed assignment: the required average, the
/// lower bound it is measured against, and the supplemented per-participant
/// breakdown.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub average_repeat_per_person: f64,
    pub theoretical_min_avg_repeat: f64,
    pub partner_statistics: HashMap<String, PartnerStats>,
}

#[derive(Debug, Clone)]
pub struct AssignmentResult {
    pub solution: Solution,
    pub evaluation: Evaluation,
}

/// Runs `assigner` against `program` with a given base seed, then scores the
/// resulting solution. No side effects on `program`.
pub fn execute(program: &Program, assigner: Assigner, base_seed: u64) -> Result<AssignmentResult, EngineError> {
    log::info!(
        "assigning program {} ({} participants, {} sessions) via {assigner:?}",
        program.id,
        program.participants.len(),
        program.sessions.len(),
    );

    let individual = match assigner {
        Assigner::Heuristic => {
            let seeder = HeuristicSeeder::default();
            let mut rng = rng::stream(base_seed, 0);
            seeder.seed_one(program, &mut rng)?
        }
        Assigner::Hybrid(config) => HybridOptimizer::new(program, config).run(base_seed)?,
    };

    let solution = individual_to_solution(program, &individual)?;
    let evaluation = evaluate(program, &solution);

    Ok(AssignmentResult { solution, evaluation })
}

/// Scores an already-produced solution, independent of how it was built.
pub fn evaluate(program: &Program, solution: &Solution) -> Evaluation {
    let ids: Vec<String> = program.participants.iter().map(|p| p.id.clone()).collect();
    let group_nums: Vec<u32> = program.sessions.iter().map(|s| s.group_num).collect();

    Evaluation {
        average_repeat_per_person: average_repeat_per_person(solution, ids.len()),
        theoretical_min_avg_repeat: theoretical_min_avg_repeat(ids.len(), &group_nums),
        partner_statistics: partner_statistics(solution, &ids),
    }
}

impl std::fmt::Display for Assigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assigner::Heuristic => write!(f, "Heuristic"),
            Assigner::Hybrid(_) => write!(f, "Hybrid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Participant, Position, Session};

    fn participant(id: &str, pos: Position, lab: &str) -> Participant {
        Participant::new(id, id, pos, vec![lab.to_string()]).unwrap()
    }

    fn program() -> Program {
        let participants = vec![
            participant("f1", Position::Faculty, "LabA"),
            participant("d1", Position::Doctoral, "LabB"),
            participant("m1", Position::Master, "LabC"),
            participant("b1", Position::Bachelor, "LabD"),
        ];
        let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
        let session = Session::new("s0", 1, 4, 4, ids, None).unwrap();
        Program::new("p", participants, vec![session]).unwrap()
    }

    #[test]
    fn heuristic_execute_returns_a_scored_partition() {
        let program = program();
        let result = execute(&program, Assigner::Heuristic, 5).unwrap();
        assert_eq!(result.solution.num_sessions(), 1);
        assert!(result.evaluation.average_repeat_per_person >= 0.0);
    }

    #[test]
    fn hybrid_execute_returns_a_scored_partition() {
        let program = program();
        let config = HybridConfig {
            num_heuristic_seeds: 2,
            generations: 3,
            population_size: 4,
            mutation_rate: 0.1,
            time_budget_seconds: 2.0,
            heuristic_iterations: 10,
        };
        let result = execute(&program, Assigner::Hybrid(config), 5).unwrap();
        assert_eq!(result.solution.num_sessions(), 1);
    }
}
