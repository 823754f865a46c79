//! The hybrid genetic optimizer: a population of heuristically seeded
//! individuals evolved under elitist selection, position-safe crossover,
//! swap mutation, and feasibility repair.

mod context;
mod crossover;
mod fitness;
mod mutation;
mod repair;

use crate::config::HybridConfig;
use crate::domain::{Individual, Program};
use crate::error::EngineError;
use crate::rng;
use crate::seeder::HeuristicSeeder;
use context::SessionContext;
use rand::Rng;
use rayon::prelude::*;
use std::time::Instant;

/// Domain-separation offsets so population-padding, breeding, and seeding
/// RNG streams never collide even though they all derive from the same
/// `base_seed`.
const PAD_STREAM_OFFSET: u64 = 1_000;
const GENERATION_STREAM_OFFSET: u64 = 1_000_000;

pub struct HybridOptimizer<'a> {
    program: &'a Program,
    config: HybridConfig,
    seeder: HeuristicSeeder,
}

impl<'a> HybridOptimizer<'a> {
    pub fn new(program: &'a Program, config: HybridConfig) -> Self {
        let seeder = HeuristicSeeder::new(config.heuristic_iterations);
        HybridOptimizer { program, config, seeder }
    }

    /// Evolves a population for up to `config.generations` generations or
    /// `config.time_budget_seconds`, whichever comes first, and returns the
    /// best individual observed.
    pub fn run(&self, base_seed: u64) -> Result<Individual, EngineError> {
        let contexts = context::build_contexts(self.program);
        let num_participants = self.program.participants.len();
        let population_size = self.config.population_size.max(1);
        let num_seeds = self.config.num_heuristic_seeds.max(1).min(population_size);

        let mut population: Vec<Individual> = Vec::with_capacity(population_size);
        for i in 0..num_seeds {
            let mut seed_rng = rng::stream(base_seed, i as u64);
            population.push(self.seeder.seed_one(self.program, &mut seed_rng)?);
        }
        let mut pad_idx = 0u64;
        while population.len() < population_size {
            let mut rng = rng::stream(base_seed, PAD_STREAM_OFFSET + pad_idx);
            let source = population[pad_idx as usize % num_seeds].clone();
            let mut padded = source;
            mutation::mutate(&mut padded, &mut rng, self.config.mutation_rate, true);
            repair::repair(&mut padded, &contexts);
            population.push(padded);
            pad_idx += 1;
        }

        let elite_count = std::cmp::max(2, population_size / 4).min(population_size);
        let mut best: Option<(Individual, f64)> = None;
        let mut gen = 0usize;
        let start = Instant::now();

        loop {
            let over_budget = start.elapsed().as_secs_f64() >= self.config.time_budget_seconds;
            if gen >= self.config.generations || over_budget {
                self.record_best(&contexts, &population, num_participants, &mut best);
                break;
            }
            self.record_best(&contexts, &population, num_participants, &mut best);

            let fitness_vec: Vec<f64> = population
                .par_iter()
                .map(|ind| fitness::fitness(&contexts, ind, num_participants))
                .collect();
            let mut order: Vec<usize> = (0..population.len()).collect();
            order.sort_by(|&a, &b| {
                fitness_vec[b]
                    .partial_cmp(&fitness_vec[a])
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.cmp(&b))
            });

            let elites: Vec<Individual> = order
                .iter()
                .take(elite_count)
                .map(|&i| population[i].clone())
                .collect();

            let mut next_gen = elites.clone();
            let mut gen_rng = rng::stream(base_seed, GENERATION_STREAM_OFFSET + gen as u64);
            while next_gen.len() < population_size {
                let a = &elites[gen_rng.random_range(0..elites.len())];
                let b = &elites[gen_rng.random_range(0..elites.len())];
                let mut child = crossover::crossover(a, b, &contexts, &mut gen_rng);
                mutation::mutate(&mut child, &mut gen_rng, self.config.mutation_rate, false);
                repair::repair(&mut child, &contexts);
                next_gen.push(child);
            }

            population = next_gen;
            gen += 1;
        }

        Ok(best.expect("population is never empty").0)
    }

    fn record_best(
        &self,
        contexts: &[SessionContext],
        population: &[Individual],
        num_participants: usize,
        best: &mut Option<(Individual, f64)>,
    ) {
        for ind in population {
            let f = fitness::fitness(contexts, ind, num_participants);
            if best.as_ref().map(|(_, bf)| f > *bf).unwrap_or(true) {
                *best = Some((ind.clone(), f));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{individual_to_solution, Participant, Position, Session};

    fn participant(id: &str, pos: Position, lab: &str) -> Participant {
        Participant::new(id, id, pos, vec![lab.to_string()]).unwrap()
    }

    fn small_program() -> Program {
        let participants = vec![
            participant("f1", Position::Faculty, "LabA"),
            participant("d1", Position::Doctoral, "LabB"),
            participant("m1", Position::Master, "LabC"),
            participant("b1", Position::Bachelor, "LabD"),
            participant("f2", Position::Faculty, "LabE"),
            participant("d2", Position::Doctoral, "LabF"),
            participant("m2", Position::Master, "LabG"),
            participant("b2", Position::Bachelor, "LabH"),
        ];
        let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();
        let sessions = vec![
            Session::new("s0", 2, 4, 4, ids.clone(), None).unwrap(),
            Session::new("s1", 2, 4, 4, ids, None).unwrap(),
        ];
        Program::new("p", participants, sessions).unwrap()
    }

    #[test]
    fn run_produces_a_valid_solution() {
        let program = small_program();
        let config = HybridConfig {
            num_heuristic_seeds: 3,
            generations: 5,
            population_size: 6,
            mutation_rate: 0.2,
            time_budget_seconds: 5.0,
            heuristic_iterations: 20,
        };
        let optimizer = HybridOptimizer::new(&program, config);
        let individual = optimizer.run(11).unwrap();
        let solution = individual_to_solution(&program, &individual).unwrap();
        assert_eq!(solution.num_sessions(), 2);
    }

    // Property 10: fixed seed and parameters yield an identical final solution.
    #[test]
    fn determinism_under_fixed_seed() {
        let program = small_program();
        let config = HybridConfig {
            num_heuristic_seeds: 3,
            generations: 4,
            population_size: 6,
            mutation_rate: 0.2,
            time_budget_seconds: 5.0,
            heuristic_iterations: 20,
        };
        let a = HybridOptimizer::new(&program, config).run(42).unwrap();
        let b = HybridOptimizer::new(&program, config).run(42).unwrap();
        assert_eq!(a, b);
    }
}
