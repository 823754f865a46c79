//! Swap mutation. The hybrid variant swaps one member between two randomly
//! chosen groups without regard to position — repair restores feasibility
//! afterward. `force` bypasses the per-session coin flip, used when padding
//! the initial population past the number of heuristic seeds available.

use crate::domain::Individual;
use rand::Rng;

pub fn mutate(individual: &mut Individual, rng: &mut impl Rng, mutation_rate: f64, force: bool) {
    for session_groups in individual.iter_mut() {
        if session_groups.len() < 2 {
            continue;
        }
        if !force && !rng.random_bool(mutation_rate) {
            continue;
        }

        let g1 = rng.random_range(0..session_groups.len());
        let mut g2 = rng.random_range(0..session_groups.len());
        while g2 == g1 {
            g2 = rng.random_range(0..session_groups.len());
        }
        if session_groups[g1].is_empty() || session_groups[g2].is_empty() {
            continue;
        }

        let i1 = rng.random_range(0..session_groups[g1].len());
        let i2 = rng.random_range(0..session_groups[g2].len());
        let tmp = session_groups[g1][i1];
        session_groups[g1][i1] = session_groups[g2][i2];
        session_groups[g2][i2] = tmp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn forced_mutation_preserves_total_membership() {
        let mut individual: Individual = vec![vec![vec![0, 1], vec![2, 3]]];
        let before: usize = individual[0].iter().map(|g| g.len()).sum();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        mutate(&mut individual, &mut rng, 1.0, true);
        let after: usize = individual[0].iter().map(|g| g.len()).sum();
        assert_eq!(before, after);
    }
}
