//! Tuning surface for the hybrid genetic optimizer.

use serde::{Deserialize, Serialize};

/// Named constants governing the hybrid optimizer's population, generation
/// budget, and operator rates. Deserializes from the same JSON/YAML envelope
/// as the problem input, defaulting any field the caller omits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    pub num_heuristic_seeds: usize,
    pub generations: usize,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub time_budget_seconds: f64,
    pub heuristic_iterations: usize,
}

impl Default for HybridConfig {
    fn default() -> Self {
        HybridConfig {
            num_heuristic_seeds: 10,
            generations: 500,
            population_size: 40,
            mutation_rate: 0.08,
            time_budget_seconds: 3.0,
            heuristic_iterations: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_tuning_surface_constants() {
        let c = HybridConfig::default();
        assert_eq!(c.num_heuristic_seeds, 10);
        assert_eq!(c.generations, 500);
        assert_eq!(c.population_size, 40);
        assert!((c.mutation_rate - 0.08).abs() < 1e-12);
        assert!((c.time_budget_seconds - 3.0).abs() < 1e-12);
        assert_eq!(c.heuristic_iterations, 200);
    }

    #[test]
    fn deserializes_with_partial_overrides() {
        let json = r#"{"generations": 50}"#;
        let c: HybridConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.generations, 50);
        assert_eq!(c.population_size, 40);
    }
}
