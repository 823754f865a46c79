//! Serde-serializable output envelope, supplemented from the original's
//! `GroupAssignmentResultFormatter.format_result` (program/evaluation split)
//! and `result_postprocessor.add_distinct_partners_stats` (the
//! distinct/total/duplicate breakdown per participant).

use cohort_core::domain::Solution;
use cohort_core::orchestration::AssignmentResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssignmentOutput {
    /// Session-index -> ordered list of groups, each an ordered list of
    /// participant names. Mirrors the original's nested `program` list.
    pub program: Vec<Vec<Vec<String>>>,
    pub evaluation: EvaluationOutput,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationOutput {
    pub avg_repeat_per_person: f64,
    pub theoretical_min_avg_repeat: f64,
    /// `distinct_partners` per participant id, keyed by the prefixed id.
    pub distinct_partners_per_person: std::collections::HashMap<String, u32>,
    /// `"distinct/total/duplicate"` per participant id, matching the
    /// original formatter's string-joined breakdown.
    pub partner_statistics: std::collections::HashMap<String, String>,
}

/// Builds the output envelope from a completed `AssignmentResult`.
pub fn to_output(result: &AssignmentResult) -> AssignmentOutput {
    let program = program_rows(&result.solution);

    let mut distinct_partners_per_person = std::collections::HashMap::new();
    let mut partner_statistics = std::collections::HashMap::new();
    for (id, stats) in &result.evaluation.partner_statistics {
        distinct_partners_per_person.insert(id.clone(), stats.distinct_partners);
        partner_statistics.insert(
            id.clone(),
            format!(
                "{}/{}/{}",
                stats.distinct_partners, stats.total_partners, stats.duplicate_partners
            ),
        );
    }

    AssignmentOutput {
        program,
        evaluation: EvaluationOutput {
            avg_repeat_per_person: result.evaluation.average_repeat_per_person,
            theoretical_min_avg_repeat: result.evaluation.theoretical_min_avg_repeat,
            distinct_partners_per_person,
            partner_statistics,
        },
    }
}

fn program_rows(solution: &Solution) -> Vec<Vec<Vec<String>>> {
    solution
        .sessions()
        .iter()
        .map(|groups| {
            groups
                .iter()
                .map(|group| group.participants().iter().map(|p| format!("{}({})", p.name, p.position)).collect())
                .collect()
        })
        .collect()
}
