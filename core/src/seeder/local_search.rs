//! Post-fill local search: same-position cross-group swaps accepted only on
//! strict improvement of a session-level repeat-partner objective.

use super::score::{pair_key, PairKey};
use crate::domain::Participant;
use std::collections::HashSet;

/// mean − variance·0.1 of, per session participant, the number of current
/// groupmates they were already paired with in an earlier session (per
/// `used_pairs_before_session`, a snapshot taken before this session's fill
/// pass — pairs formed *during* this session's own fill don't count as
/// repeats of themselves).
fn session_objective(
    groups: &[Vec<usize>],
    roster: &[&Participant],
    global_idx: &[usize],
    used_pairs_before_session: &HashSet<PairKey>,
) -> f64 {
    let mut repeat_counts: Vec<f64> = Vec::with_capacity(roster.len());
    for group in groups {
        for (pos, &local) in group.iter().enumerate() {
            let mut count = 0.0;
            for (other_pos, &other_local) in group.iter().enumerate() {
                if pos == other_pos {
                    continue;
                }
                let key = pair_key(global_idx[local], global_idx[other_local]);
                if used_pairs_before_session.contains(&key) {
                    count += 1.0;
                }
            }
            repeat_counts.push(count);
        }
    }
    if repeat_counts.is_empty() {
        return 0.0;
    }
    let n = repeat_counts.len() as f64;
    let mean = repeat_counts.iter().sum::<f64>() / n;
    let variance = repeat_counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
    mean - 0.1 * variance
}

/// Runs the swap pass until no same-position cross-group swap improves the
/// session objective, or `max_iterations` accepted swaps have been made.
pub fn local_search(
    groups: &mut [Vec<usize>],
    roster: &[&Participant],
    global_idx: &[usize],
    used_pairs_before_session: &HashSet<PairKey>,
    max_iterations: usize,
) {
    let mut iterations = 0usize;
    loop {
        if iterations >= max_iterations {
            break;
        }
        let current = session_objective(groups, roster, global_idx, used_pairs_before_session);
        let mut improved = false;

        'search: for g1 in 0..groups.len() {
            for i1 in 0..groups[g1].len() {
                for g2 in (g1 + 1)..groups.len() {
                    for i2 in 0..groups[g2].len() {
                        let p1 = groups[g1][i1];
                        let p2 = groups[g2][i2];
                        if roster[p1].position != roster[p2].position {
                            continue;
                        }
                        groups[g1][i1] = p2;
                        groups[g2][i2] = p1;
                        let candidate = session_objective(groups, roster, global_idx, used_pairs_before_session);
                        if candidate < current - 1e-9 {
                            improved = true;
                            iterations += 1;
                            break 'search;
                        }
                        groups[g1][i1] = p1;
                        groups[g2][i2] = p2;
                    }
                }
            }
        }

        if !improved {
            break;
        }
    }
}
