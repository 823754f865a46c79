//! Pair co-occurrence and the scoring primitives built on top of it.

use crate::domain::Solution;
use std::collections::HashMap;

/// Unordered pair of participant ids, always stored lexicographically.
type PairKey = (String, String);

fn pair_key(a: &str, b: &str) -> PairKey {
    if a < b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Number of sessions in which each unordered pair of participants shared a
/// group.
pub fn pair_counts(solution: &Solution) -> HashMap<PairKey, u32> {
    let mut counts = HashMap::new();
    for groups in solution.sessions() {
        for group in groups {
            let members = group.participants();
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    *counts.entry(pair_key(&members[i].id, &members[j].id)).or_insert(0) += 1;
                }
            }
        }
    }
    counts
}

/// Per-participant `(distinct_partners, total_partners, duplicate_partners)`.
///
/// `distinct_partners` counts partners met at least once; `total_partners`
/// sums co-occurrences including repeats; `duplicate_partners` counts
/// partners met more than once.
pub fn partner_statistics(solution: &Solution, all_ids: &[String]) -> HashMap<String, PartnerStats> {
    let counts = pair_counts(solution);
    let mut stats: HashMap<String, PartnerStats> = all_ids
        .iter()
        .map(|id| (id.clone(), PartnerStats::default()))
        .collect();

    for ((a, b), &k) in &counts {
        if let Some(s) = stats.get_mut(a) {
            s.total_partners += k;
            s.distinct_partners += 1;
            if k >= 2 {
                s.duplicate_partners += 1;
            }
        }
        if let Some(s) = stats.get_mut(b) {
            s.total_partners += k;
            s.distinct_partners += 1;
            if k >= 2 {
                s.duplicate_partners += 1;
            }
        }
    }

    stats
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartnerStats {
    pub distinct_partners: u32,
    pub total_partners: u32,
    pub duplicate_partners: u32,
}

/// Mean over participants of co-assignments with a given partner beyond the
/// first, aggregated over all pairs. Equivalently twice the sum over
/// unordered pairs of `(k - 1)` for `k >= 1`, divided by `|P|`.
pub fn average_repeat_per_person(solution: &Solution, num_participants: usize) -> f64 {
    if num_participants == 0 {
        return 0.0;
    }
    let counts = pair_counts(solution);
    let repeats: u32 = counts.values().filter(|&&k| k >= 1).map(|&k| k - 1).sum();
    2.0 * repeats as f64 / num_participants as f64
}

fn comb2(n: u64) -> u64 {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// Information-theoretic lower bound on `average_repeat_per_person` implied
/// purely by each session's group-size structure, independent of which
/// partition is chosen.
pub fn theoretical_min_avg_repeat(num_participants: usize, group_nums: &[u32]) -> f64 {
    let n = num_participants as u64;
    if n == 0 {
        return 0.0;
    }
    let mut total_q = 0u64;
    for &g in group_nums {
        let g = g as u64;
        if g == 0 {
            continue;
        }
        let q = n / g;
        let r = n % g;
        total_q += (g - r) * comb2(q) + r * comb2(q + 1);
    }
    let lb = 2.0 * total_q as f64 / n as f64 - (n as f64 - 1.0);
    lb.max(0.0)
}
