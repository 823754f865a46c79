//! The local placement score used by the constructive fill pass.

use crate::domain::{Participant, Position};
use std::collections::{HashMap, HashSet};

/// Unordered pair of global participant indices, always stored low-first.
pub type PairKey = (usize, usize);

pub fn pair_key(a: usize, b: usize) -> PairKey {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Whether `candidate` may join `group` at all, under the *strict* filters
/// that apply during the main fill pass (relaxed during overflow — see
/// `overflow_feasible`).
pub fn strict_feasible(candidate: &Participant, group: &[&Participant]) -> bool {
    if candidate.position == Position::Faculty
        && group.iter().any(|m| m.position == Position::Faculty)
    {
        return false;
    }
    if candidate.position == Position::Doctoral
        && group.iter().any(|m| m.position == Position::Doctoral)
    {
        return false;
    }
    if group.iter().any(|m| candidate.shares_lab_with(m)) {
        return false;
    }
    true
}

/// Overflow-phase feasibility: only the hard group-size cap remains.
pub fn overflow_feasible(group_len: usize, max: usize) -> bool {
    group_len < max
}

/// Placement score for `candidate` joining `group` (lower is better).
///
/// `group_global_idx` are the global participant indices of the existing
/// members, aligned with `group`, used to look up `used_pairs`.
pub fn placement_score(
    candidate_global_idx: usize,
    candidate: &Participant,
    group: &[&Participant],
    group_global_idx: &[usize],
    used_pairs: &HashSet<PairKey>,
    min: usize,
    max: usize,
) -> f64 {
    let mut score = 0.0;
    for (&member_idx, member) in group_global_idx.iter().zip(group.iter()) {
        if used_pairs.contains(&pair_key(candidate_global_idx, member_idx)) {
            score += 1000.0;
        }
        if candidate.shares_lab_with(member) {
            score += 500.0;
        }
    }
    if group.len() < min {
        score -= 100.0;
    } else if group.len() >= max {
        score += 1000.0;
    } else {
        let mid = (min + max) as f64 / 2.0;
        score += 20.0 * (group.len() as f64 - mid).abs();
    }
    score
}

/// Records a placement's contribution to the session-long memo: every new
/// pair the candidate forms with existing members, and every lab it shares
/// with them.
pub fn record_placement(
    candidate_global_idx: usize,
    candidate: &Participant,
    group: &[&Participant],
    group_global_idx: &[usize],
    used_pairs: &mut HashSet<PairKey>,
    lab_conflicts: &mut HashMap<String, u32>,
) {
    for (&member_idx, member) in group_global_idx.iter().zip(group.iter()) {
        used_pairs.insert(pair_key(candidate_global_idx, member_idx));
        for lab in candidate.shared_labs_with(member) {
            *lab_conflicts.entry(lab.to_string()).or_insert(0) += 1;
        }
    }
}
