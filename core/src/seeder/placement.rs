//! The constructive fill pass: position-ordered placement against a target
//! matrix, followed by an overflow pass with relaxed filters.

use super::score::{overflow_feasible, placement_score, record_placement, strict_feasible, PairKey};
use crate::domain::{Participant, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Fills one session's groups, returning roster-local participant indices
/// per group. `global_idx[local]` maps a roster-local index to the
/// program-wide participant index used to key `used_pairs`.
#[allow(clippy::too_many_arguments)]
pub fn fill_session(
    roster: &[&Participant],
    global_idx: &[usize],
    group_num: usize,
    min: usize,
    max: usize,
    position_targets: &[[u32; 4]],
    used_pairs: &mut HashSet<PairKey>,
    lab_conflicts: &mut HashMap<String, u32>,
    rng: &mut impl Rng,
) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); group_num];

    let mut pools: HashMap<Position, Vec<usize>> = HashMap::new();
    for (local_idx, p) in roster.iter().enumerate() {
        pools.entry(p.position).or_default().push(local_idx);
    }
    for pool in pools.values_mut() {
        pool.shuffle(rng);
    }

    let mut leftover: Vec<usize> = Vec::new();

    for (pos_order_idx, &pos) in Position::ORDER.iter().enumerate() {
        let mut pool = pools.remove(&pos).unwrap_or_default();

        let mut group_order: Vec<usize> = (0..group_num).collect();
        group_order.sort_by_key(|&g| groups[g].len());

        for g in group_order {
            let mut need = position_targets[g][pos_order_idx] as i64
                - groups[g].iter().filter(|&&li| roster[li].position == pos).count() as i64;
            while need > 0 && !pool.is_empty() {
                let group_members: Vec<&Participant> = groups[g].iter().map(|&li| roster[li]).collect();
                let group_global: Vec<usize> = groups[g].iter().map(|&li| global_idx[li]).collect();

                let mut best: Option<(usize, f64)> = None;
                for (pool_pos, &cand_local) in pool.iter().enumerate() {
                    let cand = roster[cand_local];
                    if !strict_feasible(cand, &group_members) {
                        continue;
                    }
                    let score = placement_score(
                        global_idx[cand_local],
                        cand,
                        &group_members,
                        &group_global,
                        used_pairs,
                        min,
                        max,
                    );
                    if best.map(|(_, s)| score < s).unwrap_or(true) {
                        best = Some((pool_pos, score));
                    }
                }

                match best {
                    Some((pool_pos, _)) => {
                        let cand_local = pool.remove(pool_pos);
                        groups[g].push(cand_local);
                        let group_members: Vec<&Participant> =
                            groups[g][..groups[g].len() - 1].iter().map(|&li| roster[li]).collect();
                        let group_global: Vec<usize> =
                            groups[g][..groups[g].len() - 1].iter().map(|&li| global_idx[li]).collect();
                        record_placement(
                            global_idx[cand_local],
                            roster[cand_local],
                            &group_members,
                            &group_global,
                            used_pairs,
                            lab_conflicts,
                        );
                        need -= 1;
                    }
                    None => break,
                }
            }
        }

        leftover.extend(pool);
    }

    overflow_assign(
        &mut groups, roster, global_idx, max, &leftover, used_pairs, lab_conflicts,
    );

    groups
}

/// Places participants that the strict fill pass could not seat: best
/// feasible group (room under `max`) minimizing the same score, ignoring the
/// faculty/doctoral/lab-collision hard filters; failing that, the smallest
/// group unconditionally so every participant ends up somewhere.
fn overflow_assign(
    groups: &mut [Vec<usize>],
    roster: &[&Participant],
    global_idx: &[usize],
    max: usize,
    leftover: &[usize],
    used_pairs: &mut HashSet<PairKey>,
    lab_conflicts: &mut HashMap<String, u32>,
) {
    for &cand_local in leftover {
        let cand = roster[cand_local];
        let mut best: Option<(usize, f64)> = None;
        for (g, members) in groups.iter().enumerate() {
            if !overflow_feasible(members.len(), max) {
                continue;
            }
            let group_members: Vec<&Participant> = members.iter().map(|&li| roster[li]).collect();
            let group_global: Vec<usize> = members.iter().map(|&li| global_idx[li]).collect();
            let score = placement_score(
                global_idx[cand_local],
                cand,
                &group_members,
                &group_global,
                used_pairs,
                0,
                max,
            );
            if best.map(|(_, s)| score < s).unwrap_or(true) {
                best = Some((g, score));
            }
        }

        let target = match best {
            Some((g, _)) => g,
            None => {
                log::warn!(
                    "seeder overflow: no group under capacity for {}, forcing into smallest group",
                    cand.id
                );
                (0..groups.len()).min_by_key(|&g| groups[g].len()).unwrap_or(0)
            }
        };

        let group_members: Vec<&Participant> = groups[target].iter().map(|&li| roster[li]).collect();
        let group_global: Vec<usize> = groups[target].iter().map(|&li| global_idx[li]).collect();
        record_placement(global_idx[cand_local], cand, &group_members, &group_global, used_pairs, lab_conflicts);
        groups[target].push(cand_local);
    }
}
