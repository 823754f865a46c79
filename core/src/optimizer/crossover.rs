//! Position-safe crossover: each child group mixes the corresponding pair of
//! parent groups rather than cutting across arbitrary boundaries, so the
//! Faculty/lab constraints stay close to satisfied before repair runs.

use super::context::SessionContext;
use super::fitness::is_faculty;
use crate::domain::Individual;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

pub fn crossover(
    parent_a: &Individual,
    parent_b: &Individual,
    contexts: &[SessionContext],
    rng: &mut impl Rng,
) -> Individual {
    let mut child = Vec::with_capacity(contexts.len());

    for (s, ctx) in contexts.iter().enumerate() {
        let groups_a = &parent_a[s];
        let groups_b = &parent_b[s];
        let mut child_session: Vec<Vec<usize>> = Vec::with_capacity(ctx.group_num);
        let mut used_this_session: HashSet<usize> = HashSet::new();

        for g in 0..ctx.group_num {
            let a = groups_a.get(g).cloned().unwrap_or_default();
            let b = groups_b.get(g).cloned().unwrap_or_default();
            let target = ((a.len() + b.len()) as f64 / 2.0).round() as usize;
            let target = target.clamp(ctx.min, ctx.max);

            let mut union: Vec<usize> = a.iter().chain(b.iter()).copied().collect();
            union.retain(|li| !used_this_session.contains(li));
            union.sort_unstable();
            union.dedup();
            union.shuffle(rng);

            let mut group: Vec<usize> = Vec::with_capacity(target);

            if let Some(pos) = union.iter().position(|&li| is_faculty(ctx.roster[li].position)) {
                let faculty_idx = union.remove(pos);
                group.push(faculty_idx);
                used_this_session.insert(faculty_idx);
            }

            for &li in &union {
                if group.len() >= target {
                    break;
                }
                if used_this_session.contains(&li) {
                    continue;
                }
                group.push(li);
                used_this_session.insert(li);
            }

            if group.len() < target {
                let mut remaining: Vec<usize> = (0..ctx.roster.len())
                    .filter(|li| !used_this_session.contains(li))
                    .collect();
                remaining.shuffle(rng);
                for li in remaining {
                    if group.len() >= target {
                        break;
                    }
                    group.push(li);
                    used_this_session.insert(li);
                }
            }

            child_session.push(group);
        }

        child.push(child_session);
    }

    child
}
