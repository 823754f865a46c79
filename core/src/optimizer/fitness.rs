//! Composite fitness: a weighted penalty over feasibility, repeat pairing,
//! partner-count spread, and lab collisions, negated so that evolution
//! maximizes.

use super::context::SessionContext;
use crate::domain::{Individual, Position};
use std::collections::HashMap;

const W_SIZE: f64 = 1_000_000.0;
const W_PAIR: f64 = 100.0;
const W_SPREAD: f64 = 500.0;
const W_RANGE: f64 = 100.0;
const W_LAB: f64 = 50.0;

fn comb2(k: u32) -> f64 {
    if k < 2 {
        0.0
    } else {
        (k as f64) * (k as f64 - 1.0) / 2.0
    }
}

/// Lower is worse; callers maximize `-penalty(..)`.
pub fn penalty(contexts: &[SessionContext], individual: &Individual, num_participants: usize) -> f64 {
    let mut size_pen = 0.0;
    let mut pair_counts: HashMap<(usize, usize), u32> = HashMap::new();
    let mut lab_pen = 0.0;

    for (ctx, groups) in contexts.iter().zip(individual.iter()) {
        for group in groups {
            let size = group.len();
            if size < ctx.min || size > ctx.max {
                size_pen += 1.0;
            }

            for (i, &li) in group.iter().enumerate() {
                let gi = ctx.global_idx[li];
                for &lj in group.iter().skip(i + 1) {
                    let gj = ctx.global_idx[lj];
                    let key = if gi < gj { (gi, gj) } else { (gj, gi) };
                    *pair_counts.entry(key).or_insert(0) += 1;
                }
            }

            let mut lab_members: HashMap<&str, u32> = HashMap::new();
            for &li in group {
                for lab in &ctx.roster[li].labs {
                    *lab_members.entry(lab.as_str()).or_insert(0) += 1;
                }
            }
            for &count in lab_members.values() {
                lab_pen += comb2(count);
            }
        }
    }

    let pair_pen: f64 = pair_counts.values().filter(|&&k| k > 1).map(|&k| comb2(k)).sum();

    let mut distinct_partners = vec![0u32; num_participants];
    for &(a, b) in pair_counts.keys() {
        distinct_partners[a] += 1;
        distinct_partners[b] += 1;
    }
    let (spread_pen, range_pen) = if distinct_partners.is_empty() {
        (0.0, 0.0)
    } else {
        let n = distinct_partners.len() as f64;
        let mean = distinct_partners.iter().sum::<u32>() as f64 / n;
        let variance = distinct_partners
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        let max = *distinct_partners.iter().max().unwrap_or(&0) as f64;
        let min = *distinct_partners.iter().min().unwrap_or(&0) as f64;
        (variance, max - min)
    };

    W_SIZE * size_pen + W_PAIR * pair_pen + W_SPREAD * spread_pen + W_RANGE * range_pen + W_LAB * lab_pen
}

pub fn fitness(contexts: &[SessionContext], individual: &Individual, num_participants: usize) -> f64 {
    -penalty(contexts, individual, num_participants)
}

/// Hard cap of one Faculty per group; informational helper used by repair
/// and crossover, kept here alongside the penalty it mirrors.
pub fn is_faculty(position: Position) -> bool {
    position == Position::Faculty
}
