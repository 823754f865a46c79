//! Hamilton largest-remainder apportionment of position quotas across groups.
//!
//! Given total counts by position and a set of group sizes, this produces a
//! matrix whose row sums equal the group sizes and whose column sums equal
//! the position totals — the per-group position-target matrix the seeder
//! fills against.

use crate::domain::Position;
use std::collections::HashMap;

const NUM_POSITIONS: usize = 4;

/// Row-major target matrix: `matrix[group][position_order_index]`.
pub type TargetMatrix = Vec<[u32; NUM_POSITIONS]>;

fn pos_index(p: Position) -> usize {
    Position::ORDER.iter().position(|&o| o == p).unwrap()
}

/// Computes the per-group position-target matrix.
///
/// Requires `totals.values().sum() == sizes.iter().sum()`; this is a
/// precondition enforced by callers (typically already guaranteed by
/// `Program::new`'s roster/session validation), not re-validated here.
pub fn apportion(totals: &HashMap<Position, u32>, sizes: &[u32]) -> TargetMatrix {
    let n: u32 = sizes.iter().sum();
    let g = sizes.len();
    let mut totals_arr = [0u32; NUM_POSITIONS];
    for (&pos, &count) in totals {
        totals_arr[pos_index(pos)] = count;
    }

    let mut matrix: TargetMatrix = vec![[0u32; NUM_POSITIONS]; g];
    if n == 0 {
        return matrix;
    }

    // Pass 1: floor shares, recording fractional remainders.
    let mut frac = vec![[0f64; NUM_POSITIONS]; g];
    for gi in 0..g {
        for pi in 0..NUM_POSITIONS {
            let share = totals_arr[pi] as f64 * sizes[gi] as f64 / n as f64;
            let floor = share.floor();
            matrix[gi][pi] = floor as u32;
            frac[gi][pi] = share - floor;
        }
    }

    // Remaining per-row capacity after the floor pass (conserved quantity:
    // sums to the total remainder across all positions, so distributing
    // positions one at a time never starves a later position of capacity).
    let mut cap: Vec<u32> = (0..g)
        .map(|gi| sizes[gi] - matrix[gi].iter().sum::<u32>())
        .collect();

    // Pass 2: distribute each position's remainder by descending fraction,
    // ties broken by ascending group index, skipping groups at capacity.
    for pi in 0..NUM_POSITIONS {
        let assigned: u32 = matrix.iter().map(|row| row[pi]).sum();
        let mut rem = totals_arr[pi].saturating_sub(assigned);
        if rem == 0 {
            continue;
        }
        let mut order: Vec<usize> = (0..g).collect();
        order.sort_by(|&a, &b| {
            frac[b][pi]
                .partial_cmp(&frac[a][pi])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        while rem > 0 {
            let mut placed = false;
            for &gi in &order {
                if cap[gi] > 0 {
                    matrix[gi][pi] += 1;
                    cap[gi] -= 1;
                    rem -= 1;
                    placed = true;
                    if rem == 0 {
                        break;
                    }
                }
            }
            debug_assert!(
                placed,
                "apportionment remainder could not be placed: totals/sizes sums must match"
            );
            if !placed {
                break;
            }
        }
    }

    matrix
}

/// Converts a `TargetMatrix` row into the public `HashMap<Position, u32>`
/// form used by `Session::position_targets`.
pub fn row_as_map(row: &[u32; NUM_POSITIONS]) -> HashMap<Position, u32> {
    Position::ORDER
        .iter()
        .enumerate()
        .map(|(i, &p)| (p, row[i]))
        .collect()
}

/// `q+1` for the first `r` groups and `q` for the rest, where `(q, r) =
/// divmod(n, group_num)` — the default group-size split.
pub fn default_group_sizes(n: usize, group_num: usize) -> Vec<u32> {
    if group_num == 0 {
        return Vec::new();
    }
    let q = (n / group_num) as u32;
    let r = n % group_num;
    (0..group_num)
        .map(|i| if i < r { q + 1 } else { q })
        .collect()
}
