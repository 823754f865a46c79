//! The `Session` value type and its explicit position-target matrix.

use super::position::Position;
use crate::error::EngineError;
use std::collections::HashMap;

/// Per-group position quota, row-indexed by group, column-indexed by
/// `Position`. When present on a `Session` it is used verbatim by the seeder
/// instead of the apportionment calculator.
pub type PositionTargets = Vec<HashMap<Position, u32>>;

/// One round of concurrent groupings over (a subset of) the roster.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub group_num: u32,
    pub min: u32,
    pub max: u32,
    /// Ordered, duplicate-free participant ids eligible for this session.
    pub participants: Vec<String>,
    pub position_targets: Option<PositionTargets>,
}

impl Session {
    /// Validates the structural invariants that do not require
    /// cross-referencing the roster (that cross-check happens in
    /// `Program::new`, which knows every participant's position).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        group_num: u32,
        min: u32,
        max: u32,
        participants: Vec<String>,
        position_targets: Option<PositionTargets>,
    ) -> Result<Self, EngineError> {
        if group_num == 0 {
            return Err(EngineError::InvalidInput(
                "session group_num must be positive".to_string(),
            ));
        }
        if min == 0 || min > max {
            return Err(EngineError::InvalidInput(format!(
                "session size bounds must satisfy 1 <= min <= max, got min={min} max={max}"
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for p in &participants {
            if !seen.insert(p.clone()) {
                return Err(EngineError::InvalidInput(format!(
                    "duplicate participant {p} in session {}",
                    id.into()
                )));
            }
        }
        if let Some(ref targets) = position_targets {
            if targets.len() != group_num as usize {
                return Err(EngineError::InvalidInput(format!(
                    "position_targets length {} does not match group_num {group_num}",
                    targets.len()
                )));
            }
            for (g, row) in targets.iter().enumerate() {
                let row_sum: u32 = row.values().sum();
                if row_sum < min || row_sum > max {
                    return Err(EngineError::InvalidInput(format!(
                        "position_targets row {g} sums to {row_sum}, outside [{min}, {max}]"
                    )));
                }
            }
        }

        Ok(Session {
            id: id.into(),
            group_num,
            min,
            max,
            participants,
            position_targets,
        })
    }

    pub fn roster_len(&self) -> usize {
        self.participants.len()
    }

    /// Whether `roster_len` participants can be partitioned into `group_num`
    /// non-empty groups each within `[min, max]`.
    pub fn is_feasible(&self) -> bool {
        let n = self.roster_len() as u64;
        let g = self.group_num as u64;
        n >= g * self.min as u64 && n <= g * self.max as u64
    }
}
