//! Serde-deserializable input envelope: the JSON/YAML shape a caller submits,
//! plus its conversion into `cohort_core`'s validated domain types. Mirrors
//! `solver-core::models`'s `ApiInput`/`ProblemDefinition` split: a thin,
//! permissive wire format up top, validated on the way into the core.

use cohort_core::domain::{Participant, Position, Program, Session};
use cohort_core::{EngineError, HybridConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::id::{ParticipantId, ProgramId, SessionId};

/// Root input envelope: the problem definition plus the optimizer's tuning
/// surface. `#[serde(default)]` on `config` matches `HybridConfig`'s own
/// field-level defaulting, so a caller may omit the whole block.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssignmentInput {
    #[serde(default)]
    pub program_id: Option<ProgramId>,
    pub participants: Vec<ParticipantInput>,
    pub sessions: Vec<SessionInput>,
    #[serde(default)]
    pub config: ConfigInput,
}

/// Schema-bearing mirror of `cohort_core::HybridConfig`. `core` has no
/// `schemars` dependency -- domain/optimizer types stay free of the contracts
/// layer's concerns, the way `solver-core` never depends on `gm-contracts`'s
/// `schemars` -- so the wire-facing copy lives here and round-trips via
/// `From`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConfigInput {
    pub num_heuristic_seeds: usize,
    pub generations: usize,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub time_budget_seconds: f64,
    pub heuristic_iterations: usize,
}

impl Default for ConfigInput {
    fn default() -> Self {
        HybridConfig::default().into()
    }
}

impl From<HybridConfig> for ConfigInput {
    fn from(c: HybridConfig) -> Self {
        ConfigInput {
            num_heuristic_seeds: c.num_heuristic_seeds,
            generations: c.generations,
            population_size: c.population_size,
            mutation_rate: c.mutation_rate,
            time_budget_seconds: c.time_budget_seconds,
            heuristic_iterations: c.heuristic_iterations,
        }
    }
}

impl From<ConfigInput> for HybridConfig {
    fn from(c: ConfigInput) -> Self {
        HybridConfig {
            num_heuristic_seeds: c.num_heuristic_seeds,
            generations: c.generations,
            population_size: c.population_size,
            mutation_rate: c.mutation_rate,
            time_budget_seconds: c.time_budget_seconds,
            heuristic_iterations: c.heuristic_iterations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParticipantInput {
    #[serde(default)]
    pub id: Option<ParticipantId>,
    pub name: String,
    pub position: String,
    pub lab: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionInput {
    #[serde(default)]
    pub id: Option<SessionId>,
    pub group_num: u32,
    pub min: u32,
    pub max: u32,
    /// When omitted, the session's roster is every input participant.
    #[serde(default)]
    pub participants: Option<Vec<ParticipantId>>,
    #[serde(default)]
    pub position_targets: Option<Vec<HashMap<String, u32>>>,
}

/// Converts the wire envelope into a validated `cohort_core::Program`,
/// resolving participant references by id and parsing position strings
/// case-insensitively (`position_targets` keys) or exactly against the
/// canonical four tokens (`ParticipantInput::position`).
pub fn to_program(input: &AssignmentInput) -> Result<Program, EngineError> {
    let mut participants = Vec::with_capacity(input.participants.len());
    let mut ids_in_order = Vec::with_capacity(input.participants.len());
    for p in &input.participants {
        let position = Position::parse(&p.position).ok_or_else(|| {
            EngineError::InvalidInput(format!("unknown position string {:?}", p.position))
        })?;
        let id = match &p.id {
            Some(id) => id.as_prefixed(),
            None => ParticipantId::generate().as_prefixed(),
        };
        ids_in_order.push(id.clone());
        participants.push(Participant::new(id, p.name.clone(), position, p.lab.clone()).map_err(EngineError::InvalidInput)?);
    }

    let mut sessions = Vec::with_capacity(input.sessions.len());
    for (idx, s) in input.sessions.iter().enumerate() {
        let roster = match &s.participants {
            Some(ids) => ids.iter().map(|id| id.as_prefixed()).collect(),
            None => ids_in_order.clone(),
        };
        let position_targets = match &s.position_targets {
            None => None,
            Some(rows) => {
                let mut converted = Vec::with_capacity(rows.len());
                for row in rows {
                    let mut map = HashMap::new();
                    for (key, &count) in row {
                        let pos = Position::parse(key).ok_or_else(|| {
                            EngineError::InvalidInput(format!(
                                "unknown position key {key:?} in position_targets"
                            ))
                        })?;
                        map.insert(pos, count);
                    }
                    converted.push(map);
                }
                Some(converted)
            }
        };
        let id = match &s.id {
            Some(id) => id.as_prefixed(),
            None => format!("session-auto-{idx}"),
        };
        sessions.push(Session::new(id, s.group_num, s.min, s.max, roster, position_targets)?);
    }

    let program_id = input
        .program_id
        .as_ref()
        .map(|id| id.as_prefixed())
        .unwrap_or_else(|| ProgramId::generate().as_prefixed());
    Program::new(program_id, participants, sessions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_position_string() {
        let input = AssignmentInput {
            program_id: None,
            participants: vec![ParticipantInput {
                id: None,
                name: "Alice".to_string(),
                position: "Postdoc".to_string(),
                lab: vec!["LabA".to_string()],
            }],
            sessions: vec![],
            config: ConfigInput::default(),
        };
        assert!(to_program(&input).is_err());
    }

    #[test]
    fn defaults_session_roster_to_every_participant() {
        let input = AssignmentInput {
            program_id: None,
            participants: vec![
                ParticipantInput {
                    id: None,
                    name: "Alice".to_string(),
                    position: "faculty".to_string(),
                    lab: vec!["LabA".to_string()],
                },
                ParticipantInput {
                    id: None,
                    name: "Bob".to_string(),
                    position: "DOCTORAL".to_string(),
                    lab: vec!["LabB".to_string()],
                },
            ],
            sessions: vec![SessionInput {
                id: None,
                group_num: 1,
                min: 2,
                max: 2,
                participants: None,
                position_targets: None,
            }],
            config: ConfigInput::default(),
        };
        let program = to_program(&input).unwrap();
        assert_eq!(program.sessions[0].participants.len(), 2);
    }

    #[test]
    fn position_targets_parse_case_insensitively() {
        let input = AssignmentInput {
            program_id: None,
            participants: vec![
                ParticipantInput {
                    id: None,
                    name: "Alice".to_string(),
                    position: "Faculty".to_string(),
                    lab: vec!["LabA".to_string()],
                },
                ParticipantInput {
                    id: None,
                    name: "Bob".to_string(),
                    position: "Doctoral".to_string(),
                    lab: vec!["LabB".to_string()],
                },
            ],
            sessions: vec![SessionInput {
                id: None,
                group_num: 1,
                min: 2,
                max: 2,
                participants: None,
                position_targets: Some(vec![HashMap::from([
                    ("faculty".to_string(), 1),
                    ("doctoral".to_string(), 1),
                    ("MASTER".to_string(), 0),
                    ("Bachelor".to_string(), 0),
                ])]),
            }],
            config: ConfigInput::default(),
        };
        assert!(to_program(&input).is_ok());
    }
}
