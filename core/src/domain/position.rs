//! Academic position enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Academic rank, drawn from a closed set.
///
/// Order matters: the heuristic seeder fills groups in this declaration
/// order (Faculty first, Bachelor last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Faculty,
    Doctoral,
    Master,
    Bachelor,
}

impl Position {
    /// The fixed fill order used by the seeder and the apportionment pass.
    pub const ORDER: [Position; 4] = [
        Position::Faculty,
        Position::Doctoral,
        Position::Master,
        Position::Bachelor,
    ];

    /// Case-insensitive parse, used for `position_targets` keys and for the
    /// canonical `position` field on a participant.
    pub fn parse(s: &str) -> Option<Position> {
        match s.to_ascii_lowercase().as_str() {
            "faculty" => Some(Position::Faculty),
            "doctoral" => Some(Position::Doctoral),
            "master" => Some(Position::Master),
            "bachelor" => Some(Position::Bachelor),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Faculty => "Faculty",
            Position::Doctoral => "Doctoral",
            Position::Master => "Master",
            Position::Bachelor => "Bachelor",
        };
        f.write_str(s)
    }
}
