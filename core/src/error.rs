//! Error types returned by the assignment engine.
//!
//! All error kinds are fatal for the current assignment request; the engine
//! never partially applies a request.

use thiserror::Error;

/// Errors that can occur while building or running an assignment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The input failed structural or semantic validation before any solving
    /// was attempted (missing fields, non-positive counts, inconsistent
    /// position-target sums, unknown position strings, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An identifier's ULID body failed the canonical pattern.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// No partition of a session's roster can satisfy its size bounds
    /// (e.g. `roster_len < group_num * min` or `roster_len > group_num * max`).
    #[error("infeasible session {session}: {reason}")]
    Infeasible { session: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
