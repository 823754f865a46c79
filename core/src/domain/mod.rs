//! Immutable value types for the assignment engine: participants, sessions,
//! programs, groups, and the optimizer's working representation.
//!
//! Everything here is constructed once at input-parse time and never
//! mutated; the optimizer owns private working copies of the data it needs
//! to search over.

mod group;
mod individual;
mod participant;
mod position;
mod program;
mod session;
mod solution;

pub use group::{Group, Groups};
pub use individual::{empty_individual, individual_to_solution, solution_to_individual, Individual};
pub use participant::Participant;
pub use position::Position;
pub use program::Program;
pub use session::{PositionTargets, Session};
pub use solution::Solution;
