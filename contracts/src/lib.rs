//! Thin, framework-free external-interface layer around `cohort-core`: the
//! JSON wire format (`input`/`output`), ULID identifiers (`id`), JSON Schema
//! generation (`schema`), and the CSV/Markdown report writers (`report`).
//! None of this performs any scheduling; it exists purely to get a `Program`
//! in and an `AssignmentOutput`/report string out.

pub mod id;
pub mod input;
pub mod output;
pub mod report;
pub mod schema;

pub use id::{GroupId, ParticipantId, ProgramId, SessionId};
pub use input::{to_program, AssignmentInput, ParticipantInput, SessionInput};
pub use output::{to_output, AssignmentOutput, EvaluationOutput};
