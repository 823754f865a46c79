//! JSON Schema generation for the input/output envelopes, backing the CLI's
//! `schema` subcommand and the API's schema-discovery needs. Grounded in
//! `backend/contracts`'s `schemars` dependency; no reference module ships a
//! schema generator to imitate line-for-line, so this follows
//! `schemars::schema_for!`'s documented top-level entry point directly.

use crate::input::AssignmentInput;
use crate::output::AssignmentOutput;
use schemars::Schema;

pub fn input_schema() -> Schema {
    schemars::schema_for!(AssignmentInput)
}

pub fn output_schema() -> Schema {
    schemars::schema_for!(AssignmentOutput)
}
