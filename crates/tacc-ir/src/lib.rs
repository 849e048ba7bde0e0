//! Three-address IR emission for the compiler front-end.
//!
//! Lowers a semantically-checked [`tacc_par::Ast`] into a flat, ordered
//! sequence of [`Step`]s: reserved registers `A/B/C` plus on-demand
//! temporaries `aN`, short-circuit `&&`/`||` lowering via inverse/normal
//! jumps, and one `Label`/`Return` pair per function. This pass is not a
//! validator — it assumes its input already passed [`tacc_sem`] analysis,
//! and a malformed AST is a programmer error here, not a diagnostic.

pub mod builder;
#[cfg(test)]
mod edge_cases;
pub mod lower;
pub mod step;

pub use builder::{EmitterOptions, IrBuilder, StepId};
pub use lower::{emit_program, emit_program_with_options};
pub use step::{Addr, AssignOp, Label, Step, Value};
