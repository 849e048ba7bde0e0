//! Semantic analysis over [`tacc_par`]'s AST: flat scope tracking, type
//! checking against a closed four-type system, and symbol-table
//! construction. No block scoping, no inference, no generics — this
//! language's types are always written out, so there is nothing to infer.

pub mod analyzer;
#[cfg(test)]
mod edge_cases;
pub mod scope;
pub mod symbol_table;

pub use analyzer::{AnalyzerOptions, SemanticAnalyzer, SemanticError};
pub use scope::ScopeStore;
pub use symbol_table::{global_scope_name, FuncExtras, Role, Scope, SemanticsTable, SymbolEntry};
