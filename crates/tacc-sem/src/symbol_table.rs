//! Symbol table entries produced by the analyser for each scope.

use tacc_par::DataType;
use tacc_util::{FxHashMap, Symbol};

/// What a name in scope stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Var,
    Func,
}

/// Arity and parameter types of a function symbol, recorded so calls can be
/// checked without re-walking the declaration.
#[derive(Debug, Clone)]
pub struct FuncExtras {
    pub arity: usize,
    pub param_types: Vec<DataType>,
}

/// One symbol table entry: a variable or function binding.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub in_global: bool,
    pub role: Role,
    pub data_type: DataType,
    pub extras: Option<FuncExtras>,
}

impl SymbolEntry {
    pub fn variable(in_global: bool, data_type: DataType) -> Self {
        Self {
            in_global,
            role: Role::Var,
            data_type,
            extras: None,
        }
    }

    pub fn function(return_type: DataType, param_types: Vec<DataType>) -> Self {
        Self {
            in_global: true,
            role: Role::Func,
            data_type: return_type,
            extras: Some(FuncExtras {
                arity: param_types.len(),
                param_types,
            }),
        }
    }
}

/// A single scope: the names visible within it.
pub type Scope = FxHashMap<Symbol, SymbolEntry>;

/// The finished symbol tables, one per function plus one for the top level,
/// keyed by function name (and [`GLOBAL_SCOPE_NAME`] for the top level).
/// Built with [`indexmap::IndexMap`] so tests and callers see scopes in
/// declaration order rather than hash order.
pub type SemanticsTable = indexmap::IndexMap<Symbol, Scope>;

/// The key [`SemanticsTable`] uses for the top-level (global) scope.
pub fn global_scope_name() -> Symbol {
    Symbol::intern(".global")
}
