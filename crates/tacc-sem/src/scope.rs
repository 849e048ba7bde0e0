//! Flat scope tracking: one global scope plus a one-deep stack of function
//! scopes. `if`/block bodies do not introduce new scopes — they share their
//! enclosing function's.
//!
//! Deliberately not a general nested-rib model: this language has no block
//! scoping, so there is nothing for a rib tree to express that a flat store
//! can't.

use crate::symbol_table::{Scope, SymbolEntry};
use tacc_util::Symbol;

/// Global scope plus a stack of function scopes. The stack holds at most one
/// entry in this language (functions don't nest), but is kept as a stack to
/// mirror the source model and to fail loudly (via `expect`) if that
/// invariant is ever violated instead of silently misbehaving.
#[derive(Debug, Default)]
pub struct ScopeStore {
    globals: Scope,
    others: Vec<Scope>,
}

impl ScopeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_global_scope(&self) -> bool {
        self.others.is_empty()
    }

    pub fn global_scope(&self) -> &Scope {
        &self.globals
    }

    pub fn global_scope_mut(&mut self) -> &mut Scope {
        &mut self.globals
    }

    /// The innermost scope: the current function's, or globals if none is
    /// open.
    pub fn current_scope(&self) -> &Scope {
        self.others.last().unwrap_or(&self.globals)
    }

    pub fn current_scope_mut(&mut self) -> &mut Scope {
        self.others.last_mut().unwrap_or(&mut self.globals)
    }

    /// Looks up `name` in the current scope, falling back to globals (where
    /// function declarations live) when the current scope doesn't shadow it.
    pub fn lookup(&self, name: Symbol) -> Option<&SymbolEntry> {
        self.current_scope()
            .get(&name)
            .or_else(|| self.globals.get(&name))
    }

    pub fn push_function_scope(&mut self) {
        self.others.push(Scope::default());
    }

    /// Pops the current function scope and returns it for the caller to
    /// snapshot into the finished semantics table.
    pub fn pop_function_scope(&mut self) -> Scope {
        self.others
            .pop()
            .expect("pop_function_scope called with no function scope open")
    }
}
