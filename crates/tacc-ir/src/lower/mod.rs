//! The IR emitter: a tree walker over [`tacc_par::Ast`] plus a
//! [`tacc_sem::SemanticsTable`], producing an ordered [`Step`] sequence.
//!
//! One `lower_*` function per AST variant, matched directly on the variant
//! tag. The register table is reset at function *entry* rather than
//! leaking across functions, and `||` lowering is symmetric to `&&` instead
//! of referencing a `falsy` label that one branch never emits.
//!
//! This pass assumes the AST already passed semantic analysis: it does not
//! revalidate arity, types, or name resolution, and a malformed AST is a
//! programmer error here, not a user-facing diagnostic.

mod expr;
mod stmt;

use crate::builder::{EmitterOptions, IrBuilder};
use crate::step::{Addr, Step};
use tacc_par::{Ast, DataType, Stmt};
use tacc_sem::SemanticsTable;
use tacc_util::{FxHashMap, Symbol};

/// The result of lowering an [`tacc_par::Expr`]: the address now holding its
/// value, and whether the caller owns that address (must free it once done)
/// or it's a persisting binding (a variable/parameter address, which must
/// live for the rest of the function). `addr` is `None` only for a `VOID`
/// call compiled as a statement.
struct Lowered {
    addr: Option<Addr>,
    owned: bool,
}

impl Lowered {
    fn owned(addr: Addr) -> Self {
        Self {
            addr: Some(addr),
            owned: true,
        }
    }

    fn binding(addr: Addr) -> Self {
        Self {
            addr: Some(addr),
            owned: false,
        }
    }

    fn void() -> Self {
        Self {
            addr: None,
            owned: false,
        }
    }

    /// The address, for contexts where semantic analysis already
    /// guarantees a value was produced (every position except a bare
    /// `ExprStmt` whose outer op is `Call`).
    fn require_addr(&self) -> Addr {
        self.addr
            .expect("VOID-valued expression used where a value was required")
    }
}

/// Lowers a complete, semantically-checked program into its IR steps.
pub fn emit_program(ast: &Ast, semantics: &SemanticsTable) -> Vec<Step> {
    emit_program_with_options(ast, semantics, EmitterOptions::default())
}

/// As [`emit_program`], but with an explicit starting label/temp offset —
/// for a host stitching several translation units into one address space.
pub fn emit_program_with_options(
    ast: &Ast,
    semantics: &SemanticsTable,
    options: EmitterOptions,
) -> Vec<Step> {
    let mut emitter = Emitter::new(semantics, options);
    for decl in ast {
        emitter.lower_top_level(decl);
    }
    emitter.builder.finish()
}

struct Emitter<'a> {
    builder: IrBuilder,
    semantics: &'a SemanticsTable,
    /// Constant-initialised top-level variables: persist across every
    /// function, never reset, never freed.
    globals: FxHashMap<Symbol, Addr>,
    /// Parameter/local variable bindings for the function currently being
    /// lowered. Cleared at function exit.
    locals: FxHashMap<Symbol, Addr>,
    /// Return-label stack; `return` jumps to the top entry.
    exit_labels: Vec<Symbol>,
    current_return_type: DataType,
}

impl<'a> Emitter<'a> {
    fn new(semantics: &'a SemanticsTable, options: EmitterOptions) -> Self {
        Self {
            builder: IrBuilder::new(options),
            semantics,
            globals: FxHashMap::default(),
            locals: FxHashMap::default(),
            exit_labels: Vec::new(),
            current_return_type: DataType::Void,
        }
    }

    /// Resolves a name to its bound address: the current function's locals
    /// first, falling back to the globals table (mirroring
    /// [`tacc_sem::ScopeStore::lookup`]'s function-then-global order).
    fn resolve(&self, name: Symbol) -> Addr {
        self.locals
            .get(&name)
            .copied()
            .or_else(|| self.globals.get(&name).copied())
            .unwrap_or_else(|| panic!("undefined name `{name}` reached the IR emitter"))
    }

    /// The declared return type of a called function, looked up in the
    /// global scope the semantic analyser published.
    fn callee_return_type(&self, name: Symbol) -> DataType {
        self.semantics
            .get(&tacc_sem::global_scope_name())
            .and_then(|scope| scope.get(&name))
            .map(|entry| entry.data_type)
            .unwrap_or_else(|| panic!("call to undeclared function `{name}` reached the IR emitter"))
    }

    fn free_if_owned(&mut self, lowered: &Lowered) {
        if lowered.owned {
            if let Some(addr) = lowered.addr {
                self.builder.free(addr);
            }
        }
    }

    fn lower_top_level(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FunctionDecl {
                name,
                return_type,
                params,
                body,
                ..
            } => self.lower_function(*name, *return_type, params, body),
            Stmt::VariableDecl { name, rhs, .. } => self.lower_global_variable(*name, rhs),
            other => unreachable!(
                "semantic analysis rejects non-declaration statements at global scope: {other:?}"
            ),
        }
    }

    /// A constant-initialised top-level variable: bound to a named global
    /// address (not drawn from the per-function register pool) and written
    /// once, ahead of any function body, via the same `Assign(.., NOP, [v])`
    /// shape as a local `VariableDecl`.
    fn lower_global_variable(&mut self, name: Symbol, rhs: &tacc_par::Expr) {
        let addr = Addr::Global(name);
        self.globals.insert(name, addr);
        let v = self.lower_expr(rhs);
        let vaddr = v.require_addr();
        self.builder.emit(Step::Assign {
            dest: addr,
            op: crate::step::AssignOp::Nop,
            operands: vec![crate::step::Value::Addr(vaddr)],
        });
        self.free_if_owned(&v);
    }
}
