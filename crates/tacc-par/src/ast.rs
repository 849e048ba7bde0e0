//! AST node definitions.
//!
//! The expression and statement sets are closed, matching the language's
//! fixed grammar exactly — unlike a general-purpose-language AST, there is
//! no room here for future variants, so each enum carries exactly the cases
//! the grammar names.

use tacc_util::{Span, Symbol};

/// A complete parse: the top-level declarations in source order.
pub type Ast = Vec<Stmt>;

/// `{CHAR, INT, VOID, UNKNOWN}`. `Unknown` is an internal sentinel used
/// during parsing/analysis; it must never reach the IR emitter for a
/// well-typed program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Char,
    Int,
    Void,
    Unknown,
}

/// Arity of an [`OpType`]: fixed per-operator, not per-use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpArity {
    Unary,
    Binary,
    Nothing,
}

/// Closed set of operator descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpType {
    Call,
    Neg,
    Mult,
    Div,
    Add,
    Sub,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
    Assign,
    None,
}

impl OpType {
    /// Fixed arity per operator: `Neg`/`Call` unary, `None` nullary, the
    /// rest binary.
    pub fn arity(self) -> OpArity {
        match self {
            OpType::Neg | OpType::Call => OpArity::Unary,
            OpType::None => OpArity::Nothing,
            _ => OpArity::Binary,
        }
    }

    /// Inverse comparison for short-circuit/branch lowering (`EQ<->NEQ`,
    /// `LT<->GTE`, `LTE<->GT`, `GT<->LTE`, `GTE<->LT`). Only meaningful for
    /// the comparison operators; any other op returns itself unchanged.
    pub fn inverse(self) -> OpType {
        match self {
            OpType::Eq => OpType::Neq,
            OpType::Neq => OpType::Eq,
            OpType::Lt => OpType::Gte,
            OpType::Gte => OpType::Lt,
            OpType::Lte => OpType::Gt,
            OpType::Gt => OpType::Lte,
            other => other,
        }
    }
}

/// A literal leaf: an int/char constant or a bare name reference.
#[derive(Debug, Clone)]
pub enum LiteralData {
    Int(i64),
    Char(char),
    Name(Symbol),
}

/// Expressions. Each variant carries its [`Span`] for diagnostics.
#[derive(Debug, Clone)]
pub enum Expr {
    /// An int/char literal or a bare identifier reference.
    Literal {
        data: LiteralData,
        data_type: DataType,
        span: Span,
    },
    /// `-inner`. Only `Neg` is currently a valid unary op.
    Unary {
        inner: Box<Expr>,
        op: OpType,
        span: Span,
    },
    /// `lhs op rhs`, including `lhs = rhs` (`op` is [`OpType::Assign`]).
    Binary {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        op: OpType,
        span: Span,
    },
    /// `name(args...)`.
    Call {
        name: Symbol,
        args: Vec<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Call { span, .. } => *span,
        }
    }

    /// A best-effort type guess available before semantic analysis touches
    /// scope: an int literal is always `INT`, a name is `Unknown` until
    /// looked up.
    pub fn deduce_early_type(&self) -> DataType {
        match self {
            Expr::Literal { data_type, .. } => *data_type,
            Expr::Unary { inner, .. } => inner.deduce_early_type(),
            Expr::Binary { lhs, rhs, .. } => {
                let (l, r) = (lhs.deduce_early_type(), rhs.deduce_early_type());
                if l == r {
                    l
                } else {
                    DataType::Unknown
                }
            }
            Expr::Call { .. } => DataType::Unknown,
        }
    }

    pub fn op_arity(&self) -> OpArity {
        self.op_type().arity()
    }

    pub fn op_type(&self) -> OpType {
        match self {
            Expr::Literal { .. } => OpType::None,
            Expr::Unary { op, .. } => *op,
            Expr::Binary { op, .. } => *op,
            Expr::Call { .. } => OpType::Call,
        }
    }
}

/// An ordered `(type, name)` parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub data_type: DataType,
    pub name: Symbol,
}

/// Statements.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `typename name = rhs;` — the initialiser is mandatory.
    VariableDecl {
        name: Symbol,
        data_type: DataType,
        rhs: Expr,
        span: Span,
    },
    /// `typename name(params) block`.
    FunctionDecl {
        name: Symbol,
        return_type: DataType,
        params: Vec<Param>,
        body: Box<Stmt>,
        span: Span,
    },
    /// `{ stmts... }`. Shares its enclosing function's scope — no nested
    /// block scoping.
    Block { stmts: Vec<Stmt>, span: Span },
    /// A bare expression statement; outermost op must be `Call` or
    /// `Assign`, else it's a dead-temporary error.
    ExprStmt { inner: Expr, span: Span },
    /// `if (cond) block [else block]`.
    If {
        condition: Expr,
        then_block: Box<Stmt>,
        else_block: Option<Box<Stmt>>,
        span: Span,
    },
    /// `return expr;`.
    Return { result: Expr, span: Span },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VariableDecl { span, .. }
            | Stmt::FunctionDecl { span, .. }
            | Stmt::Block { span, .. }
            | Stmt::ExprStmt { span, .. }
            | Stmt::If { span, .. }
            | Stmt::Return { span, .. } => *span,
        }
    }

    pub fn is_expr_stmt(&self) -> bool {
        matches!(self, Stmt::ExprStmt { .. })
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, Stmt::VariableDecl { .. } | Stmt::FunctionDecl { .. })
    }

    pub fn is_control_flow(&self) -> bool {
        matches!(self, Stmt::Block { .. } | Stmt::If { .. } | Stmt::Return { .. })
    }
}
