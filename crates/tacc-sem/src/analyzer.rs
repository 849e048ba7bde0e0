//! The semantic analyser: name resolution, type checking, and symbol-table
//! construction over a parsed [`tacc_par::Ast`].
//!
//! One `analyze_*` method per AST variant, matched directly on the variant
//! tag rather than dispatched through a visitor trait.

use crate::scope::ScopeStore;
use crate::symbol_table::{global_scope_name, Role, SemanticsTable, SymbolEntry};
use tacc_par::{DataType, Expr, LiteralData, OpType, Stmt};
use tacc_util::diagnostic::{DiagnosticCode, Handler};
use tacc_util::{Span, Symbol};

/// Non-semantic analyser knobs. Currently empty; room to grow per the
/// workspace's options-struct convention.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {}

/// One reported problem: the name it's about, the scope it was found in
/// (`.global` or a function name), and a human-readable message.
pub type SemanticError = (Symbol, Symbol, String);

/// Walks an [`tacc_par::Ast`], building a [`SemanticsTable`] and collecting
/// [`SemanticError`]s along the way. Errors are also forwarded to the
/// supplied [`Handler`] as structured diagnostics.
pub struct SemanticAnalyzer<'a> {
    scopes: ScopeStore,
    current_scope_name: Symbol,
    current_return_type: Option<DataType>,
    semantics: SemanticsTable,
    errors: Vec<SemanticError>,
    handler: &'a Handler,
    #[allow(dead_code)]
    options: AnalyzerOptions,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self::with_options(handler, AnalyzerOptions::default())
    }

    pub fn with_options(handler: &'a Handler, options: AnalyzerOptions) -> Self {
        Self {
            scopes: ScopeStore::new(),
            current_scope_name: global_scope_name(),
            current_return_type: None,
            semantics: SemanticsTable::new(),
            errors: Vec::new(),
            handler,
            options,
        }
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Analyses every top-level statement, returning the finished semantics
    /// table. Errors are available afterwards via [`Self::errors`].
    pub fn analyze(mut self, ast: &[Stmt]) -> SemanticsTable {
        for stmt in ast {
            self.analyze_top_level(stmt);
        }
        self.semantics
            .insert(global_scope_name(), self.scopes.global_scope().clone());
        self.semantics
    }

    fn error(&mut self, subject: Symbol, span: Span, code: DiagnosticCode, message: impl Into<String>) {
        let message = message.into();
        self.errors
            .push((subject, self.current_scope_name, message.clone()));
        self.handler
            .build_error(span, message)
            .code(code)
            .emit(self.handler);
    }

    // --- Statements ----------------------------------------------------

    /// Top-level declarations: only `VariableDecl` and `FunctionDecl` are
    /// legal here. Anything else is a placement error — the global scope has
    /// no control flow.
    fn analyze_top_level(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VariableDecl { .. } | Stmt::FunctionDecl { .. } => self.analyze_stmt(stmt),
            other => {
                let subject = Symbol::intern("<top-level-stmt>");
                self.error(
                    subject,
                    other.span(),
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    "expression statements, if-statements, and return-statements are not allowed at global scope",
                );
            }
        }
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VariableDecl {
                name,
                data_type,
                rhs,
                span,
            } => self.analyze_variable_decl(*name, *data_type, rhs, *span),
            Stmt::FunctionDecl {
                name,
                return_type,
                params,
                body,
                span,
            } => self.analyze_function_decl(*name, *return_type, params, body, *span),
            Stmt::Block { stmts, .. } => {
                for s in stmts {
                    self.analyze_stmt(s);
                }
            }
            Stmt::ExprStmt { inner, span } => self.analyze_expr_stmt(inner, *span),
            Stmt::If {
                condition,
                then_block,
                else_block,
                span,
            } => self.analyze_if(condition, then_block, else_block.as_deref(), *span),
            Stmt::Return { result, span } => self.analyze_return(result, *span),
        }
    }

    fn analyze_variable_decl(&mut self, name: Symbol, data_type: DataType, rhs: &Expr, span: Span) {
        let (_, rhs_type) = self.analyze_expr(rhs);

        if data_type == DataType::Void {
            self.error(
                name,
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("variable '{}' cannot be declared with type void", name.as_str()),
            );
        } else if rhs_type != data_type {
            self.error(
                name,
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!(
                    "initializer of type {:?} does not match declared type {:?} for '{}'",
                    rhs_type,
                    data_type,
                    name.as_str()
                ),
            );
        }

        let in_global = self.scopes.at_global_scope();
        self.scopes
            .current_scope_mut()
            .insert(name, SymbolEntry::variable(in_global, data_type));
    }

    fn analyze_function_decl(
        &mut self,
        name: Symbol,
        return_type: DataType,
        params: &[tacc_par::Param],
        body: &Stmt,
        span: Span,
    ) {
        if !self.scopes.at_global_scope() {
            self.error(
                name,
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                "nested function declarations are not allowed",
            );
            return;
        }

        let param_types: Vec<DataType> = params.iter().map(|p| p.data_type).collect();
        self.scopes
            .global_scope_mut()
            .insert(name, SymbolEntry::function(return_type, param_types));

        let prev_scope_name = self.current_scope_name;
        self.current_scope_name = name;
        self.scopes.push_function_scope();

        for param in params {
            self.scopes
                .current_scope_mut()
                .insert(param.name, SymbolEntry::variable(false, param.data_type));
        }

        let prev_return_type = self.current_return_type.replace(return_type);
        self.analyze_stmt(body);
        self.current_return_type = prev_return_type;

        let snapshot = self.scopes.pop_function_scope();
        self.semantics.insert(name, snapshot);
        self.current_scope_name = prev_scope_name;
    }

    fn analyze_expr_stmt(&mut self, inner: &Expr, span: Span) {
        if self.scopes.at_global_scope() {
            self.error(
                Symbol::intern("<expr-stmt>"),
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                "expression statements are not allowed at global scope",
            );
            return;
        }

        match inner.op_type() {
            OpType::Call | OpType::Assign => {
                self.analyze_expr(inner);
            }
            _ => {
                self.error(
                    Symbol::intern("<expr-stmt>"),
                    span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    "expression statement has no effect: only calls and assignments are allowed",
                );
            }
        }
    }

    fn analyze_if(&mut self, condition: &Expr, then_block: &Stmt, else_block: Option<&Stmt>, span: Span) {
        if self.scopes.at_global_scope() {
            self.error(
                Symbol::intern("<if-stmt>"),
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                "if-statements are not allowed at global scope",
            );
            return;
        }
        self.analyze_expr(condition);
        self.analyze_stmt(then_block);
        if let Some(else_block) = else_block {
            self.analyze_stmt(else_block);
        }
    }

    fn analyze_return(&mut self, result: &Expr, span: Span) {
        if self.scopes.at_global_scope() {
            self.error(
                Symbol::intern("<return-stmt>"),
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                "return statements are not allowed at global scope",
            );
            return;
        }
        let (_, result_type) = self.analyze_expr(result);
        if let Some(expected) = self.current_return_type {
            if result_type != expected {
                self.error(
                    Symbol::intern("<return-stmt>"),
                    span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!(
                        "return type {:?} does not match function return type {:?}",
                        result_type, expected
                    ),
                );
            }
        }
    }

    // --- Expressions -----------------------------------------------------

    /// Returns the resolved name (for identifiers) and type of `expr`.
    fn analyze_expr(&mut self, expr: &Expr) -> (Option<Symbol>, DataType) {
        match expr {
            Expr::Literal { data, span, .. } => self.analyze_literal(data, *span),
            Expr::Unary { inner, op, span } => self.analyze_unary(inner, *op, *span),
            Expr::Binary { lhs, rhs, op, span } => self.analyze_binary(lhs, rhs, *op, *span),
            Expr::Call { name, args, span } => self.analyze_call(*name, args, *span),
        }
    }

    fn analyze_literal(&mut self, data: &LiteralData, span: Span) -> (Option<Symbol>, DataType) {
        match data {
            LiteralData::Int(_) => (None, DataType::Int),
            LiteralData::Char(_) => (None, DataType::Char),
            LiteralData::Name(name) => match self.scopes.lookup(*name) {
                Some(entry) if entry.role == Role::Func => {
                    self.error(
                        *name,
                        span,
                        DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                        format!("'{}' is a function and cannot be used as a value outside of a call", name.as_str()),
                    );
                    (Some(*name), DataType::Void)
                }
                Some(entry) => (Some(*name), entry.data_type),
                None => {
                    self.error(
                        *name,
                        span,
                        DiagnosticCode::E_SEMANTIC_UNDEFINED_VAR,
                        format!("'{}' is not defined", name.as_str()),
                    );
                    (Some(*name), DataType::Void)
                }
            },
        }
    }

    fn analyze_unary(&mut self, inner: &Expr, op: OpType, span: Span) -> (Option<Symbol>, DataType) {
        let (name, inner_type) = self.analyze_expr(inner);
        if !op_legal(op, inner_type) {
            self.error(
                name.unwrap_or_else(|| Symbol::intern("<expr>")),
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("operator {:?} is not defined for type {:?}", op, inner_type),
            );
            return (None, DataType::Void);
        }
        (name, inner_type)
    }

    fn analyze_binary(&mut self, lhs: &Expr, rhs: &Expr, op: OpType, span: Span) -> (Option<Symbol>, DataType) {
        if op == OpType::Assign {
            return self.analyze_assign(lhs, rhs, span);
        }

        let (lhs_name, lhs_type) = self.analyze_expr(lhs);
        let (_, rhs_type) = self.analyze_expr(rhs);

        if !op_legal(op, lhs_type) || !op_legal(op, rhs_type) {
            self.error(
                lhs_name.unwrap_or_else(|| Symbol::intern("<expr>")),
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!(
                    "operator {:?} is not defined for types {:?} and {:?}",
                    op, lhs_type, rhs_type
                ),
            );
            return (None, DataType::Void);
        }

        (None, promote(lhs_type, rhs_type))
    }

    /// `lhs = rhs`: `lhs` must be an identifier bound to a variable whose
    /// type is neither `VOID` nor `UNKNOWN`.
    fn analyze_assign(&mut self, lhs: &Expr, rhs: &Expr, span: Span) -> (Option<Symbol>, DataType) {
        let (_, rhs_type) = self.analyze_expr(rhs);

        let target = match lhs {
            Expr::Literal {
                data: LiteralData::Name(name),
                ..
            } => self
                .scopes
                .lookup(*name)
                .filter(|entry| {
                    entry.role == Role::Var && !matches!(entry.data_type, DataType::Void | DataType::Unknown)
                })
                .map(|entry| (*name, entry.data_type)),
            _ => None,
        };

        let Some((name, target_type)) = target else {
            let subject = match lhs {
                Expr::Literal {
                    data: LiteralData::Name(name),
                    ..
                } => *name,
                _ => Symbol::intern("<assignment-target>"),
            };
            self.error(
                subject,
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                "left-hand side of an assignment must be a declared variable",
            );
            return (None, DataType::Void);
        };

        if !op_legal(OpType::Assign, rhs_type) {
            self.error(
                name,
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!("cannot assign a value of type {:?} to '{}'", rhs_type, name.as_str()),
            );
            return (None, DataType::Void);
        }

        if rhs_type != target_type {
            self.error(
                name,
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!(
                    "cannot assign {:?} to '{}' of type {:?}",
                    rhs_type,
                    name.as_str(),
                    target_type
                ),
            );
            return (None, DataType::Void);
        }

        (Some(name), target_type)
    }

    fn analyze_call(&mut self, name: Symbol, args: &[Expr], span: Span) -> (Option<Symbol>, DataType) {
        let arg_types: Vec<DataType> = args.iter().map(|a| self.analyze_expr(a).1).collect();

        let Some(entry) = self.scopes.global_scope().get(&name) else {
            self.error(
                name,
                span,
                DiagnosticCode::E_SEMANTIC_UNDEFINED_FN,
                format!("function '{}' is not defined", name.as_str()),
            );
            return (None, DataType::Void);
        };

        if entry.role != Role::Func {
            self.error(
                name,
                span,
                DiagnosticCode::E_SEMANTIC_UNDEFINED_FN,
                format!("'{}' is not a function", name.as_str()),
            );
            return (None, DataType::Void);
        }

        let extras = entry
            .extras
            .clone()
            .expect("function symbol entries always carry FuncExtras");

        if arg_types.len() != extras.arity {
            self.error(
                name,
                span,
                DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                format!(
                    "'{}' expects {} argument(s), got {}",
                    name.as_str(),
                    extras.arity,
                    arg_types.len()
                ),
            );
            return (None, entry.data_type);
        }

        for (i, (arg_type, expected)) in arg_types.iter().zip(extras.param_types.iter()).enumerate() {
            if arg_type != expected {
                self.error(
                    name,
                    span,
                    DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                    format!(
                        "'{}' argument {} has type {:?}, expected {:?}",
                        name.as_str(),
                        i + 1,
                        arg_type,
                        expected
                    ),
                );
                return (None, entry.data_type);
            }
        }

        (None, entry.data_type)
    }
}

/// The 4-column legality table: which `(op, type)` pairs are defined.
/// `VOID` and `UNKNOWN` are illegal for every operator — a well-typed
/// expression never carries either past this check.
fn op_legal(op: OpType, ty: DataType) -> bool {
    use DataType::*;
    use OpType::*;
    match op {
        Call => false,
        Neg | Mult | Div | Add | Sub => matches!(ty, Int),
        Eq | Neq | Lt | Lte | Gt | Gte | And | Or | Assign => matches!(ty, Char | Int),
        None => false,
    }
}

/// Binary result-type promotion, applied once both operands have passed the
/// legality check: identical types stay as-is; any `VOID` poisons the result
/// to `VOID`; otherwise `INT` dominates `CHAR`.
fn promote(lhs: DataType, rhs: DataType) -> DataType {
    use DataType::*;
    if lhs == rhs {
        return lhs;
    }
    if lhs == Void || rhs == Void {
        return Void;
    }
    if lhs == Int || rhs == Int {
        return Int;
    }
    Void
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacc_par::Parser;

    fn analyze(source: &str) -> SemanticsTable {
        let parse_handler = Handler::new();
        let mut parser = Parser::new(source, &parse_handler);
        let (ok, ast) = parser.parse_all();
        assert!(ok, "source failed to parse: {source}");

        let handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.analyze(&ast)
    }

    fn analyze_with_errors(source: &str) -> Vec<SemanticError> {
        let parse_handler = Handler::new();
        let mut parser = Parser::new(source, &parse_handler);
        let (ok, ast) = parser.parse_all();
        assert!(ok, "source failed to parse: {source}");

        let handler = Handler::new();
        let mut analyzer = SemanticAnalyzer::new(&handler);
        // `analyze` consumes self, so capture errors through a manual walk.
        for stmt in &ast {
            analyzer.analyze_top_level(stmt);
        }
        analyzer.errors().to_vec()
    }

    #[test]
    fn simple_program_has_no_errors() {
        let errors = analyze_with_errors("int main() { int x = 5; return x; }");
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn assigning_void_call_result_is_an_error() {
        let errors = analyze_with_errors(
            "void f() { } int main() { int x = f(); return x; }",
        );
        assert!(!errors.is_empty());
    }

    #[test]
    fn undefined_name_is_an_error() {
        let errors = analyze_with_errors("int main() { return y; }");
        assert!(!errors.is_empty());
    }

    #[test]
    fn call_arity_mismatch_is_an_error() {
        let errors = analyze_with_errors(
            "int f(int a) { return a; } int main() { return f(); }",
        );
        assert!(!errors.is_empty());
    }

    #[test]
    fn call_argument_type_mismatch_is_an_error() {
        let errors = analyze_with_errors(
            "int f(int a) { return a; } int main() { return f('c'); }",
        );
        assert!(!errors.is_empty());
    }

    #[test]
    fn semantics_table_has_global_and_function_entries() {
        let table = analyze("int main() { int x = 5; return x; }");
        assert!(table.contains_key(&global_scope_name()));
        assert!(table.contains_key(&Symbol::intern("main")));
    }

    #[test]
    fn assignment_to_undeclared_name_is_an_error() {
        let errors = analyze_with_errors("int main() { x = 5; return 0; }");
        assert!(!errors.is_empty());
    }

    #[test]
    fn short_circuit_operators_require_scalar_operands() {
        let errors = analyze_with_errors(
            "int main() { int x = 1; int y = 0; int z = x && y; return z; }",
        );
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn global_variable_is_visible_inside_a_function_body() {
        let errors = analyze_with_errors("int g = 42; int main() { return g; }");
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn global_variable_is_assignable_from_inside_a_function_body() {
        let errors =
            analyze_with_errors("int g = 1; int main() { g = 2; return g; }");
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn function_name_used_as_a_bare_value_is_an_error() {
        let errors = analyze_with_errors("int add() { return 0; } int x = add;");
        assert!(!errors.is_empty());
    }

    #[test]
    fn function_name_used_as_a_bare_value_in_an_assignment_is_an_error() {
        let errors = analyze_with_errors(
            "int add() { return 0; } int main() { int x = 0; x = add; return x; }",
        );
        assert!(!errors.is_empty());
    }
}
