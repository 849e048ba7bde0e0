//! Statement lowering: declarations, blocks, `if`, `return`, and the
//! expression-statement filter.

use super::Emitter;
use crate::step::{Addr, AssignOp, Step, Value};
use tacc_par::{DataType, OpType, Param, Stmt};
use tacc_util::Symbol;

impl<'a> Emitter<'a> {
    pub(super) fn lower_function(
        &mut self,
        name: Symbol,
        return_type: DataType,
        params: &[Param],
        body: &Stmt,
    ) {
        self.builder.emit(Step::Label(name));
        self.builder.reset_function_registers();
        self.locals.clear();

        for param in params {
            let addr = self.builder.allocate_addr();
            self.locals.insert(param.name, addr);
            self.builder.emit(Step::LoadConst {
                dest: addr,
                value: Value::Int(0),
            });
        }

        let exit_label = self.builder.generate_label();
        self.exit_labels.push(exit_label);
        self.current_return_type = return_type;

        self.lower_stmt(body);

        self.builder.emit(Step::Label(exit_label));
        self.builder.emit(Step::Return);
        self.exit_labels.pop();
        self.locals.clear();
    }

    fn lower_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VariableDecl { name, rhs, .. } => self.lower_variable_decl(*name, rhs),
            Stmt::Block { stmts, .. } => {
                for s in stmts {
                    self.lower_stmt(s);
                }
            }
            Stmt::ExprStmt { inner, .. } => self.lower_expr_stmt(inner),
            Stmt::If {
                condition,
                then_block,
                else_block,
                ..
            } => self.lower_if(condition, then_block, else_block.as_deref()),
            Stmt::Return { result, .. } => self.lower_return(result),
            Stmt::FunctionDecl { .. } => {
                unreachable!("function declarations do not nest in this language")
            }
        }
    }

    /// `typename name = rhs;`: allocates the variable's address and binds
    /// the name to it BEFORE lowering the initialiser, then writes the
    /// initial value with the same
    /// `Assign(addr, NOP, [v])` shape a plain assignment uses.
    fn lower_variable_decl(&mut self, name: Symbol, rhs: &tacc_par::Expr) {
        let addr = self.builder.allocate_addr();
        self.locals.insert(name, addr);

        let v = self.lower_expr(rhs);
        let v_addr = v.require_addr();
        self.builder.emit(Step::Assign {
            dest: addr,
            op: AssignOp::Nop,
            operands: vec![Value::Addr(v_addr)],
        });
        self.free_if_owned(&v);
    }

    /// A bare expression statement. Semantic analysis has already rejected
    /// any outer op other than `CALL`/`ASSIGN` as a dead temporary; anything
    /// else reaching here is simply dropped.
    fn lower_expr_stmt(&mut self, inner: &tacc_par::Expr) {
        if !matches!(inner.op_type(), OpType::Call | OpType::Assign) {
            return;
        }
        let result = self.lower_expr(inner);
        self.free_if_owned(&result);
    }

    fn lower_if(&mut self, condition: &tacc_par::Expr, then_block: &Stmt, else_block: Option<&Stmt>) {
        let falsy = self.builder.generate_label();

        let c = self.lower_expr(condition);
        let c_addr = c.require_addr();
        self.builder.emit(Step::JumpIf {
            target: falsy,
            cmp: OpType::Eq,
            a: Value::Int(0),
            b: Value::Addr(c_addr),
        });

        self.lower_stmt(then_block);

        if let Some(else_block) = else_block {
            let truthy = self.builder.generate_label();
            self.builder.emit(Step::Jump(truthy));
            self.builder.emit(Step::Label(falsy));
            self.lower_stmt(else_block);
            self.builder.emit(Step::Label(truthy));
        } else {
            self.builder.emit(Step::Label(falsy));
        }

        self.free_if_owned(&c);
    }

    /// `return expr;`. For a non-`VOID` function, transfers the result into
    /// the reserved `RET` address before jumping, completing the return
    /// convention: a value-producing function leaves its result in a named
    /// slot rather than just jumping to the exit label. A `void` function
    /// still compiles the result expression (for its side effects/type
    /// check) but transfers nothing.
    fn lower_return(&mut self, result: &tacc_par::Expr) {
        let v = self.lower_expr(result);
        if self.current_return_type != DataType::Void {
            let v_addr = v.require_addr();
            self.builder.emit(Step::Assign {
                dest: Addr::Ret,
                op: AssignOp::Nop,
                operands: vec![Value::Addr(v_addr)],
            });
        }
        self.free_if_owned(&v);

        let target = *self
            .exit_labels
            .last()
            .expect("return statement outside of a function body");
        self.builder.emit(Step::Jump(target));
    }
}
