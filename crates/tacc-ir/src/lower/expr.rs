//! Expression lowering: literals, unary/binary arithmetic, short-circuit
//! `&&`/`||`, and calls.

use super::{Emitter, Lowered};
use crate::step::{AssignOp, Step, Value};
use tacc_par::{Expr, LiteralData, OpType};

impl<'a> Emitter<'a> {
    pub(super) fn lower_expr(&mut self, expr: &Expr) -> Lowered {
        match expr {
            Expr::Literal { data, .. } => self.lower_literal(data),
            Expr::Unary { inner, op, .. } => self.lower_unary(*op, inner),
            Expr::Binary { lhs, rhs, op, .. } => self.lower_binary(*op, lhs, rhs),
            Expr::Call { name, args, .. } => self.lower_call(*name, args),
        }
    }

    fn lower_literal(&mut self, data: &LiteralData) -> Lowered {
        let value = match data {
            LiteralData::Int(n) => Value::Int(*n),
            LiteralData::Char(c) => Value::Int(*c as i64),
            LiteralData::Name(name) => Value::Addr(self.resolve(*name)),
        };
        let dest = self.builder.allocate_addr();
        self.builder.emit(Step::LoadConst { dest, value });
        Lowered::owned(dest)
    }

    fn lower_unary(&mut self, op: OpType, inner: &Expr) -> Lowered {
        debug_assert_eq!(op, OpType::Neg, "only NEG is a valid unary op");
        let src = self.lower_expr(inner);
        let src_addr = src.require_addr();
        let dest = self.builder.allocate_addr();
        self.builder.emit(Step::Assign {
            dest,
            op: AssignOp::Negate,
            operands: vec![Value::Addr(src_addr)],
        });
        self.free_if_owned(&src);
        Lowered::owned(dest)
    }

    fn lower_binary(&mut self, op: OpType, lhs: &Expr, rhs: &Expr) -> Lowered {
        match op {
            OpType::Assign => self.lower_assign(lhs, rhs),
            OpType::And => self.lower_and(lhs, rhs),
            OpType::Or => self.lower_or(lhs, rhs),
            _ => self.lower_binary_op(op, lhs, rhs),
        }
    }

    /// Arithmetic and comparison binaries: `Assign(dest, op, [a, b])`.
    fn lower_binary_op(&mut self, op: OpType, lhs: &Expr, rhs: &Expr) -> Lowered {
        let a = self.lower_expr(lhs);
        let b = self.lower_expr(rhs);
        let a_addr = a.require_addr();
        let b_addr = b.require_addr();
        let dest = self.builder.allocate_addr();
        self.builder.emit(Step::Assign {
            dest,
            op: AssignOp::Arith(op),
            operands: vec![Value::Addr(a_addr), Value::Addr(b_addr)],
        });
        self.free_if_owned(&a);
        self.free_if_owned(&b);
        Lowered::owned(dest)
    }

    /// `lhs = rhs`: the destination is the variable's own bound address (so
    /// the write is actually observable afterwards), not a fresh temporary —
    /// the expression's "logical value" is just that same address read back.
    /// Semantic analysis has already guaranteed `lhs` is a bare name
    /// resolving to a declared variable.
    fn lower_assign(&mut self, lhs: &Expr, rhs: &Expr) -> Lowered {
        let Expr::Literal {
            data: LiteralData::Name(name),
            ..
        } = lhs
        else {
            unreachable!("semantic analysis requires an ASSIGN lhs to be a bare name")
        };
        let dest = self.resolve(*name);
        let v = self.lower_expr(rhs);
        let v_addr = v.require_addr();
        self.builder.emit(Step::Assign {
            dest,
            op: AssignOp::Nop,
            operands: vec![Value::Addr(v_addr)],
        });
        self.free_if_owned(&v);
        Lowered::binding(dest)
    }

    /// `lhs && rhs`, short-circuiting: both operands inverse-jump to a
    /// shared `falsy` label; falling through both sets the result `1` and
    /// jumps past the falsy path.
    fn lower_and(&mut self, lhs: &Expr, rhs: &Expr) -> Lowered {
        let dest = self.builder.allocate_addr();
        let falsy = self.builder.generate_label();
        let truthy = self.builder.generate_label();

        self.emit_inverse_jump(lhs, falsy);
        self.emit_inverse_jump(rhs, falsy);
        self.builder.emit(Step::Assign {
            dest,
            op: AssignOp::Nop,
            operands: vec![Value::Int(1)],
        });
        self.builder.emit(Step::Jump(truthy));
        self.builder.emit(Step::Label(falsy));
        self.builder.emit(Step::Assign {
            dest,
            op: AssignOp::Nop,
            operands: vec![Value::Int(0)],
        });
        self.builder.emit(Step::Label(truthy));
        Lowered::owned(dest)
    }

    /// `lhs || rhs`, short-circuiting: both operands normal-jump to a shared
    /// `truthy` label, symmetric to `lower_and` rather than reusing a
    /// `falsy_label` that one branch never emits.
    fn lower_or(&mut self, lhs: &Expr, rhs: &Expr) -> Lowered {
        let dest = self.builder.allocate_addr();
        let truthy = self.builder.generate_label();
        let end = self.builder.generate_label();

        self.emit_normal_jump(lhs, truthy);
        self.emit_normal_jump(rhs, truthy);
        self.builder.emit(Step::Assign {
            dest,
            op: AssignOp::Nop,
            operands: vec![Value::Int(0)],
        });
        self.builder.emit(Step::Jump(end));
        self.builder.emit(Step::Label(truthy));
        self.builder.emit(Step::Assign {
            dest,
            op: AssignOp::Nop,
            operands: vec![Value::Int(1)],
        });
        self.builder.emit(Step::Label(end));
        Lowered::owned(dest)
    }

    /// Branches to `target` when `operand` is false. A comparison operand
    /// branches directly on its inverted operator with no materialisation;
    /// anything else is materialised into a temporary and compared against
    /// zero (`COMPARE_EQ, 0, t`).
    fn emit_inverse_jump(&mut self, operand: &Expr, target: crate::step::Label) {
        if let Expr::Binary { lhs, rhs, op, .. } = operand {
            if is_comparison(*op) {
                let a = self.lower_expr(lhs);
                let b = self.lower_expr(rhs);
                let a_addr = a.require_addr();
                let b_addr = b.require_addr();
                self.builder.emit(Step::JumpIf {
                    target,
                    cmp: op.inverse(),
                    a: Value::Addr(a_addr),
                    b: Value::Addr(b_addr),
                });
                self.free_if_owned(&a);
                self.free_if_owned(&b);
                return;
            }
        }
        let t = self.lower_expr(operand);
        let t_addr = t.require_addr();
        self.builder.emit(Step::JumpIf {
            target,
            cmp: OpType::Eq,
            a: Value::Int(0),
            b: Value::Addr(t_addr),
        });
        self.free_if_owned(&t);
    }

    /// Branches to `target` when `operand` is true. A comparison operand
    /// branches directly, unmodified; anything else is materialised and
    /// compared against zero with `COMPARE_NEQ`.
    fn emit_normal_jump(&mut self, operand: &Expr, target: crate::step::Label) {
        if let Expr::Binary { lhs, rhs, op, .. } = operand {
            if is_comparison(*op) {
                let a = self.lower_expr(lhs);
                let b = self.lower_expr(rhs);
                let a_addr = a.require_addr();
                let b_addr = b.require_addr();
                self.builder.emit(Step::JumpIf {
                    target,
                    cmp: *op,
                    a: Value::Addr(a_addr),
                    b: Value::Addr(b_addr),
                });
                self.free_if_owned(&a);
                self.free_if_owned(&b);
                return;
            }
        }
        let t = self.lower_expr(operand);
        let t_addr = t.require_addr();
        self.builder.emit(Step::JumpIf {
            target,
            cmp: OpType::Neq,
            a: Value::Int(0),
            b: Value::Addr(t_addr),
        });
        self.free_if_owned(&t);
    }

    /// For a `CALL` used as a value: pushes arguments (bare literals pushed
    /// directly, anything else compiled to an address first), then either
    /// `CallFunc` (a `VOID` callee, used only from statement position) or
    /// `Assign(dest, CALL, [])` capturing the result.
    fn lower_call(&mut self, name: tacc_util::Symbol, args: &[Expr]) -> Lowered {
        for arg in args {
            if let Expr::Literal {
                data: LiteralData::Int(n),
                ..
            } = arg
            {
                self.builder.emit(Step::PushArg(Value::Int(*n)));
                continue;
            }
            if let Expr::Literal {
                data: LiteralData::Char(c),
                ..
            } = arg
            {
                self.builder.emit(Step::PushArg(Value::Int(*c as i64)));
                continue;
            }
            let a = self.lower_expr(arg);
            let addr = a.require_addr();
            self.builder.emit(Step::PushArg(Value::Addr(addr)));
            self.free_if_owned(&a);
        }

        if self.callee_return_type(name) == tacc_par::DataType::Void {
            self.builder.emit(Step::CallFunc(name));
            Lowered::void()
        } else {
            let dest = self.builder.allocate_addr();
            self.builder.emit(Step::Assign {
                dest,
                op: AssignOp::Call(name),
                operands: vec![],
            });
            Lowered::owned(dest)
        }
    }
}

fn is_comparison(op: OpType) -> bool {
    matches!(
        op,
        OpType::Eq | OpType::Neq | OpType::Lt | OpType::Lte | OpType::Gt | OpType::Gte
    )
}
