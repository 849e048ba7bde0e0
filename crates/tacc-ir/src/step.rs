//! The three-address IR's data model: addresses, values, and the closed
//! [`Step`] variant set emitted by [`crate::lower`].

use std::fmt;
use tacc_par::OpType;
use tacc_util::Symbol;

/// A label name. Function entry labels are the function's own name;
/// synthetic labels are `L0, L1, ...` from [`crate::builder::IrBuilder::generate_label`].
pub type Label = Symbol;

/// A symbolic register: one of the three reserved registers, the return
/// register, a synthetic temporary, or a named global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addr {
    A,
    B,
    C,
    /// Holds the value transferred out of a function by `return`. Never
    /// produced by [`crate::builder::IrBuilder::allocate_addr`]; written
    /// directly by `return` lowering.
    Ret,
    /// Synthetic temporary `a<N>`. Never reused once allocated.
    Temp(u32),
    /// A constant-initialised top-level variable's storage, addressed by
    /// its own name rather than a register (an ambient extension for the
    /// spec's "possibly constant-initialised top-level variables" case;
    /// see `DESIGN.md`).
    Global(Symbol),
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addr::A => write!(f, "A"),
            Addr::B => write!(f, "B"),
            Addr::C => write!(f, "C"),
            Addr::Ret => write!(f, "RET"),
            Addr::Temp(n) => write!(f, "a{n}"),
            Addr::Global(name) => write!(f, "{name}"),
        }
    }
}

/// An operand: either a symbolic address or a bare constant. `PushArg`,
/// `LoadConst`, and the operand lists of `Assign`/`JumpIf` all use this to
/// cover both "compile to an address" and "bare literal" lowering paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Addr(Addr),
    Int(i64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Addr(a) => write!(f, "{a}"),
            Value::Int(n) => write!(f, "{n}"),
        }
    }
}

/// The operator carried by an `Assign` step. `Nop` models a plain move
/// (variable declaration/assignment, the materialised result of a
/// short-circuit branch); `Negate` and `Arith` cover unary/binary
/// arithmetic and comparison; `Call` carries the callee name for a
/// non-`VOID` call used as a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignOp {
    Nop,
    Negate,
    Arith(OpType),
    Call(Symbol),
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignOp::Nop => write!(f, "NOP"),
            AssignOp::Negate => write!(f, "NEGATE"),
            AssignOp::Arith(op) => write!(f, "{op:?}"),
            AssignOp::Call(name) => write!(f, "CALL {name}"),
        }
    }
}

/// One step of three-address code. The ordered sequence of these, per
/// function, is the external artifact this crate produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Label(Label),
    Jump(Label),
    /// Branches to `target` when `a cmp b` holds.
    JumpIf {
        target: Label,
        cmp: OpType,
        a: Value,
        b: Value,
    },
    Return,
    PushArg(Value),
    CallFunc(Symbol),
    Assign {
        dest: Addr,
        op: AssignOp,
        operands: Vec<Value>,
    },
    LoadConst {
        dest: Addr,
        value: Value,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Label(name) => write!(f, "{name}:"),
            Step::Jump(target) => write!(f, "    jump {target}"),
            Step::JumpIf { target, cmp, a, b } => {
                write!(f, "    jumpif {target}, {cmp:?}, {a}, {b}")
            }
            Step::Return => write!(f, "    return"),
            Step::PushArg(v) => write!(f, "    pusharg {v}"),
            Step::CallFunc(name) => write!(f, "    call {name}"),
            Step::Assign { dest, op, operands } => {
                let ops: Vec<String> = operands.iter().map(|o| o.to_string()).collect();
                write!(f, "    {dest} = {op}({})", ops.join(", "))
            }
            Step::LoadConst { dest, value } => write!(f, "    {dest} = const {value}"),
        }
    }
}
