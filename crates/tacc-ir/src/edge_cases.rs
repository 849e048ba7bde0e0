//! Edge case and property tests for the IR emitter, driven end-to-end
//! through the lexer/parser/semantic analyser rather than by hand-building
//! ASTs.

#[cfg(test)]
mod tests {
    use crate::step::{AssignOp, Step, Value};
    use crate::{emit_program, Addr};
    use std::collections::HashMap;
    use tacc_par::Parser;
    use tacc_sem::SemanticAnalyzer;
    use tacc_util::diagnostic::Handler;

    fn compile(source: &str) -> Vec<Step> {
        let parse_handler = Handler::new();
        let mut parser = Parser::new(source, &parse_handler);
        let (ok, ast) = parser.parse_all();
        assert!(ok, "source failed to parse: {source}");

        let sem_handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&sem_handler);
        let semantics = analyzer.analyze(&ast);
        assert!(
            !sem_handler.has_errors(),
            "source failed semantic analysis: {source}"
        );

        emit_program(&ast, &semantics)
    }

    /// Every `Jump`/`JumpIf` target must appear as a `Label` exactly once
    /// within the whole emitted stream (functions never share labels, so a
    /// global count suffices for these single-function-segment checks).
    fn assert_labels_well_formed(steps: &[Step]) {
        let mut label_counts: HashMap<_, u32> = HashMap::new();
        for step in steps {
            if let Step::Label(name) = step {
                *label_counts.entry(*name).or_insert(0) += 1;
            }
        }
        for step in steps {
            let target = match step {
                Step::Jump(t) => Some(*t),
                Step::JumpIf { target, .. } => Some(*target),
                _ => None,
            };
            if let Some(target) = target {
                assert_eq!(
                    label_counts.get(&target).copied().unwrap_or(0),
                    1,
                    "jump target {target} is not defined exactly once"
                );
            }
        }
    }

    /// Scopes to a single function's IR segment (from its entry `Label` to
    /// its own terminating `Return`, inclusive) so counts from other
    /// functions in the same program don't bleed in.
    fn function_label_and_return_counts(steps: &[Step], name: &str) -> (usize, usize) {
        let start = steps
            .iter()
            .position(|s| matches!(s, Step::Label(n) if n.as_str() == name))
            .unwrap_or_else(|| panic!("function label {name} not found"));
        let end = steps[start..]
            .iter()
            .position(|s| matches!(s, Step::Return))
            .map(|i| start + i)
            .unwrap_or_else(|| panic!("no Return found for function {name}"));
        let segment = &steps[start..=end];
        let label_count = segment
            .iter()
            .filter(|s| matches!(s, Step::Label(n) if n.as_str() == name))
            .count();
        let return_count = segment.iter().filter(|s| matches!(s, Step::Return)).count();
        (label_count, return_count)
    }

    #[test]
    fn scenario_1_simple_variable_and_return() {
        let steps = compile("int main() { int x = 5; return x; }");
        assert_labels_well_formed(&steps);

        assert!(matches!(&steps[0], Step::Label(n) if n.as_str() == "main"));
        assert!(steps
            .iter()
            .any(|s| matches!(s, Step::LoadConst { value: Value::Int(5), .. })));
        assert!(steps.iter().any(|s| matches!(
            s,
            Step::Assign {
                op: AssignOp::Nop,
                ..
            }
        )));
        assert!(matches!(steps.last(), Some(Step::Return)));
        let (label_count, return_count) = function_label_and_return_counts(&steps, "main");
        assert_eq!(label_count, 1);
        assert_eq!(return_count, 1);
    }

    #[test]
    fn scenario_2_call_pushes_args_in_order() {
        let steps = compile(
            "int add(int a, int b) { return a + b; } int main() { return add(1, 2); }",
        );
        assert_labels_well_formed(&steps);

        let push_values: Vec<_> = steps
            .iter()
            .filter_map(|s| match s {
                Step::PushArg(v) => Some(*v),
                _ => None,
            })
            .collect();
        assert_eq!(push_values, vec![Value::Int(1), Value::Int(2)]);

        assert!(steps.iter().any(|s| matches!(
            s,
            Step::Assign {
                op: AssignOp::Call(name),
                ..
            } if name.as_str() == "add"
        )));

        // Two function segments: one Label/Return pair each.
        assert_eq!(function_label_and_return_counts(&steps, "add"), (1, 1));
        assert_eq!(function_label_and_return_counts(&steps, "main"), (1, 1));
    }

    #[test]
    fn scenario_3_if_else_structure() {
        let steps =
            compile("int main() { if (1 == 1) { return 1; } else { return 0; } }");
        assert_labels_well_formed(&steps);

        let jump_if_count = steps
            .iter()
            .filter(|s| matches!(s, Step::JumpIf { .. }))
            .count();
        assert_eq!(jump_if_count, 1);
        // One unconditional jump from the if's own then/else join, plus one
        // from each branch's `return` jumping to the function's exit label.
        let unconditional_jumps = steps.iter().filter(|s| matches!(s, Step::Jump(_))).count();
        assert_eq!(unconditional_jumps, 3);
    }

    #[test]
    fn scenario_4_short_circuit_and() {
        let steps = compile("int main() { int x = 1 && 0; return x; }");
        assert_labels_well_formed(&steps);

        let jump_if_count = steps.iter().filter(|s| matches!(s, Step::JumpIf { .. })).count();
        assert_eq!(jump_if_count, 2, "&& emits one inverse-jump per operand");
        let jump_count = steps.iter().filter(|s| matches!(s, Step::Jump(_))).count();
        assert_eq!(jump_count, 1, "&& emits one jump past the falsy path");
    }

    #[test]
    fn short_circuit_or_labels_are_all_referenced() {
        let steps = compile("int main() { int x = 1 || 0; return x; }");
        assert_labels_well_formed(&steps);

        let jump_if_count = steps.iter().filter(|s| matches!(s, Step::JumpIf { .. })).count();
        assert_eq!(jump_if_count, 2, "|| emits one normal-jump per operand");
    }

    #[test]
    fn registers_reset_across_functions() {
        // Both functions only ever need one register (`A`) for their
        // single local; if the reset didn't happen, `g`'s `x` would be
        // forced into a synthetic temporary instead of reusing `A`.
        let steps = compile(
            "int f() { int x = 1; return x; } int g() { int x = 2; return x; }",
        );
        let first_dest = steps.iter().find_map(|s| match s {
            Step::Assign { dest, op: AssignOp::Nop, .. } => Some(*dest),
            _ => None,
        });
        assert_eq!(first_dest, Some(Addr::A));

        // After `f`'s segment, the count of `Assign(.., NOP, ..)` into `A`
        // should be 2 (one per function) if the register pool was reset.
        let a_nop_assigns = steps
            .iter()
            .filter(|s| {
                matches!(
                    s,
                    Step::Assign {
                        dest: Addr::A,
                        op: AssignOp::Nop,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(a_nop_assigns, 2);
    }

    #[test]
    fn return_transfers_value_to_ret_register() {
        let steps = compile("int main() { return 7; }");
        assert!(steps.iter().any(|s| matches!(
            s,
            Step::Assign {
                dest: Addr::Ret,
                op: AssignOp::Nop,
                ..
            }
        )));
    }

    #[test]
    fn void_function_return_transfers_nothing() {
        let steps = compile("void f() { } void g() { return f(); }");
        let ret_writes = steps
            .iter()
            .filter(|s| matches!(s, Step::Assign { dest: Addr::Ret, .. }))
            .count();
        assert_eq!(ret_writes, 0);
    }

    #[test]
    fn call_argument_literal_is_pushed_without_a_temporary() {
        let steps = compile("void f(int a) { } int main() { f(5); return 0; }");
        // A bare literal argument should produce exactly one PushArg with
        // the literal value and no LoadConst feeding it.
        let push = steps
            .iter()
            .filter_map(|s| match s {
                Step::PushArg(v) => Some(*v),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(push, vec![Value::Int(5)]);
    }

    #[test]
    fn constant_global_is_addressed_by_name() {
        let steps = compile("int g = 42; int main() { return g; }");
        assert!(steps.iter().any(|s| matches!(
            s,
            Step::Assign { dest: Addr::Global(name), op: AssignOp::Nop, .. }
                if name.as_str() == "g"
        )));
        // Reading `g` inside `main` loads its global address as a value.
        assert!(steps.iter().any(|s| matches!(
            s,
            Step::LoadConst { value: Value::Addr(Addr::Global(name)), .. }
                if name.as_str() == "g"
        )));
    }

    #[test]
    fn if_without_else_emits_no_extra_unconditional_jump() {
        let steps = compile("int main() { int x = 0; if (1 == 1) { x = 1; } return x; }");
        assert_labels_well_formed(&steps);
        // The only `Jump` in this program is `return`'s jump to the exit
        // label; an else-less `if` doesn't need one of its own.
        let jump_count = steps.iter().filter(|s| matches!(s, Step::Jump(_))).count();
        assert_eq!(jump_count, 1);
    }
}
