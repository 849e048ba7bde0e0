//! Edge case tests for the semantic analyser.

#[cfg(test)]
mod tests {
    use crate::analyzer::{SemanticAnalyzer, SemanticError};
    use crate::symbol_table::SemanticsTable;
    use tacc_par::Parser;
    use tacc_util::diagnostic::Handler;

    fn errors_for(source: &str) -> Vec<SemanticError> {
        let parse_handler = Handler::new();
        let mut parser = Parser::new(source, &parse_handler);
        let (ok, ast) = parser.parse_all();
        assert!(ok, "source failed to parse: {source}");

        let handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.analyze(&ast);
        // `analyze` consumes `self`; re-run to collect errors via a fresh
        // analyzer since the table alone doesn't carry them.
        let handler = Handler::new();
        let mut analyzer = SemanticAnalyzer::new(&handler);
        for stmt in &ast {
            analyzer.analyze_top_level_pub(stmt);
        }
        analyzer.errors().to_vec()
    }

    fn table_for(source: &str) -> SemanticsTable {
        let parse_handler = Handler::new();
        let mut parser = Parser::new(source, &parse_handler);
        let (ok, ast) = parser.parse_all();
        assert!(ok, "source failed to parse: {source}");

        let handler = Handler::new();
        let analyzer = SemanticAnalyzer::new(&handler);
        analyzer.analyze(&ast)
    }

    #[test]
    fn empty_program_has_no_errors() {
        assert!(errors_for("").is_empty());
    }

    #[test]
    fn global_variable_declaration_is_legal() {
        assert!(errors_for("int g = 1;").is_empty());
    }

    #[test]
    fn nested_if_else_shares_function_scope() {
        let source = "int main() { int x = 1; if (x == 1) { int y = 2; return y; } else { return x; } }";
        assert!(errors_for(source).is_empty());
    }

    #[test]
    fn two_functions_do_not_see_each_others_locals() {
        let source = "int f() { int x = 1; return x; } int g() { return x; }";
        assert!(!errors_for(source).is_empty());
    }

    #[test]
    fn function_can_call_itself() {
        let source = "int f(int n) { return f(n); }";
        assert!(errors_for(source).is_empty());
    }

    #[test]
    fn unary_neg_on_char_is_illegal() {
        let source = "int main() { char c = 'a'; int x = -c; return x; }";
        assert!(!errors_for(source).is_empty());
    }

    #[test]
    fn comparison_result_feeds_short_circuit_and() {
        let source = "int main() { int a = 1; int b = 2; int c = (a < b) && (b < 3); return c; }";
        assert!(errors_for(source).is_empty());
    }

    #[test]
    fn function_params_are_visible_in_body() {
        let table = table_for("int add(int a, int b) { return a + b; }");
        let scope = table.get(&tacc_util::Symbol::intern("add")).unwrap();
        assert!(scope.contains_key(&tacc_util::Symbol::intern("a")));
        assert!(scope.contains_key(&tacc_util::Symbol::intern("b")));
    }
}
