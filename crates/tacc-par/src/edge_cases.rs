//! Edge case tests for the parser.

#[cfg(test)]
mod tests {
    use crate::{Ast, Parser};
    use tacc_util::diagnostic::Handler;

    fn parse_source(source: &str) -> (bool, Ast) {
        let handler = Handler::new();
        let mut parser = Parser::new(source, &handler);
        parser.parse_all()
    }

    #[test]
    fn empty_source() {
        let (ok, ast) = parse_source("");
        assert!(ok);
        assert!(ast.is_empty());
    }

    #[test]
    fn whitespace_only() {
        let (ok, ast) = parse_source("   \n\t  \n  ");
        assert!(ok);
        assert!(ast.is_empty());
    }

    #[test]
    fn comment_only() {
        let (ok, ast) = parse_source("// just a comment\n");
        assert!(ok);
        assert!(ast.is_empty());
    }

    #[test]
    fn single_function_no_body_statements() {
        let (ok, ast) = parse_source("void f() {}");
        assert!(ok);
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn deeply_nested_parentheses() {
        let (ok, ast) = parse_source("int x = ((((1))));");
        assert!(ok);
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn deeply_nested_unary_negation() {
        let (ok, ast) = parse_source("int x = -----1;");
        assert!(ok);
    }

    #[test]
    fn chained_comparisons_are_left_associative() {
        // `(a < b) < c` is ((a < b) < c), not a genuine chained comparison.
        let (ok, _ast) = parse_source("int x = (a < b) < c;");
        assert!(ok);
    }

    #[test]
    fn nested_function_calls() {
        let (ok, ast) = parse_source("int x = f(g(h(1)));");
        assert!(ok);
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn empty_argument_list() {
        let (ok, ast) = parse_source("int x = f();");
        assert!(ok);
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn multiple_top_level_declarations() {
        let (ok, ast) = parse_source("int a = 1; int b = 2; int c = a + b;");
        assert!(ok);
        assert_eq!(ast.len(), 3);
    }

    #[test]
    fn function_with_multiple_statements() {
        let source = r#"
            int compute(int n) {
                int total = 0;
                if (n < 1) {
                    return 0;
                }
                total = total + n;
                return total;
            }
        "#;
        let (ok, ast) = parse_source(source);
        assert!(ok);
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn unterminated_block_is_reported() {
        let (ok, _ast) = parse_source("void f() { int x = 1;");
        assert!(!ok);
    }

    #[test]
    fn missing_semicolon_is_reported_and_does_not_panic() {
        let (ok, _ast) = parse_source("int x = 1 int y = 2;");
        assert!(!ok);
    }

    #[test]
    fn unknown_character_is_reported() {
        let (ok, _ast) = parse_source("int x = @;");
        assert!(!ok);
    }

    #[test]
    fn recovers_across_multiple_malformed_declarations() {
        let source = "int = 1; char = 2; int z = 3;";
        let (ok, ast) = parse_source(source);
        assert!(!ok);
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn with_file_id_stamps_every_span() {
        let handler = Handler::new();
        let file_id = tacc_util::FileId(7);
        let mut parser = Parser::with_file_id("int x = 1;", file_id, &handler);
        let (ok, ast) = parser.parse_all();
        assert!(ok);
        assert_eq!(ast[0].span().file_id, file_id);
    }
}
