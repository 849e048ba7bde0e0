//! Recursive-descent parser over [`tacc_lex`]'s token stream.
//!
//! The parser is pure LL(1): it keeps a single current token plus a
//! remembered previous one (`curr`/`prev`), and performs the
//! identifier-vs-assignment disambiguation in [`expr`] without ever
//! rewinding the lexer — the whole token stream is collected up front, so
//! "rewind" is just moving `pos` back, but the grammar is written to never
//! need to.

pub mod ast;
#[cfg(test)]
mod edge_cases;
pub mod expr;
pub mod items;
pub mod stmt;

pub use ast::{Ast, DataType, Expr, LiteralData, OpArity, OpType, Param, Stmt};

use tacc_lex::{Lexer, Token, TokenKind};
use tacc_util::diagnostic::{DiagnosticCode, Handler};
use tacc_util::Span;

/// Sentinel error: the failing production has already reported its
/// diagnostic through the [`Handler`], so this carries no payload.
#[derive(Debug, thiserror::Error)]
#[error("parse error")]
pub struct ParseError;

pub type PResult<T> = Result<T, ParseError>;

/// Non-semantic parser knobs. Currently empty; room to grow per the
/// workspace's options-struct convention.
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {}

/// Recursive-descent parser over a pre-lexed, trivia-filtered token stream.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    prev: Option<Token>,
    error_count: usize,
    handler: &'a Handler,
    #[allow(dead_code)]
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source: &str, handler: &'a Handler) -> Self {
        Self::with_options(source, handler, ParserOptions::default())
    }

    /// Creates a parser over `source`, stamping every token/AST span with
    /// `file_id` instead of the dummy one.
    pub fn with_file_id(source: &str, file_id: tacc_util::FileId, handler: &'a Handler) -> Self {
        Self {
            tokens: lex_non_trivia_with_file_id(source, file_id),
            pos: 0,
            prev: None,
            error_count: 0,
            handler,
            options: ParserOptions::default(),
        }
    }

    pub fn with_options(source: &str, handler: &'a Handler, options: ParserOptions) -> Self {
        Self {
            tokens: lex_non_trivia(source),
            pos: 0,
            prev: None,
            error_count: 0,
            handler,
            options,
        }
    }

    /// Restarts this parser over a new source string.
    pub fn use_source(&mut self, source: &str) {
        self.tokens = lex_non_trivia(source);
        self.pos = 0;
        self.prev = None;
        self.error_count = 0;
    }

    /// Parses every top-level declaration, resynchronising at the next
    /// plausible declaration start after an error instead of stopping at
    /// the first one.
    pub fn parse_all(&mut self) -> (bool, Ast) {
        let mut stmts = Vec::new();

        while !self.at_end() {
            match self.parse_declaration() {
                Ok(stmt) => stmts.push(stmt),
                Err(_) => self.synchronize(),
            }
        }

        (self.error_count == 0, stmts)
    }

    /// Skips tokens until the next typename keyword (a plausible
    /// declaration start) or end of input.
    fn synchronize(&mut self) {
        while !self.at_end() {
            if self.current().map(|t| t.kind.is_typename()).unwrap_or(false) {
                return;
            }
            self.bump();
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_span(&self) -> Span {
        self.current()
            .or(self.prev.as_ref())
            .map(|t| t.span)
            .unwrap_or(Span::DUMMY)
    }

    fn check(&self, kinds: &[TokenKind]) -> bool {
        if kinds.is_empty() {
            return true;
        }
        match self.current() {
            Some(t) => kinds.contains(&t.kind),
            None => false,
        }
    }

    fn bump(&mut self) {
        self.prev = self.current().cloned();
        if !self.at_end() {
            self.pos += 1;
        }
    }

    /// Consumes the current token if it matches one of `kinds` (an empty
    /// slice matches unconditionally). Reports a parse error otherwise.
    fn consume(&mut self, kinds: &[TokenKind]) -> PResult<()> {
        if self.check(kinds) {
            self.bump();
            return Ok(());
        }

        if self.check(&[TokenKind::Unknown]) {
            return self.error("invalid token");
        }
        self.error("unexpected token")
    }

    fn error<T>(&mut self, message: &str) -> PResult<T> {
        self.error_count += 1;

        let span = self.current_span();
        let lexeme = self.current().map(|t| t.lexeme.as_str()).unwrap_or("");

        eprintln!("Parse Error at ({},{}) with \"{}\": {}", span.line, span.column, lexeme, message);

        self.handler
            .build_error(span, message.to_string())
            .code(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN)
            .emit(self.handler);

        Err(ParseError)
    }
}

fn lex_non_trivia(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    collect_non_trivia(&mut lexer)
}

fn lex_non_trivia_with_file_id(source: &str, file_id: tacc_util::FileId) -> Vec<Token> {
    let mut lexer = Lexer::with_file_id(source, file_id);
    collect_non_trivia(&mut lexer)
}

fn collect_non_trivia(lexer: &mut Lexer) -> Vec<Token> {
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        if !token.kind.is_trivia() {
            tokens.push(token);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (bool, Ast) {
        let handler = Handler::new();
        let mut parser = Parser::new(source, &handler);
        parser.parse_all()
    }

    #[test]
    fn empty_program() {
        let (ok, stmts) = parse("");
        assert!(ok);
        assert!(stmts.is_empty());
    }

    #[test]
    fn single_variable_declaration() {
        let (ok, stmts) = parse("int x = 1;");
        assert!(ok);
        assert_eq!(stmts.len(), 1);
        assert!(stmts[0].is_declaration());
    }

    #[test]
    fn malformed_declaration_reports_and_resynchronises() {
        let (ok, stmts) = parse("int = 1; int y = 2;");
        assert!(!ok);
        // Recovery should still pick up the second, well-formed declaration.
        assert_eq!(stmts.len(), 1);
    }
}
