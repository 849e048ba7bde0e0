//! Core lexer implementation: cursor-driven dispatch over one token at a time.

use tacc_util::Span;

use crate::cursor::Cursor;
use crate::token::{classify_operator, Token, TokenKind, OPERATOR_ALPHABET};

/// Streaming tokeniser over an in-memory source string.
///
/// `Lexer` is restartable via [`Lexer::use_source`] and exposes [`Lexer::next`]
/// as its sole production rule: one token per call, or `None` at end of
/// input. It performs no backtracking; the parser's one-token lookahead is
/// built entirely out of repeated calls to `next`.
pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Creates a lexer over `source`, stamping every token's span with
    /// `file_id` instead of the dummy one: callers compiling more than
    /// one file can disambiguate spans this way, even though this crate
    /// only ever lexes one file per call.
    pub fn with_file_id(source: &'a str, file_id: tacc_util::FileId) -> Self {
        Self {
            cursor: Cursor::with_file_id(source, file_id),
        }
    }

    /// Restarts this lexer over a new source string, resetting position and
    /// line/column tracking but keeping its current file id.
    pub fn use_source(&mut self, source: &'a str) {
        self.cursor = Cursor::with_file_id(source, self.cursor.file_id());
    }

    pub(super) fn at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    pub(super) fn make_span(&self, line: u32, column: u32) -> Span {
        Span::point_with_file(self.cursor.file_id(), line, column)
    }

    /// Returns the next token, or `None` at end of input.
    ///
    /// Recognition order follows the lexer's component design exactly:
    /// single-character punctuation, `//` comments, character literals,
    /// whitespace runs, word runs (keyword/typename/identifier), numeric
    /// runs, operator-alphabet runs, then a single-character fallback.
    pub fn next(&mut self) -> Option<Token> {
        if self.at_end() {
            return None;
        }

        let line = self.cursor.line();
        let column = self.cursor.column();
        let c = self.cursor.current_char();

        macro_rules! single {
            ($kind:expr) => {{
                let start = self.cursor.position();
                self.cursor.advance();
                let lexeme = self.cursor.slice_from(start).to_string();
                Some(Token::new(lexeme, self.make_span(line, column), $kind))
            }};
        }

        match c {
            ',' => single!(TokenKind::Comma),
            ';' => single!(TokenKind::Semicolon),
            '(' => single!(TokenKind::ParenOpen),
            ')' => single!(TokenKind::ParenClose),
            '{' => single!(TokenKind::BraceOpen),
            '}' => single!(TokenKind::BraceClose),
            '/' if self.cursor.peek_char(1) == '/' => Some(self.lex_comment(line, column)),
            '\'' => Some(self.lex_char(line, column)),
            _ if c.is_whitespace() => Some(self.lex_whitespace(line, column)),
            _ if is_word_start(c) => Some(self.lex_word(line, column)),
            _ if c.is_ascii_digit() => Some(self.lex_number(line, column)),
            _ if OPERATOR_ALPHABET.contains(c) => Some(self.lex_operator(line, column)),
            _ => {
                let start = self.cursor.position();
                self.cursor.advance();
                let lexeme = self.cursor.slice_from(start).to_string();
                Some(Token::new(lexeme, self.make_span(line, column), TokenKind::Unknown))
            }
        }
    }

    fn lex_whitespace(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.position();
        while !self.at_end() && self.cursor.current_char().is_whitespace() {
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice_from(start).to_string();
        Token::new(lexeme, self.make_span(line, column), TokenKind::Whitespace)
    }

    fn lex_comment(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.position();
        self.cursor.advance_n(2); // skip "//"
        while !self.at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice_from(start).to_string();
        Token::new(lexeme, self.make_span(line, column), TokenKind::LineComment)
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

// `lex_char`, `lex_word`, `lex_number`, `lex_operator` are defined as
// additional `impl Lexer` blocks in their own sibling modules.
