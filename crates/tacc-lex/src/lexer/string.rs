//! Character-literal lexing.

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes a character literal: `'`, exactly one inner character, then a
    /// closing `'`.
    ///
    /// No escape sequences are recognised. The opening quote, the inner
    /// character, and whatever follows it are always consumed; the returned
    /// lexeme is always the full consumed slice (quotes included) so the
    /// lexer's round-trip guarantee holds even when the third position isn't
    /// a closing quote, in which case the token is `Unknown` rather than a
    /// partial literal.
    pub(crate) fn lex_char(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.position();
        self.cursor.advance(); // opening '

        if !self.at_end() {
            self.cursor.advance(); // inner character
        }

        let closing = self.cursor.current_char();
        if !self.at_end() {
            self.cursor.advance();
        }

        let lexeme = self.cursor.slice_from(start).to_string();

        if closing != '\'' {
            return Token::new(lexeme, self.make_span(line, column), TokenKind::Unknown);
        }

        Token::new(lexeme, self.make_span(line, column), TokenKind::LiteralChar)
    }
}
