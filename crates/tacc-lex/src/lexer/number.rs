//! Numeric literal lexing.

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes a numeric run into a `LITERAL_INT` token.
    ///
    /// An embedded `.` is legal in the run (it is simply part of the
    /// "numeric" character class here) but does not change the resulting
    /// kind: the language has no floating-point literals, so `1.5` lexes as
    /// a single `LITERAL_INT` token with lexeme `"1.5"` rather than being
    /// rejected or split. Downstream passes that need an integer value parse
    /// the lexeme themselves and may reject embedded dots at that point.
    pub(crate) fn lex_number(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.position();

        while !self.at_end() {
            let c = self.cursor.current_char();
            if !(c.is_ascii_digit() || c == '.') {
                break;
            }
            self.cursor.advance();
        }

        let lexeme = self.cursor.slice_from(start).to_string();
        Token::new(lexeme, self.make_span(line, column), TokenKind::LiteralInt)
    }
}
