//! Operator lexing.
//!
//! Punctuation (`, ; ( ) { }`) is handled directly in `core`'s single-token
//! dispatch; this module handles the rest of the operator table, greedily
//! consuming a run of [`OPERATOR_ALPHABET`] characters and looking the whole
//! lexeme up at once.

use crate::lexer::core::Lexer;
use crate::token::{classify_operator, Token, TokenKind, OPERATOR_ALPHABET};

impl<'a> Lexer<'a> {
    /// Greedily consumes a run of operator-alphabet characters and looks the
    /// resulting lexeme up in the operator table. An unrecognised
    /// combination (e.g. `+-` or `===`) yields `Unknown`, to be rejected by
    /// the parser.
    pub(crate) fn lex_operator(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.position();

        while !self.at_end() && OPERATOR_ALPHABET.contains(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let lexeme = self.cursor.slice_from(start).to_string();
        let kind = classify_operator(&lexeme).unwrap_or(TokenKind::Unknown);
        Token::new(lexeme, self.make_span(line, column), kind)
    }
}
