//! Lexical analysis for the compiler front-end.
//!
//! Tokenises source text one token at a time with no backtracking: the
//! [`lexer::Lexer`] keeps no state beyond a [`cursor::Cursor`] position, so a
//! caller that needs lookahead (the parser) gets it purely by calling
//! [`lexer::Lexer::next`] repeatedly and buffering what it's already seen.
//! Whitespace and `//` comments are real [`token::Token`]s, not swallowed by
//! the lexer, so position tracking stays decoupled from whichever consumer
//! decides to skip trivia.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
