//! Token / TokenKind data model.
//!
//! A [`Token`] is a lexeme paired with its source position and its
//! [`TokenKind`]. `TokenKind` is a closed enumeration matching the language's
//! fixed token set: whitespace and line comments are real token kinds (not
//! dropped by the lexer) so that position tracking stays decoupled from the
//! parser, which is the one that skips them.

use tacc_util::Span;

/// Closed set of lexical categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of whitespace characters.
    Whitespace,
    /// A `//` line comment, not including the trailing newline.
    LineComment,
    /// An identifier that isn't a keyword or typename.
    Identifier,
    /// `return`, `if`, `else`, `while`, `break`, `continue`.
    Keyword,
    /// `char`.
    TypenameChar,
    /// `int`.
    TypenameInt,
    /// `void`.
    TypenameVoid,
    /// An integer literal such as `42`.
    LiteralInt,
    /// A character literal such as `'a'`.
    LiteralChar,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `{`
    BraceOpen,
    /// `}`
    BraceClose,
    /// `=`
    OpAssign,
    /// `+`
    OpPlus,
    /// `-`
    OpMinus,
    /// `*`
    OpTimes,
    /// `/`
    OpSlash,
    /// `<`
    OpLt,
    /// `<=`
    OpLte,
    /// `>`
    OpGt,
    /// `>=`
    OpGte,
    /// `==`
    OpEqEq,
    /// `!=`
    OpBangEq,
    /// `&&`
    OpAnd,
    /// `||`
    OpOr,
    /// A lexeme that doesn't match any recognised token.
    Unknown,
}

impl TokenKind {
    /// Whitespace and line comments are skipped by the parser but still flow
    /// through the lexer as real tokens.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::LineComment)
    }

    /// True for `void` / `char` / `int`.
    pub fn is_typename(self) -> bool {
        matches!(
            self,
            TokenKind::TypenameVoid | TokenKind::TypenameChar | TokenKind::TypenameInt
        )
    }
}

/// A single lexical unit: its source text, its position, and its kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The exact source text this token covers.
    pub lexeme: String,
    /// Line/column (and byte range, when available) of the token's start.
    pub span: Span,
    /// The token's lexical category.
    pub kind: TokenKind,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, span: Span, kind: TokenKind) -> Self {
        Self {
            lexeme: lexeme.into(),
            span,
            kind,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Reserved words: `return if else while break continue`.
///
/// `while`, `break`, and `continue` are reserved but not yet parsed by any
/// grammar production.
pub const KEYWORDS: &[&str] = &["return", "if", "else", "while", "break", "continue"];

/// Classifies a word-shaped lexeme (already known to start with an alphabetic
/// character or `_`) as a keyword, a typename, or a plain identifier.
pub fn classify_word(word: &str) -> TokenKind {
    match word {
        "return" | "if" | "else" | "while" | "break" | "continue" => TokenKind::Keyword,
        "void" => TokenKind::TypenameVoid,
        "char" => TokenKind::TypenameChar,
        "int" => TokenKind::TypenameInt,
        _ => TokenKind::Identifier,
    }
}

/// Looks up a complete operator lexeme (already known to be made up entirely
/// of characters from [`OPERATOR_ALPHABET`]).
pub fn classify_operator(op: &str) -> Option<TokenKind> {
    match op {
        "=" => Some(TokenKind::OpAssign),
        "+" => Some(TokenKind::OpPlus),
        "-" => Some(TokenKind::OpMinus),
        "*" => Some(TokenKind::OpTimes),
        "/" => Some(TokenKind::OpSlash),
        "<" => Some(TokenKind::OpLt),
        "<=" => Some(TokenKind::OpLte),
        ">" => Some(TokenKind::OpGt),
        ">=" => Some(TokenKind::OpGte),
        "==" => Some(TokenKind::OpEqEq),
        "!=" => Some(TokenKind::OpBangEq),
        "&&" => Some(TokenKind::OpAnd),
        "||" => Some(TokenKind::OpOr),
        _ => None,
    }
}

/// The alphabet multi-character operator lexemes are built from.
///
/// Includes `!`, `&`, and `|` alongside the single-character arithmetic and
/// comparison operators: `!=`, `&&`, and `||` are real grammar productions
/// (`and := eq ('&&' eq)*`, etc.), so those three characters must reach
/// `lex_operator` rather than fall through to the single-character fallback.
pub const OPERATOR_ALPHABET: &str = "+-*/=<>!&|";
