//! Top-level declaration parsing: variables and functions, plus the shared
//! typename/parameter-list helpers the rest of the parser builds on.

use tacc_lex::TokenKind;
use tacc_util::Symbol;

use crate::ast::{DataType, Param, Stmt};
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    /// `declaration := typename IDENTIFIER ( '=' expr ';' | params block )`.
    ///
    /// A top-level declaration is a variable (if followed by `=`) or a
    /// function (if followed by `(`) — any other continuation is an error.
    pub(crate) fn parse_declaration(&mut self) -> PResult<Stmt> {
        let start_span = self.current_span();
        let data_type = self.parse_typename()?;

        let name_token = self.current().cloned();
        self.consume(&[TokenKind::Identifier])?;
        let name_token = name_token.ok_or(crate::ParseError)?;
        let name = Symbol::intern(&name_token.lexeme);

        if self.check(&[TokenKind::OpAssign]) {
            self.bump();
            let rhs = self.parse_expr()?;
            let span = start_span.merge(self.current_span());
            self.consume(&[TokenKind::Semicolon])?;
            return Ok(Stmt::VariableDecl { name, data_type, rhs, span });
        }

        if self.check(&[TokenKind::ParenOpen]) {
            let params = self.parse_params()?;
            let body = self.parse_block()?;
            let span = start_span.merge(body.span());
            return Ok(Stmt::FunctionDecl { name, return_type: data_type, params, body: Box::new(body), span });
        }

        self.error("invalid token for declaration")
    }

    /// One of `void` / `char` / `int`, mapped to its [`DataType`].
    pub(crate) fn parse_typename(&mut self) -> PResult<DataType> {
        let data_type = match self.current().map(|t| t.kind) {
            Some(TokenKind::TypenameVoid) => DataType::Void,
            Some(TokenKind::TypenameChar) => DataType::Char,
            Some(TokenKind::TypenameInt) => DataType::Int,
            _ => return self.error("expected a typename"),
        };
        self.bump();
        Ok(data_type)
    }

    /// `params := '(' [ param ( ',' param )* ] ')'`, where `param := typename
    /// IDENTIFIER`. `void` is not a legal parameter type — only `char`/`int`
    /// are.
    pub(crate) fn parse_params(&mut self) -> PResult<Vec<Param>> {
        self.consume(&[TokenKind::ParenOpen])?;

        let mut params = Vec::new();

        if self.check(&[TokenKind::ParenClose]) {
            self.bump();
            return Ok(params);
        }

        loop {
            if self.at_end() {
                return self.error("missing closing parenthesis for parameter list");
            }

            let data_type = match self.current().map(|t| t.kind) {
                Some(TokenKind::TypenameChar) => DataType::Char,
                Some(TokenKind::TypenameInt) => DataType::Int,
                _ => return self.error("invalid parameter typename"),
            };
            self.bump();

            let name_token = self.current().cloned();
            self.consume(&[TokenKind::Identifier])?;
            let name_token = name_token.ok_or(crate::ParseError)?;

            params.push(Param { data_type, name: Symbol::intern(&name_token.lexeme) });

            if self.check(&[TokenKind::ParenClose]) {
                self.bump();
                break;
            }
            self.consume(&[TokenKind::Comma])?;
        }

        Ok(params)
    }
}
