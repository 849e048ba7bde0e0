//! Statement grammar: blocks, `if`/`else`, `return`, nested variable
//! declarations, and bare expression statements.

use tacc_lex::TokenKind;

use crate::ast::Stmt;
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    /// `block := '{' nested_stmt* '}'`.
    pub fn parse_block(&mut self) -> PResult<Stmt> {
        let open_span = self.current_span();
        self.consume(&[TokenKind::BraceOpen])?;

        let mut stmts = Vec::new();

        loop {
            if self.at_end() {
                return self.error("missing closing brace for block");
            }
            if self.check(&[TokenKind::BraceClose]) {
                break;
            }
            stmts.push(self.parse_nested_stmt()?);
        }

        let close_span = self.current_span();
        self.consume(&[TokenKind::BraceClose])?;

        Ok(Stmt::Block { stmts, span: open_span.merge(close_span) })
    }

    /// `nested_stmt := if | return | vardecl | expr_stmt`, dispatching on the
    /// keyword lexeme for `if`/`return` and on a leading typename token for a
    /// nested variable declaration.
    fn parse_nested_stmt(&mut self) -> PResult<Stmt> {
        if self.check(&[TokenKind::Keyword]) {
            let lexeme = self.current().map(|t| t.lexeme.as_str()).unwrap_or("");
            match lexeme {
                "if" => return self.parse_if(),
                "return" => return self.parse_return(),
                _ => {}
            }
        }

        if self.check(&[TokenKind::TypenameVoid, TokenKind::TypenameChar, TokenKind::TypenameInt]) {
            return self.parse_nested_variable();
        }

        self.parse_expr_stmt()
    }

    fn parse_expr_stmt(&mut self) -> PResult<Stmt> {
        let inner = self.parse_expr()?;
        let span = inner.span().merge(self.current_span());
        self.consume(&[TokenKind::Semicolon])?;
        Ok(Stmt::ExprStmt { inner, span })
    }

    /// `if := 'if' '(' expr ')' block ( 'else' block )?`.
    fn parse_if(&mut self) -> PResult<Stmt> {
        let if_span = self.current_span();
        self.bump(); // 'if'

        self.consume(&[TokenKind::ParenOpen])?;
        let condition = self.parse_expr()?;
        self.consume(&[TokenKind::ParenClose])?;

        let then_block = self.parse_block()?;

        let else_block = if self.check(&[TokenKind::Keyword])
            && self.current().map(|t| t.lexeme.as_str()) == Some("else")
        {
            self.bump(); // 'else'
            Some(Box::new(self.parse_block()?))
        } else {
            None
        };

        let span = if_span.merge(else_block.as_ref().map(|b| b.span()).unwrap_or(then_block.span()));

        Ok(Stmt::If { condition, then_block: Box::new(then_block), else_block, span })
    }

    /// `return := 'return' expr ';'`.
    fn parse_return(&mut self) -> PResult<Stmt> {
        let return_span = self.current_span();
        self.bump(); // 'return'

        let result = self.parse_expr()?;
        let span = return_span.merge(self.current_span());
        self.consume(&[TokenKind::Semicolon])?;

        Ok(Stmt::Return { result, span })
    }

    /// A variable declaration appearing inside a block body. Unlike the
    /// top-level form, the initialiser is the only option here — there's no
    /// function-declaration alternative once we're already inside a body.
    fn parse_nested_variable(&mut self) -> PResult<Stmt> {
        let start_span = self.current_span();
        let data_type = self.parse_typename()?;

        let name_token = self.current().cloned();
        self.consume(&[TokenKind::Identifier])?;
        let name_token = name_token.ok_or(crate::ParseError)?;

        self.consume(&[TokenKind::OpAssign])?;
        let rhs = self.parse_expr()?;
        let span = start_span.merge(self.current_span());
        self.consume(&[TokenKind::Semicolon])?;

        Ok(Stmt::VariableDecl {
            name: tacc_util::Symbol::intern(&name_token.lexeme),
            data_type,
            rhs,
            span,
        })
    }
}
