//! Expression grammar: `expr := assign | or`, descending through the usual
//! precedence ladder down to `primary`.
//!
//! Precedence (tight → loose): unary `-`, `* /`, `+ -`, `< <= > >=`,
//! `== !=`, `&&`, `||`, `=`. All binary operators are left-associative;
//! `=` is right-associative and only appears at the outermost position (no
//! chained assignment).

use tacc_lex::TokenKind;
use tacc_util::Symbol;

use crate::ast::{DataType, Expr, LiteralData, OpType};
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    /// `expr := assign | or`.
    ///
    /// On entering `expr`, if the current token is an identifier, peek one
    /// token ahead: a following `=` means this is an assignment target, so
    /// consume name and `=` and recurse for the rhs. Otherwise fall through
    /// to `or` — nothing was consumed yet, so `primary`'s own identifier
    /// branch picks the same token back up. This is the buffer-the-token
    /// approach the design calls for in place of lexer rewind.
    pub fn parse_expr(&mut self) -> PResult<Expr> {
        if self.check(&[TokenKind::Identifier]) {
            let is_assign = self
                .peek_next_kind()
                .map(|k| k == TokenKind::OpAssign)
                .unwrap_or(false);

            if is_assign {
                let name_token = self.current().cloned().expect("checked Identifier above");
                self.bump(); // identifier
                self.bump(); // '='
                let rhs = self.parse_expr()?;
                let span = name_token.span.merge(rhs.span());
                let name = Symbol::intern(&name_token.lexeme);
                return Ok(Expr::Binary {
                    lhs: Box::new(Expr::Literal {
                        data: LiteralData::Name(name),
                        data_type: DataType::Unknown,
                        span: name_token.span,
                    }),
                    rhs: Box::new(rhs),
                    op: OpType::Assign,
                    span,
                });
            }
        }

        self.parse_or()
    }

    fn peek_next_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos + 1).map(|t| t.kind)
    }

    fn parse_or(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_and()?;

        while self.check(&[TokenKind::OpOr]) {
            self.bump();
            let rhs = self.parse_and()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary { lhs: Box::new(lhs), rhs: Box::new(rhs), op: OpType::Or, span };
        }

        Ok(lhs)
    }

    fn parse_and(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_eq()?;

        while self.check(&[TokenKind::OpAnd]) {
            self.bump();
            let rhs = self.parse_eq()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary { lhs: Box::new(lhs), rhs: Box::new(rhs), op: OpType::And, span };
        }

        Ok(lhs)
    }

    fn parse_eq(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_cmp()?;

        while self.check(&[TokenKind::OpEqEq, TokenKind::OpBangEq]) {
            let op = if self.check(&[TokenKind::OpEqEq]) { OpType::Eq } else { OpType::Neq };
            self.bump();
            let rhs = self.parse_cmp()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary { lhs: Box::new(lhs), rhs: Box::new(rhs), op, span };
        }

        Ok(lhs)
    }

    fn parse_cmp(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_term()?;

        while self.check(&[TokenKind::OpLt, TokenKind::OpLte, TokenKind::OpGt, TokenKind::OpGte]) {
            let op = match self.current().map(|t| t.kind) {
                Some(TokenKind::OpLt) => OpType::Lt,
                Some(TokenKind::OpLte) => OpType::Lte,
                Some(TokenKind::OpGt) => OpType::Gt,
                Some(TokenKind::OpGte) => OpType::Gte,
                _ => unreachable!("guarded by check above"),
            };
            self.bump();
            let rhs = self.parse_term()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary { lhs: Box::new(lhs), rhs: Box::new(rhs), op, span };
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_factor()?;

        while self.check(&[TokenKind::OpPlus, TokenKind::OpMinus]) {
            let op = if self.check(&[TokenKind::OpPlus]) { OpType::Add } else { OpType::Sub };
            self.bump();
            let rhs = self.parse_factor()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary { lhs: Box::new(lhs), rhs: Box::new(rhs), op, span };
        }

        Ok(lhs)
    }

    fn parse_factor(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_unary()?;

        while self.check(&[TokenKind::OpTimes, TokenKind::OpSlash]) {
            let op = if self.check(&[TokenKind::OpTimes]) { OpType::Mult } else { OpType::Div };
            self.bump();
            let rhs = self.parse_unary()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary { lhs: Box::new(lhs), rhs: Box::new(rhs), op, span };
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        if self.check(&[TokenKind::OpMinus]) {
            let minus_span = self.current_span();
            self.bump();
            let inner = self.parse_primary()?;
            let span = minus_span.merge(inner.span());
            return Ok(Expr::Unary { inner: Box::new(inner), op: OpType::Neg, span });
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        if self.check(&[TokenKind::LiteralChar]) {
            let token = self.current().cloned().expect("checked above");
            self.consume(&[])?;
            let ch = token.lexeme.chars().nth(1).unwrap_or('\0');
            return Ok(Expr::Literal { data: LiteralData::Char(ch), data_type: DataType::Char, span: token.span });
        }

        if self.check(&[TokenKind::LiteralInt]) {
            let token = self.current().cloned().expect("checked above");
            self.consume(&[])?;
            let value: i64 = token.lexeme.split('.').next().unwrap_or("0").parse().unwrap_or(0);
            return Ok(Expr::Literal { data: LiteralData::Int(value), data_type: DataType::Int, span: token.span });
        }

        if self.check(&[TokenKind::ParenOpen]) {
            self.consume(&[])?;
            let inner = self.parse_expr()?;
            self.consume(&[TokenKind::ParenClose])?;
            return Ok(inner);
        }

        if self.check(&[TokenKind::Identifier]) {
            return self.parse_call_or_name();
        }

        self.error("invalid token for expression")
    }

    fn parse_call_or_name(&mut self) -> PResult<Expr> {
        let name_token = self.current().cloned().expect("checked Identifier by caller");
        self.consume(&[])?;

        if self.check(&[TokenKind::ParenOpen]) {
            let name = Symbol::intern(&name_token.lexeme);
            let args = self.parse_args()?;
            let close_span = self.prev.as_ref().map(|t| t.span).unwrap_or(name_token.span);
            return Ok(Expr::Call { name, args, span: name_token.span.merge(close_span) });
        }

        Ok(Expr::Literal {
            data: LiteralData::Name(Symbol::intern(&name_token.lexeme)),
            data_type: DataType::Unknown,
            span: name_token.span,
        })
    }

    /// `args := [ expr ( ',' expr )* ]`.
    fn parse_args(&mut self) -> PResult<Vec<Expr>> {
        self.consume(&[TokenKind::ParenOpen])?;

        let mut args = Vec::new();

        if self.check(&[TokenKind::ParenClose]) {
            self.consume(&[])?;
            return Ok(args);
        }

        loop {
            if self.at_end() {
                return self.error("missing closing parenthesis for argument list");
            }

            args.push(self.parse_expr()?);

            if self.check(&[TokenKind::ParenClose]) {
                self.consume(&[])?;
                break;
            }
            self.consume(&[TokenKind::Comma])?;
        }

        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::OpType;
    use tacc_util::diagnostic::Handler;

    fn expr(source: &str) -> Expr {
        let handler = Handler::new();
        let mut parser = Parser::new(source, &handler);
        parser.parse_expr().expect("expression should parse")
    }

    #[test]
    fn literal_int() {
        match expr("42") {
            Expr::Literal { data: LiteralData::Int(v), data_type, .. } => {
                assert_eq!(v, 42);
                assert_eq!(data_type, DataType::Int);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn precedence_mult_over_add() {
        // 1 + 2 * 3 should parse as 1 + (2 * 3)
        match expr("1 + 2 * 3") {
            Expr::Binary { op: OpType::Add, rhs, .. } => {
                assert!(matches!(*rhs, Expr::Binary { op: OpType::Mult, .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn assignment_disambiguation() {
        match expr("x = 1") {
            Expr::Binary { op: OpType::Assign, lhs, .. } => {
                assert!(matches!(*lhs, Expr::Literal { data: LiteralData::Name(_), .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bare_identifier_is_not_an_assignment() {
        match expr("x + 1") {
            Expr::Binary { op: OpType::Add, lhs, .. } => {
                assert!(matches!(*lhs, Expr::Literal { data: LiteralData::Name(_), .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn function_call_with_args() {
        match expr("add(1, x)") {
            Expr::Call { args, .. } => assert_eq!(args.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unary_negation() {
        assert!(matches!(expr("-5"), Expr::Unary { op: OpType::Neg, .. }));
    }

    #[test]
    fn parenthesised_expression() {
        // (1 + 2) * 3 should parse as (1 + 2) * 3, not 1 + (2 * 3)
        match expr("(1 + 2) * 3") {
            Expr::Binary { op: OpType::Mult, lhs, .. } => {
                assert!(matches!(*lhs, Expr::Binary { op: OpType::Add, .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn logical_and_or_precedence() {
        // a || b && c should parse as a || (b && c)
        match expr("a || b && c") {
            Expr::Binary { op: OpType::Or, rhs, .. } => {
                assert!(matches!(*rhs, Expr::Binary { op: OpType::And, .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
