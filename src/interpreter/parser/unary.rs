use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
    util::stack::ensure_sufficient_stack,
};

impl Parser<'_> {
    /// Parses a unary expression.
    ///
    /// Prefix operators nest, so `!!x` and `--x` (written `- -x`) are valid.
    ///
    /// Grammar: `unary := ( "!" | "-" ) unary | call`
    pub(super) fn unary(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.unary_inner())
    }

    fn unary_inner(&mut self) -> ParseResult<Expr> {
        if let Some(token) = self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = if token.kind == TokenKind::Bang {
                UnaryOperator::Not
            } else {
                UnaryOperator::Negate
            };
            let operand = self.unary()?;
            return Ok(Expr::Unary { op,
                                    operand: Box::new(operand),
                                    line: token.line });
        }

        self.call()
    }

    /// Parses a primary expression followed by any number of call suffixes.
    ///
    /// Grammar: `call := primary ( "(" arguments? ")" )*`
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        while self.match_any(&[TokenKind::LeftParen]).is_some() {
            expr = self.finish_call(expr)?;
        }
        Ok(expr)
    }

    /// Parses the argument list of a call whose `(` was just consumed.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let arguments = self.comma_separated("arguments", Self::expression)?;
        let paren = self.consume(&TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call { callee: Box::new(callee),
                        arguments,
                        line: paren.line })
    }

    /// Parses a primary expression.
    ///
    /// Grammar:
    /// ```text
    ///     primary := NUMBER | STRING | "true" | "false" | "nil"
    ///              | IDENTIFIER
    ///              | "(" expression ")"
    /// ```
    ///
    /// # Errors
    /// Fails with "Expect expression." on any other token or at end of input.
    fn primary(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.peek() else {
            return Err(self.error_at_current("Expect expression."));
        };
        let line = token.line;

        let value = match &token.kind {
            TokenKind::False => LiteralValue::Bool(false),
            TokenKind::True => LiteralValue::Bool(true),
            TokenKind::Nil => LiteralValue::Nil,
            TokenKind::Number(n) => LiteralValue::Number(*n),
            TokenKind::String(s) => LiteralValue::from(s.as_str()),
            TokenKind::Identifier(name) => {
                self.advance();
                return Ok(Expr::Variable { name: name.clone(),
                                           line });
            },
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(&TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::Grouping { expr: Box::new(expr),
                                           line });
            },
            _ => return Err(self.error_at_current("Expect expression.")),
        };

        self.advance();
        Ok(Expr::Literal { value, line })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, Expr, LiteralValue, Statement},
        error::Diagnostics,
        interpreter::{lexer::tokenize, parser::parse},
    };

    fn parse_expression(source: &str) -> Expr {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(&format!("{source};"), &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        assert!(!diagnostics.had_error(), "{:?}", diagnostics.errors());
        match program.first() {
            Some(Statement::Expression { expr, .. }) => expr.clone(),
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    fn number(value: f64) -> Box<Expr> {
        Box::new(Expr::Literal { value: LiteralValue::Number(value),
                                 line:  1, })
    }

    #[test]
    fn power_groups_to_the_left() {
        let expr = parse_expression("2 ** 3 ** 2");
        let inner = Expr::Binary { left:  number(2.0),
                                   op:    BinaryOperator::Pow,
                                   right: number(3.0),
                                   line:  1, };
        assert_eq!(expr,
                   Expr::Binary { left:  Box::new(inner),
                                  op:    BinaryOperator::Pow,
                                  right: number(2.0),
                                  line:  1, });
    }

    #[test]
    fn power_binds_tighter_than_product() {
        let expr = parse_expression("2 * 3 ** 2");
        let Expr::Binary { op, right, .. } = &expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(*op, BinaryOperator::Mul);
        assert!(matches!(**right, Expr::Binary { op: BinaryOperator::Pow, .. }));
    }

    #[test]
    fn calls_chain() {
        let expr = parse_expression("f(1)(2, 3)");
        let Expr::Call { callee, arguments, .. } = &expr else {
            panic!("expected a call");
        };
        assert_eq!(arguments.len(), 2);
        assert!(matches!(**callee, Expr::Call { .. }));
    }
}
