use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

/// A parsing function for the next tighter precedence level.
type Level<'a> = fn(&mut Parser<'a>) -> ParseResult<Expr>;

impl<'a> Parser<'a> {
    /// Parses logical OR expressions.
    ///
    /// Grammar: `logical_or := logical_and ( "or" logical_and )*`
    pub(super) fn logical_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.logical_and()?;
        while let Some(token) = self.match_any(&[TokenKind::Or]) {
            let right = self.logical_and()?;
            left = Expr::Logical { left:  Box::new(left),
                                   op:    LogicalOperator::Or,
                                   right: Box::new(right),
                                   line:  token.line, };
        }
        Ok(left)
    }

    /// Parses logical AND expressions.
    ///
    /// Grammar: `logical_and := equality ( "and" equality )*`
    fn logical_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.equality()?;
        while let Some(token) = self.match_any(&[TokenKind::And]) {
            let right = self.equality()?;
            left = Expr::Logical { left:  Box::new(left),
                                   op:    LogicalOperator::And,
                                   right: Box::new(right),
                                   line:  token.line, };
        }
        Ok(left)
    }

    /// Grammar: `equality := comparison ( ( "==" | "!=" ) comparison )*`
    fn equality(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[BinaryOperator::Equal, BinaryOperator::NotEqual],
                              Self::comparison)
    }

    /// Grammar: `comparison := additive ( ( ">" | ">=" | "<" | "<=" ) additive )*`
    fn comparison(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[BinaryOperator::Greater,
                                BinaryOperator::GreaterEqual,
                                BinaryOperator::Less,
                                BinaryOperator::LessEqual],
                              Self::additive)
    }

    /// Parses addition, subtraction and stringifying concatenation.
    ///
    /// Grammar: `additive := multiplicative ( ( "+" | "-" | "+." ) multiplicative )*`
    fn additive(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[BinaryOperator::Sub, BinaryOperator::Add, BinaryOperator::Concat],
                              Self::multiplicative)
    }

    /// Parses multiplication-level expressions.
    ///
    /// `**` is accepted here as well as at its own exponent level, so a chain
    /// such as `2 ** 3 ** 2` groups to the left like every other product.
    ///
    /// Grammar: `multiplicative := exponent ( ( "*" | "/" | "%" | "**" ) exponent )*`
    fn multiplicative(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[BinaryOperator::Div,
                                BinaryOperator::Mul,
                                BinaryOperator::Pow,
                                BinaryOperator::Mod],
                              Self::exponent)
    }

    /// Grammar: `exponent := unary ( "**" unary )*`
    fn exponent(&mut self) -> ParseResult<Expr> {
        self.left_associative(&[BinaryOperator::Pow], Self::unary)
    }

    /// Parses one left-associative level: `next ( op next )*` for any `op` in
    /// `operators`.
    fn left_associative(&mut self,
                        operators: &[BinaryOperator],
                        next: Level<'a>)
                        -> ParseResult<Expr> {
        let mut left = next(self)?;
        loop {
            if let Some(token) = self.peek()
               && let Some(op) = token_to_binary_operator(&token.kind)
               && operators.contains(&op)
            {
                self.advance();
                let right = next(self)?;
                left = Expr::Binary { left: Box::new(left),
                                      op,
                                      right: Box::new(right),
                                      line: token.line };
                continue;
            }
            break;
        }
        Ok(left)
    }
}

/// Converts a token into a `BinaryOperator`, if it represents one.
///
/// # Returns
/// - `Some(BinaryOperator)` if the token is a strict binary operator.
/// - `None` otherwise.
#[must_use]
pub const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::PlusDot => Some(BinaryOperator::Concat),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::StarStar => Some(BinaryOperator::Pow),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}
