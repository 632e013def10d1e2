use crate::{
    ast::{CompoundOperator, Expr, LiteralValue, Statement},
    error::{Diagnostics, SyntaxError},
    interpreter::lexer::{Token, TokenKind},
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Statement keywords the parser resynchronizes on after an error.
const SYNC_KEYWORDS: &[TokenKind] = &[TokenKind::Class,
                                      TokenKind::Fun,
                                      TokenKind::Var,
                                      TokenKind::For,
                                      TokenKind::If,
                                      TokenKind::While,
                                      TokenKind::Print,
                                      TokenKind::Return];

/// A recursive-descent parser over a finished token stream.
///
/// The parser never fails outward. Errors that make the current declaration
/// unparseable are returned as `Err` from the grammar functions, reported to
/// the [`Diagnostics`] sink by [`Parser::declaration`], and followed by
/// [`Parser::synchronize`]. Errors that leave a usable tree (too many
/// parameters, an invalid assignment target) are reported on the spot and
/// parsing carries on.
pub struct Parser<'a> {
    tokens:                    &'a [Token],
    current:                   usize,
    pub(super) function_depth: usize,
    diagnostics:               &'a mut Diagnostics,
}

/// Parses a token stream into a program.
///
/// Syntax errors end up in `diagnostics`; the returned statements are the
/// declarations that parsed cleanly.
///
/// # Example
/// ```
/// use tern::{
///     error::Diagnostics,
///     interpreter::{lexer::tokenize, parser::parse},
/// };
///
/// let mut diagnostics = Diagnostics::new();
/// let tokens = tokenize("var a = 1; print a;", &mut diagnostics);
/// let program = parse(&tokens, &mut diagnostics);
///
/// assert_eq!(program.len(), 2);
/// assert!(!diagnostics.had_error());
/// ```
pub fn parse(tokens: &[Token], diagnostics: &mut Diagnostics) -> Vec<Statement> {
    Parser::new(tokens, diagnostics).parse()
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first token.
    pub fn new(tokens: &'a [Token], diagnostics: &'a mut Diagnostics) -> Self {
        Self { tokens,
               current: 0,
               function_depth: 0,
               diagnostics }
    }

    /// Parses declarations until the token stream is exhausted.
    pub fn parse(mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        tracing::debug!(statements = statements.len(),
                        errors = self.diagnostics.errors().len(),
                        "parsed program");
        statements
    }

    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// lowest-precedence level, assignment, and recursively descends through
    /// the precedence hierarchy.
    ///
    /// Grammar: `expression := assignment`
    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// Parses assignment and compound assignment.
    ///
    /// Grammar:
    /// ```text
    ///     assignment := IDENTIFIER ( "=" | "+=" | "-=" | "*=" | "/=" ) assignment
    ///                 | IDENTIFIER ( "++" | "--" )
    ///                 | logical_or
    /// ```
    /// Assignment is right-associative. The left-hand side is parsed as an
    /// ordinary expression first; when it turns out not to be a bare variable,
    /// "Invalid assignment target." is reported without aborting, and the
    /// right-hand side stands in for the whole expression.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.logical_or()?;

        if let Some(equals) = self.match_any(&[TokenKind::Equal]) {
            let value = self.assignment()?;
            if let Expr::Variable { name, line } = &expr {
                return Ok(Expr::Assign { name:  name.clone(),
                                         value: Box::new(value),
                                         line:  *line, });
            }
            self.report(SyntaxError::at_token(equals, "Invalid assignment target."));
            return Ok(value);
        }

        if let Some(operator) = self.match_any(&[TokenKind::PlusEqual,
                                                 TokenKind::MinusEqual,
                                                 TokenKind::StarEqual,
                                                 TokenKind::SlashEqual])
        {
            let op = match operator.kind {
                TokenKind::PlusEqual => CompoundOperator::AddAssign,
                TokenKind::MinusEqual => CompoundOperator::SubAssign,
                TokenKind::StarEqual => CompoundOperator::MulAssign,
                _ => CompoundOperator::DivAssign,
            };
            let value = self.assignment()?;
            if let Expr::Variable { name, line } = &expr {
                return Ok(Expr::CompoundAssign { name: name.clone(),
                                                 op,
                                                 value: Box::new(value),
                                                 line: *line });
            }
            self.report(SyntaxError::at_token(operator, "Invalid assignment target."));
            return Ok(value);
        }

        if let Some(operator) = self.match_any(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
            let (op, step) = if operator.kind == TokenKind::PlusPlus {
                (CompoundOperator::Increment, 1.0)
            } else {
                (CompoundOperator::Decrement, -1.0)
            };
            if let Expr::Variable { name, line } = &expr {
                let value = Expr::Literal { value: LiteralValue::Number(step),
                                            line:  operator.line, };
                return Ok(Expr::CompoundAssign { name: name.clone(),
                                                 op,
                                                 value: Box::new(value),
                                                 line: *line });
            }
            self.report(SyntaxError::at_token(operator, "Invalid assignment target."));
        }

        Ok(expr)
    }

    /// Discards tokens until a likely statement boundary: just past a `;`, or
    /// just before a keyword that starts a declaration or statement.
    pub(super) fn synchronize(&mut self) {
        self.advance();

        while let Some(token) = self.peek() {
            if self.previous().is_some_and(|t| t.kind == TokenKind::Semicolon) {
                return;
            }
            if SYNC_KEYWORDS.contains(&token.kind) {
                return;
            }
            self.advance();
        }
    }

    /// Records an error that does not interrupt parsing.
    pub(super) fn report(&mut self, error: SyntaxError) {
        self.diagnostics.report(error);
    }

    /// Builds an error located at the current token, or at the end of input.
    pub(super) fn error_at_current(&self, message: &str) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::at_token(token, message),
            None => SyntaxError::at_end(self.last_line(), message),
        }
    }

    /// Returns the current token without consuming it.
    pub(super) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }

    /// Returns the most recently consumed token.
    pub(super) fn previous(&self) -> Option<&'a Token> {
        self.current.checked_sub(1).and_then(|index| self.tokens.get(index))
    }

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.current += 1;
        Some(token)
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Returns `true` if the current token has exactly this kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == *kind)
    }

    /// Consumes the current token if it is one of `kinds`.
    pub(super) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        if kinds.iter().any(|kind| self.check(kind)) {
            return self.advance();
        }
        None
    }

    /// Consumes a token of the given kind or fails with `message`.
    pub(super) fn consume(&mut self, kind: &TokenKind, message: &str) -> ParseResult<&'a Token> {
        if self.check(kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.error_at_current(message))
    }

    /// The line of the last token, used for errors at end of input.
    pub(super) fn last_line(&self) -> usize {
        self.tokens.last().map_or(1, |token| token.line)
    }
}
