use crate::{
    ast::Statement,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses the declarations of a block after its opening `{`.
    ///
    /// Consumes declarations until a closing `}` and then the brace itself.
    /// Declarations that fail to parse are reported and skipped, so one bad
    /// line inside a function body does not hide errors further down.
    ///
    /// Grammar: `block := "{" declaration* "}"`
    ///
    /// # Errors
    /// Returns an error if the input ends before the closing `}`.
    pub(super) fn block(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        self.consume(&TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }
}
