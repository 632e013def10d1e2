use crate::{
    error::SyntaxError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

/// Most parameters a function may declare, and most arguments a call may pass.
pub const MAX_ARITY: usize = 255;

impl Parser<'_> {
    /// Parses a plain identifier and returns its name and line.
    ///
    /// # Errors
    /// Fails with `message` when the current token is not an identifier.
    pub(super) fn consume_identifier(&mut self, message: &str) -> ParseResult<(String, usize)> {
        if let Some(Token { kind: TokenKind::Identifier(name),
                            line,
                            .. }) = self.peek()
        {
            self.advance();
            return Ok((name.clone(), *line));
        }
        Err(self.error_at_current(message))
    }

    /// Parses a comma-separated list of items up to, but not including, a
    /// closing `)`.
    ///
    /// An immediately encountered `)` produces an empty list. Lists longer than
    /// [`MAX_ARITY`] are reported as errors naming `what`, but parsing continues
    /// so the rest of the list is still checked.
    ///
    /// Grammar (simplified): `list := ( item ( "," item )* )?`
    ///
    /// # Parameters
    /// - `what`: Plural noun for the error message, `"parameters"` or
    ///   `"arguments"`.
    /// - `parse_item`: Function used to parse each list element.
    pub(super) fn comma_separated<T>(&mut self,
                                     what: &str,
                                     mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>)
                                     -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.check(&TokenKind::RightParen) {
            return Ok(items);
        }

        loop {
            if items.len() >= MAX_ARITY {
                let error = self.arity_error(what);
                self.report(error);
            }
            items.push(parse_item(self)?);
            if self.match_any(&[TokenKind::Comma]).is_none() {
                break;
            }
        }
        Ok(items)
    }

    fn arity_error(&self, what: &str) -> SyntaxError {
        self.error_at_current(&format!("Cannot have more than {MAX_ARITY} {what}."))
    }
}
