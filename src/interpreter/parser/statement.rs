use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDef, LiteralValue, Statement},
    error::SyntaxError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
    util::stack::ensure_sufficient_stack,
};

impl Parser<'_> {
    /// Parses one declaration, recovering from any syntax error inside it.
    ///
    /// On failure the error is reported, tokens are skipped up to the next
    /// statement boundary, and `None` is returned so the caller moves on to the
    /// next declaration.
    ///
    /// Grammar: `declaration := fun_decl | var_decl | statement`
    pub(super) fn declaration(&mut self) -> Option<Statement> {
        let result = if self.match_any(&[TokenKind::Fun]).is_some() {
            self.function("function")
        } else if self.match_any(&[TokenKind::Var]).is_some() {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(statement) => Some(statement),
            Err(error) => {
                self.report(error);
                self.synchronize();
                None
            },
        }
    }

    /// Parses a named function after its `fun` keyword.
    ///
    /// Grammar: `fun_decl := "fun" IDENTIFIER "(" parameters? ")" block`
    ///
    /// # Parameters
    /// - `kind`: What is being declared, used in error messages.
    fn function(&mut self, kind: &str) -> ParseResult<Statement> {
        let (name, line) = self.consume_identifier(&format!("Expect {kind} name."))?;
        self.consume(&TokenKind::LeftParen, &format!("Expect '(' after {kind} name."))?;
        let params = self.comma_separated("parameters", |parser| {
                             parser.consume_identifier("Expect parameter name.")
                                   .map(|(param, _)| param)
                         })?;
        self.consume(&TokenKind::RightParen, "Expect ')' after parameters.")?;
        self.consume(&TokenKind::LeftBrace, &format!("Expect '{{' before {kind} body."))?;

        self.function_depth += 1;
        let body = self.block();
        self.function_depth -= 1;

        Ok(Statement::Function(Rc::new(FunctionDef { name,
                                                     params,
                                                     body: body?,
                                                     line })))
    }

    /// Grammar: `var_decl := "var" IDENTIFIER ( "=" expression )? ";"`
    fn var_declaration(&mut self) -> ParseResult<Statement> {
        let (name, line) = self.consume_identifier("Expect variable name.")?;

        let initializer = if self.match_any(&[TokenKind::Equal]).is_some() {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(&TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Statement::VariableDeclaration { name,
                                            initializer,
                                            line })
    }

    /// Parses a statement.
    ///
    /// Grammar:
    /// ```text
    ///     statement := for_stmt | if_stmt | print_stmt | return_stmt
    ///                | while_stmt | do_while_stmt | block | expr_stmt
    /// ```
    fn statement(&mut self) -> ParseResult<Statement> {
        ensure_sufficient_stack(|| self.statement_inner())
    }

    fn statement_inner(&mut self) -> ParseResult<Statement> {
        let Some(token) = self.peek() else {
            return Err(self.error_at_current("Expect expression."));
        };

        match token.kind {
            TokenKind::For => {
                self.advance();
                self.for_statement(token.line)
            },
            TokenKind::If => {
                self.advance();
                self.if_statement(token.line)
            },
            TokenKind::Print => {
                self.advance();
                self.print_statement(token.line, false)
            },
            TokenKind::Return => {
                self.advance();
                self.return_statement(token.line)
            },
            TokenKind::While => {
                self.advance();
                self.while_statement(token.line)
            },
            TokenKind::Do => {
                self.advance();
                self.do_while_statement(token.line)
            },
            TokenKind::LeftBrace => {
                self.advance();
                Ok(Statement::Block { statements: self.block()?,
                                      line:       token.line, })
            },
            _ => self.expression_statement(),
        }
    }

    /// Parses a `for` loop and rewrites it into a block and a `while` loop.
    ///
    /// `for (init; cond; incr) body` becomes
    /// `{ init; while (cond) { body; incr; } }`. Each clause may be omitted; a
    /// missing condition loops forever.
    ///
    /// Grammar:
    /// ```text
    ///     for_stmt := "for" "(" ( var_decl | expr_stmt | ";" )
    ///                 expression? ";" expression? ")" statement
    /// ```
    fn for_statement(&mut self, line: usize) -> ParseResult<Statement> {
        self.consume(&TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.match_any(&[TokenKind::Semicolon]).is_some() {
            None
        } else if self.match_any(&[TokenKind::Var]).is_some() {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(&TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(&TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            let increment_line = increment.line_number();
            body = Statement::Block { statements: vec![body,
                                                       Statement::Expression { expr: increment,
                                                                               line: increment_line, }],
                                      line };
        }

        let condition = condition.unwrap_or(Expr::Literal { value: LiteralValue::Bool(true),
                                                            line });
        body = Statement::While { condition,
                                  body: Box::new(body),
                                  line };

        if let Some(initializer) = initializer {
            body = Statement::Block { statements: vec![initializer, body],
                                      line };
        }

        Ok(body)
    }

    /// Grammar: `if_stmt := "if" "(" expression ")" statement ( "else" statement )?`
    ///
    /// A dangling `else` binds to the nearest `if`.
    fn if_statement(&mut self, line: usize) -> ParseResult<Statement> {
        self.consume(&TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(&TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_any(&[TokenKind::Else]).is_some() {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Statement::If { condition,
                           then_branch,
                           else_branch,
                           line })
    }

    /// Parses a `print` statement after its keyword.
    ///
    /// # Parameters
    /// - `ternary_branch`: When set, the statement may also end with the `:`
    ///   that separates the branches of a ternary.
    fn print_statement(&mut self, line: usize, ternary_branch: bool) -> ParseResult<Statement> {
        let expr = self.expression()?;
        if !(ternary_branch && self.match_any(&[TokenKind::Colon]).is_some()) {
            self.consume(&TokenKind::Semicolon, "Expect ';' after value.")?;
        }
        Ok(Statement::Print { expr, line })
    }

    /// Grammar: `return_stmt := "return" expression? ";"`
    ///
    /// A `return` outside any function body is reported but still parsed.
    fn return_statement(&mut self, line: usize) -> ParseResult<Statement> {
        if self.function_depth == 0
           && let Some(keyword) = self.previous()
        {
            self.report(SyntaxError::at_token(keyword, "Cannot return from top-level code."));
        }

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };

        self.consume(&TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Statement::Return { value, line })
    }

    /// Grammar: `while_stmt := "while" "(" expression ")" statement`
    fn while_statement(&mut self, line: usize) -> ParseResult<Statement> {
        self.consume(&TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(&TokenKind::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);

        Ok(Statement::While { condition,
                              body,
                              line })
    }

    /// Grammar: `do_while_stmt := "do" statement "while" "(" expression ")" ";"`
    fn do_while_statement(&mut self, line: usize) -> ParseResult<Statement> {
        let body = Box::new(self.statement()?);
        self.consume(&TokenKind::While, "Expected 'while' after do.")?;
        self.consume(&TokenKind::LeftParen, "Expected '(' after while.")?;
        let condition = self.expression()?;
        self.consume(&TokenKind::RightParen, "Expected ')' after condition.")?;
        self.consume(&TokenKind::Semicolon, "Expected ';' after condition.")?;

        Ok(Statement::DoWhile { body,
                                condition,
                                line })
    }

    /// Parses an expression statement, or a ternary when the expression is
    /// followed by `?`.
    ///
    /// Grammar: `expr_stmt := expression ( ";" | "?" ternary_tail )`
    fn expression_statement(&mut self) -> ParseResult<Statement> {
        let expr = self.expression()?;
        let line = expr.line_number();

        if self.match_any(&[TokenKind::Question]).is_some() {
            return self.ternary_statement(expr, line);
        }

        self.consume(&TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Statement::Expression { expr, line })
    }

    /// Parses both branches of a statement-level ternary.
    ///
    /// Each branch is a `print` statement or a bare expression. The true
    /// branch ends at `:` and the false branch at `;`.
    ///
    /// Grammar:
    /// ```text
    ///     ternary_tail := ( "print" expression | expression ) ":"
    ///                     ( "print" expression | expression ) ";"
    /// ```
    fn ternary_statement(&mut self, condition: Expr, line: usize) -> ParseResult<Statement> {
        let true_branch = if let Some(keyword) = self.match_any(&[TokenKind::Print]) {
            self.print_statement(keyword.line, true)?
        } else {
            let expr = self.expression()?;
            self.consume(&TokenKind::Colon, "Expected ':' after statement.")?;
            Statement::Expression { line: expr.line_number(),
                                    expr }
        };

        let false_branch = if let Some(keyword) = self.match_any(&[TokenKind::Print]) {
            self.print_statement(keyword.line, false)?
        } else {
            let expr = self.expression()?;
            self.consume(&TokenKind::Semicolon, "Expect ';' after expression.")?;
            Statement::Expression { line: expr.line_number(),
                                    expr }
        };

        Ok(Statement::Ternary { condition,
                                true_branch: Box::new(true_branch),
                                false_branch: Box::new(false_branch),
                                line })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::Statement,
        error::Diagnostics,
        interpreter::{lexer::tokenize, parser::parse},
    };

    fn parse_source(source: &str) -> (Vec<Statement>, Vec<String>) {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        let errors = diagnostics.errors().iter().map(ToString::to_string).collect();
        (program, errors)
    }

    #[test]
    fn for_loop_becomes_block_around_while() {
        let (program, errors) = parse_source("for (var i = 0; i < 3; i++) print i;");
        assert!(errors.is_empty(), "{errors:?}");

        let [Statement::Block { statements, .. }] = program.as_slice() else {
            panic!("expected a single block, got {program:?}");
        };
        assert!(matches!(statements[0], Statement::VariableDeclaration { .. }));
        let Statement::While { body, .. } = &statements[1] else {
            panic!("expected a while loop");
        };
        assert!(matches!(**body, Statement::Block { .. }));
    }

    #[test]
    fn recovers_and_reports_every_error() {
        let (program, errors) = parse_source("var = 1;\nprint 2;\nvar x = ;\nprint 3;");
        assert_eq!(errors,
                   vec!["Error on line 1 at '=': Expect variable name.",
                        "Error on line 3 at ';': Expect expression."]);
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn recovers_at_statement_keyword_without_semicolon() {
        let (program, errors) = parse_source("var = 5 print 1;\nfun 3 x while (false) print 2;");
        assert_eq!(errors,
                   vec!["Error on line 1 at '=': Expect variable name.",
                        "Error on line 2 at '3': Expect function name."]);
        assert!(matches!(program.as_slice(),
                         [Statement::Print { .. }, Statement::While { .. }]));
    }

    #[test]
    fn missing_semicolon_at_end() {
        let (_, errors) = parse_source("print 1");
        assert_eq!(errors, vec!["Error on line 1 at end: Expect ';' after value."]);
    }

    #[test]
    fn invalid_assignment_target_is_not_fatal() {
        let (program, errors) = parse_source("1 = 2; print 3;");
        assert_eq!(errors, vec!["Error on line 1 at '=': Invalid assignment target."]);
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn ternary_with_print_branches() {
        let (program, errors) = parse_source("true ? print \"yes\" : print \"no\";");
        assert!(errors.is_empty(), "{errors:?}");
        let [Statement::Ternary { true_branch, false_branch, .. }] = program.as_slice() else {
            panic!("expected a ternary, got {program:?}");
        };
        assert!(matches!(**true_branch, Statement::Print { .. }));
        assert!(matches!(**false_branch, Statement::Print { .. }));
    }

    #[test]
    fn top_level_return_is_reported() {
        let (_, errors) = parse_source("return 1;");
        assert_eq!(errors,
                   vec!["Error on line 1 at 'return': Cannot return from top-level code."]);
    }

    #[test]
    fn parameter_cap() {
        let params = (0..256).map(|i| format!("p{i}")).collect::<Vec<_>>().join(", ");
        let (program, errors) = parse_source(&format!("fun f({params}) {{}}"));
        assert_eq!(errors,
                   vec!["Error on line 1 at 'p255': Cannot have more than 255 parameters."]);
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn argument_cap() {
        let arguments = (0..256).map(|i| format!("a{i}")).collect::<Vec<_>>().join(", ");
        let (program, errors) = parse_source(&format!("f({arguments});"));
        assert_eq!(errors,
                   vec!["Error on line 1 at 'a255': Cannot have more than 255 arguments."]);
        assert_eq!(program.len(), 1);
    }
}
