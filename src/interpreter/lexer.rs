use logos::Logos;

use crate::error::{Diagnostics, SyntaxError};

/// The kind of a lexical token, with its literal payload where it has one.
///
/// Keywords win over identifiers of the same length, so `while` scans as
/// [`TokenKind::While`] and `whilst` as an identifier.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `/`
    #[token("/")]
    Slash,
    /// `*`
    #[token("*")]
    Star,
    /// `%`
    #[token("%")]
    Percent,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `+.`, stringifying concatenation.
    #[token("+.")]
    PlusDot,
    /// `**`
    #[token("**")]
    StarStar,
    /// `+=`
    #[token("+=")]
    PlusEqual,
    /// `-=`
    #[token("-=")]
    MinusEqual,
    /// `/=`
    #[token("/=")]
    SlashEqual,
    /// `*=`
    #[token("*=")]
    StarEqual,
    /// `?`, opens a statement-level ternary.
    #[token("?")]
    Question,
    /// `:`, separates the ternary branches.
    #[token(":")]
    Colon,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// Identifier tokens; variable or function names such as `x` or `add`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// String literal; the payload excludes the quotes.
    #[token("\"", lex_string)]
    String(String),
    /// Numeric literal tokens, such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// `and`
    #[token("and")]
    And,
    /// `class`
    #[token("class")]
    Class,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `for`
    #[token("for")]
    For,
    /// `if`
    #[token("if")]
    If,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `or`
    #[token("or")]
    Or,
    /// `print`
    #[token("print")]
    Print,
    /// `return`
    #[token("return")]
    Return,
    /// `super`
    #[token("super")]
    Super,
    /// `this`
    #[token("this")]
    This,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// A token as consumed by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is, with its literal payload.
    pub kind:   TokenKind,
    /// The exact source text of the token.
    pub lexeme: String,
    /// The source line on which the token ends.
    pub line:   usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self { kind,
               lexeme: lexeme.into(),
               line }
    }
}

/// Scans `source` into a finished token stream.
///
/// Lexical errors are reported to `diagnostics` and scanning resumes after the
/// offending text, so the returned stream is always usable by the parser.
///
/// ## Example
/// ```
/// use tern::{error::Diagnostics, interpreter::lexer::{TokenKind, tokenize}};
///
/// let mut diagnostics = Diagnostics::new();
/// let tokens = tokenize("var x = 1;", &mut diagnostics);
///
/// assert!(!diagnostics.had_error());
/// assert_eq!(tokens[0].kind, TokenKind::Var);
/// assert_eq!(tokens[3].kind, TokenKind::Number(1.0));
/// ```
pub fn tokenize(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let line = lexer.extras.line;
        match result {
            Ok(kind) => tokens.push(Token::new(kind, lexer.slice(), line)),
            Err(()) if lexer.slice().starts_with('"') => {
                diagnostics.report(SyntaxError::lexical(line, "Unterminated string."));
            },
            Err(()) => {
                diagnostics.report(SyntaxError::lexical(line, "Unexpected character."));
            },
        }
    }

    tokens
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_number(lex: &logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Scans the body of a string literal after its opening quote.
///
/// Strings may span lines; embedded newlines advance the line counter. An
/// unterminated string swallows the rest of the input and yields `None`,
/// which surfaces as a lexical error.
fn lex_string(lex: &mut logos::Lexer<TokenKind>) -> Option<String> {
    let remainder = lex.remainder();
    let Some(end) = remainder.find('"') else {
        let (length, newlines) = (remainder.len(), remainder.matches('\n').count());
        lex.extras.line += newlines;
        lex.bump(length);
        return None;
    };

    let text = remainder[..end].to_string();
    lex.extras.line += text.matches('\n').count();
    lex.bump(end + 1);
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        assert!(!diagnostics.had_error(), "{:?}", diagnostics.errors());
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scans_compound_operators_before_single_ones() {
        assert_eq!(kinds("+ += ++ +. ** *= -- -= /= == != <= >="),
                   vec![TokenKind::Plus,
                        TokenKind::PlusEqual,
                        TokenKind::PlusPlus,
                        TokenKind::PlusDot,
                        TokenKind::StarStar,
                        TokenKind::StarEqual,
                        TokenKind::MinusMinus,
                        TokenKind::MinusEqual,
                        TokenKind::SlashEqual,
                        TokenKind::EqualEqual,
                        TokenKind::BangEqual,
                        TokenKind::LessEqual,
                        TokenKind::GreaterEqual]);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(kinds("while whilst do_it fun"),
                   vec![TokenKind::While,
                        TokenKind::Identifier("whilst".to_string()),
                        TokenKind::Identifier("do_it".to_string()),
                        TokenKind::Fun]);
    }

    #[test]
    fn tracks_lines_across_comments_and_strings() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("a // note\n\"two\nlines\" b", &mut diagnostics);

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].kind, TokenKind::String("two\nlines".to_string()));
        assert_eq!(tokens[1].line, 3);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn reports_lexical_errors_and_keeps_going() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("a @ b \"open", &mut diagnostics);

        assert_eq!(tokens.len(), 2);
        let messages: Vec<_> = diagnostics.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Unexpected character.", "Unterminated string."]);
    }

    #[test]
    fn numbers_are_doubles() {
        assert_eq!(kinds("12 3.5 7."),
                   vec![TokenKind::Number(12.0),
                        TokenKind::Number(3.5),
                        TokenKind::Number(7.0),
                        TokenKind::Dot]);
    }
}
