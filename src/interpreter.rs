/// The evaluator module executes the syntax tree.
///
/// The evaluator walks statements and expressions, applies operators, manages
/// scopes and calls, and produces program output. It is the core execution
/// engine of the interpreter.
///
/// # Responsibilities
/// - Executes statements, unwinding `return` to the enclosing call.
/// - Evaluates expressions with the language's typing and truthiness rules.
/// - Reports runtime errors such as type mismatches or undefined variables.
pub mod evaluator;
/// The environment module holds variable scopes.
///
/// Scopes form a chain from the innermost block out to the globals. Frames
/// are shared so that closures keep their defining scope alive and observe
/// each other's assignments.
pub mod environment;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, and keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, lexeme and
///   line.
/// - Skips comments and whitespace while tracking line numbers.
/// - Reports lexical errors without stopping the scan.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// the statements of a program. It recovers from syntax errors so that one
/// pass reports as many of them as possible.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Rewrites `for` loops into blocks and `while` loops.
/// - Reports syntax errors with location info and resynchronizes.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Every expression evaluates to one of a closed set of values: numbers,
/// booleans, text, `nil`, or a function.
pub mod value;
