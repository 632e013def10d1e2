use std::{mem, rc::Rc};

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw, constant values that can appear directly in
/// source code: numbers, strings, booleans and `nil`. It is also the payload
/// the parser synthesizes when desugaring (`x++` carries `Number(1.0)`, a
/// `for` loop without a condition carries `Bool(true)`).
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A double-precision number literal.
    Number(f64),
    /// A string literal, without its surrounding quotes.
    String(Rc<str>),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// The `nil` literal.
    Nil,
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Expressions always produce a value when evaluated. Every variant records
/// the source line of the token that introduced it so that runtime errors can
/// point back at the script.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean or `nil`).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// A parenthesized expression.
    Grouping {
        /// The inner expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix unary operation (`-x`, `!x`).
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A strict binary operation; both operands are always evaluated.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A short-circuiting `and` / `or`.
    Logical {
        /// Left operand, always evaluated.
        left:  Box<Self>,
        /// The operator.
        op:    LogicalOperator,
        /// Right operand, evaluated only when the left one does not decide.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Plain assignment `name = value`.
    Assign {
        /// Name of the variable being assigned.
        name:  String,
        /// The value which is being assigned.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Compound assignment: `+=`, `-=`, `*=`, `/=`, and the postfix `++`/`--`
    /// (which carry a literal `1` / `-1` as their value).
    CompoundAssign {
        /// Name of the variable being updated.
        name:  String,
        /// The compound operator.
        op:    CompoundOperator,
        /// The right-hand operand.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Function call expression (e.g. `add(1, 2)`).
    Call {
        /// The expression producing the function to call.
        callee:    Box<Self>,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line of the closing parenthesis.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use tern::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Grouping { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Logical { line, .. }
            | Self::Variable { line, .. }
            | Self::Assign { line, .. }
            | Self::CompoundAssign { line, .. }
            | Self::Call { line, .. } => *line,
        }
    }

    /// A childless node left behind when a subtree is detached.
    const fn placeholder() -> Self {
        Self::Literal { value: LiteralValue::Nil,
                        line:  0, }
    }

    /// Moves every direct subexpression of `self` into `pending`.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        match self {
            Self::Literal { .. } | Self::Variable { .. } => {},
            Self::Grouping { expr: child, .. }
            | Self::Unary { operand: child, .. }
            | Self::Assign { value: child, .. }
            | Self::CompoundAssign { value: child, .. } => {
                pending.push(mem::replace(&mut **child, Self::placeholder()));
            },
            Self::Binary { left, right, .. } | Self::Logical { left, right, .. } => {
                pending.push(mem::replace(&mut **left, Self::placeholder()));
                pending.push(mem::replace(&mut **right, Self::placeholder()));
            },
            Self::Call { callee, arguments, .. } => {
                pending.push(mem::replace(&mut **callee, Self::placeholder()));
                pending.append(arguments);
            },
        }
    }
}

/// Tears the tree down with an explicit work list, so dropping a long operator
/// chain does not recurse once per node.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

/// Represents a user-defined function declaration.
///
/// Declarations are shared (`Rc`) between the statement tree and every
/// closure created from them, so executing a `fun` statement never copies the
/// body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, in call order.
    pub params: Vec<String>,
    /// The statements executed when the function is called.
    pub body:   Vec<Statement>,
    /// Line number in the source code.
    pub line:   usize,
}

/// Represents a statement.
///
/// Statements are executed for their effect and never produce a value. There
/// is no `for` variant: the parser rewrites `for` loops into blocks and
/// `while` loops.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Source line.
        line: usize,
    },
    /// `print <expr>;`
    Print {
        /// The expression whose value is printed.
        expr: Expr,
        /// Source line.
        line: usize,
    },
    /// A variable declaration using `var`.
    VariableDeclaration {
        /// The name of the variable.
        name:        String,
        /// The initial value; `nil` when absent.
        initializer: Option<Expr>,
        /// Source line.
        line:        usize,
    },
    /// A braced block introducing a new scope.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// Source line.
        line:       usize,
    },
    /// `if (cond) then else other`
    If {
        /// The branch condition.
        condition:   Expr,
        /// Statement executed when the condition is truthy.
        then_branch: Box<Self>,
        /// Optional statement executed otherwise.
        else_branch: Option<Box<Self>>,
        /// Source line.
        line:        usize,
    },
    /// Statement-level ternary `cond ? a : b;`. Each branch is either a print
    /// statement or an expression statement; the ternary has no value.
    Ternary {
        /// The dispatch condition.
        condition:    Expr,
        /// Statement executed when the condition is truthy.
        true_branch:  Box<Self>,
        /// Statement executed otherwise.
        false_branch: Box<Self>,
        /// Source line.
        line:         usize,
    },
    /// `while (cond) body`
    While {
        /// Loop condition, checked before every iteration.
        condition: Expr,
        /// Loop body.
        body:      Box<Self>,
        /// Source line.
        line:      usize,
    },
    /// `do body while (cond);`
    DoWhile {
        /// Loop body, executed at least once.
        body:      Box<Self>,
        /// Loop condition, checked after every iteration.
        condition: Expr,
        /// Source line.
        line:      usize,
    },
    /// A function declaration.
    Function(Rc<FunctionDef>),
    /// `return [value];`
    Return {
        /// The returned expression; `nil` when absent.
        value: Option<Expr>,
        /// Source line.
        line:  usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::Function(def) => def.line,
            Self::Expression { line, .. }
            | Self::Print { line, .. }
            | Self::VariableDeclaration { line, .. }
            | Self::Block { line, .. }
            | Self::If { line, .. }
            | Self::Ternary { line, .. }
            | Self::While { line, .. }
            | Self::DoWhile { line, .. }
            | Self::Return { line, .. } => *line,
        }
    }

    const fn placeholder() -> Self {
        Self::Block { statements: Vec::new(),
                      line:       0, }
    }

    /// Moves every directly nested statement of `self` into `pending`.
    ///
    /// A function body is only detached when no closure still shares the
    /// declaration.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        match self {
            Self::Block { statements, .. } => pending.append(statements),
            Self::Function(def) => {
                if let Some(def) = Rc::get_mut(def) {
                    pending.append(&mut def.body);
                }
            },
            Self::If { then_branch,
                       else_branch,
                       .. } => {
                pending.push(mem::replace(&mut **then_branch, Self::placeholder()));
                if let Some(branch) = else_branch {
                    pending.push(mem::replace(&mut **branch, Self::placeholder()));
                }
            },
            Self::Ternary { true_branch,
                            false_branch,
                            .. } => {
                pending.push(mem::replace(&mut **true_branch, Self::placeholder()));
                pending.push(mem::replace(&mut **false_branch, Self::placeholder()));
            },
            Self::While { body, .. } | Self::DoWhile { body, .. } => {
                pending.push(mem::replace(&mut **body, Self::placeholder()));
            },
            Self::Expression { .. }
            | Self::Print { .. }
            | Self::VariableDeclaration { .. }
            | Self::Return { .. } => {},
        }
    }
}

impl Drop for Statement {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut statement) = pending.pop() {
            statement.detach_children(&mut pending);
        }
    }
}

/// Represents a strict binary operator.
///
/// Binary operators include arithmetic, concatenation and comparisons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Stringifying concatenation (`+.`)
    Concat,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

/// Short-circuiting logical operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

/// Operators that read, combine and write back a variable in one step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompoundOperator {
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// Postfix `++`
    Increment,
    /// Postfix `--`
    Decrement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_trees_drop_without_recursing() {
        let mut expr = Expr::Literal { value: LiteralValue::Nil,
                                       line:  1, };
        let mut statement = Statement::Print { expr: expr.clone(),
                                               line: 1, };
        for _ in 0..500_000 {
            expr = Expr::Unary { op:      UnaryOperator::Not,
                                 operand: Box::new(expr),
                                 line:    1, };
            statement = Statement::Block { statements: vec![statement],
                                           line:       1, };
        }
        drop(expr);
        drop(statement);
    }
}
