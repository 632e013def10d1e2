use std::{fmt, rc::Rc};

use crate::{
    ast::LiteralValue,
    interpreter::value::callable::Callable,
    util::num::format_number,
};

/// Represents a runtime value in the interpreter.
///
/// Values are immutable once produced. Cloning is cheap: text is shared
/// through `Rc<str>` and functions through `Rc` handles.
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A string.
    Text(Rc<str>),
    /// The absence of a value.
    Nil,
    /// A native or user-defined function.
    Function(Callable),
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::String(s) => Self::Text(Rc::clone(s)),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Nil => Self::Nil,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(Rc::from(v))
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        v.map_or(Self::Nil, Self::from)
    }
}

impl Value {
    /// Maps the value to a boolean for use in conditionals.
    ///
    /// `nil` is false, booleans are themselves, a number is false exactly when
    /// it equals zero, and everything else is true.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Nil.is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(Value::Number(-2.5).is_truthy());
    /// assert!(Value::from("").is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Text(_) | Self::Function(_) => true,
        }
    }

    /// Returns the number held by this value, if it is one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Structural equality for numbers, booleans and text; reference identity for
/// functions; `nil` equals only `nil`. Values of different types are never
/// equal.
///
/// Numbers compare by representation rather than by IEEE `==`: every NaN
/// equals every other NaN, and `0` and `-0` differ.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => {
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
            },
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Nil, Self::Nil) => true,
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// The canonical text form of a value.
///
/// Numbers drop a trailing `.0`, so `3.0` displays as `3`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Nil => write!(f, "nil"),
            Self::Function(callable) => write!(f, "{callable}"),
        }
    }
}
