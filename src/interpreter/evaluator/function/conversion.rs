use crate::{interpreter::value::core::Value, util::num::parse_number};

/// The name scripts see for a value's type.
///
/// Functions report their display form (`<fn name>` or `<native fn>`), and
/// everything that is not a number, boolean or function, `nil` included,
/// reports `"String"`.
///
/// # Example
/// ```
/// use tern::interpreter::{evaluator::function::conversion::type_of, value::core::Value};
///
/// assert_eq!(type_of(&Value::Number(1.0)), Value::from("Number"));
/// assert_eq!(type_of(&Value::Nil), Value::from("String"));
/// ```
#[must_use]
pub fn type_of(value: &Value) -> Value {
    match value {
        Value::Number(_) => Value::from("Number"),
        Value::Bool(_) => Value::from("Bool"),
        Value::Function(function) => Value::from(function.to_string()),
        Value::Text(_) | Value::Nil => Value::from("String"),
    }
}

/// Parses the display form of `value` as a number, or `nil` if it is not one.
#[must_use]
pub fn number(value: &Value) -> Value {
    parse_number(&value.to_string()).map_or(Value::Nil, Value::Number)
}

/// The display form of `value` as text.
#[must_use]
pub fn string(value: &Value) -> Value {
    Value::from(value.to_string())
}

/// `true` when the display form of `value` is `true` in any letter case,
/// `false` otherwise.
#[must_use]
pub fn boolean(value: &Value) -> Value {
    Value::Bool(value.to_string().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_strips_zero_fraction() {
        assert_eq!(string(&Value::Number(3.0)), Value::from("3"));
        assert_eq!(string(&Value::Number(3.5)), Value::from("3.5"));
        assert_eq!(string(&Value::Nil), Value::from("nil"));
    }

    #[test]
    fn number_parses_text() {
        assert_eq!(number(&Value::from(" 12.5 ")), Value::Number(12.5));
        assert_eq!(number(&Value::from("twelve")), Value::Nil);
        assert_eq!(number(&Value::Number(4.0)), Value::Number(4.0));
    }

    #[test]
    fn bool_is_best_effort() {
        assert_eq!(boolean(&Value::from("TRUE")), Value::Bool(true));
        assert_eq!(boolean(&Value::Bool(true)), Value::Bool(true));
        assert_eq!(boolean(&Value::from("yes")), Value::Bool(false));
    }
}
