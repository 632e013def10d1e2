use std::{
    thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::{
    interpreter::{evaluator::core::Interpreter, value::core::Value},
    util::num::parse_number,
};

/// Seconds since the Unix epoch, with a fractional part.
#[must_use]
pub fn time() -> Value {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)
                               .map_or(0.0, |elapsed| elapsed.as_secs_f64());
    Value::Number(now)
}

/// Blocks the whole interpreter for the given number of seconds.
///
/// Text is parsed as a number first. Returns `false` without sleeping when
/// the duration is negative, not finite, or not a number at all.
#[must_use]
pub fn sleep(seconds: &Value) -> Value {
    let seconds = match seconds {
        Value::Number(n) => Some(*n),
        other => parse_number(&other.to_string()),
    };

    match seconds.map(Duration::try_from_secs_f64) {
        Some(Ok(duration)) => {
            thread::sleep(duration);
            Value::Bool(true)
        },
        _ => Value::Bool(false),
    }
}

/// Reads one line from the interpreter's input, or `nil` at end of input.
#[must_use]
pub fn input(interpreter: &mut Interpreter) -> Value {
    interpreter.read_line().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_rejects_bad_durations() {
        assert_eq!(sleep(&Value::Number(-1.0)), Value::Bool(false));
        assert_eq!(sleep(&Value::from("soon")), Value::Bool(false));
        assert_eq!(sleep(&Value::Nil), Value::Bool(false));
        assert_eq!(sleep(&Value::from("0")), Value::Bool(true));
    }

    #[test]
    fn time_moves_forward() {
        let (Value::Number(first), Value::Number(second)) = (time(), time()) else {
            panic!("time() must return numbers");
        };
        assert!(first > 1.0e9);
        assert!(second >= first);
    }
}
