use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A single scope: its bindings and the scope it is nested in.
struct Frame {
    values:    HashMap<String, Value>,
    enclosing: Option<Environment>,
}

/// A handle to a scope in the environment chain.
///
/// Frames are reference counted with interior mutability: a closure keeps its
/// defining frame alive after the block or call that created it has finished,
/// and every holder observes mutations made through [`Environment::assign`].
/// Cloning a handle never copies bindings.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// Creates a root scope with no enclosing frame.
    #[must_use]
    pub fn global() -> Self {
        Self(Rc::new(RefCell::new(Frame { values:    HashMap::new(),
                                          enclosing: None, })))
    }

    /// Creates a child scope of `enclosing`.
    #[must_use]
    pub fn enclosed(enclosing: &Self) -> Self {
        Self(Rc::new(RefCell::new(Frame { values:    HashMap::new(),
                                          enclosing: Some(enclosing.clone()), })))
    }

    /// Binds `name` in this frame only, overwriting any previous binding here.
    /// Enclosing frames are never touched, so a redeclaration simply shadows.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().values.insert(name.into(), value);
    }

    /// Looks `name` up in this frame, then outward through the enclosing
    /// chain.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let globals = Environment::global();
    /// globals.define("a", Value::Number(1.0));
    /// let inner = Environment::enclosed(&globals);
    ///
    /// assert_eq!(inner.get("a", 1).unwrap(), Value::Number(1.0));
    /// assert!(inner.get("b", 1).is_err());
    /// ```
    pub fn get(&self, name: &str, line: usize) -> EvalResult<Value> {
        let mut current = self.clone();
        loop {
            let enclosing = {
                let frame = current.0.borrow();
                if let Some(value) = frame.values.get(name) {
                    return Ok(value.clone());
                }
                frame.enclosing.clone()
            };

            match enclosing {
                Some(next) => current = next,
                None => {
                    return Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                                 line });
                },
            }
        }
    }

    /// Overwrites the nearest existing binding of `name`.
    ///
    /// Assignment never creates a binding: if no frame in the chain defines
    /// `name`, an `UndefinedVariable` error is returned.
    pub fn assign(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let mut current = self.clone();
        loop {
            let enclosing = {
                let mut frame = current.0.borrow_mut();
                if let Some(slot) = frame.values.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }
                frame.enclosing.clone()
            };

            match enclosing {
                Some(next) => current = next,
                None => {
                    return Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                                 line });
                },
            }
        }
    }

    /// Returns `true` if this frame itself binds `name`.
    #[must_use]
    pub fn contains_local(&self, name: &str) -> bool {
        self.0.borrow().values.contains_key(name)
    }

    /// The names bound directly in this frame, sorted.
    #[must_use]
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.0.borrow().values.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.0.borrow();
        f.debug_struct("Environment")
         .field("names", &self.local_names())
         .field("enclosed", &frame.enclosing.is_some())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_shadows_without_touching_the_enclosing_frame() {
        let globals = Environment::global();
        globals.define("a", Value::Number(1.0));

        let block = Environment::enclosed(&globals);
        block.define("a", Value::Number(2.0));

        assert_eq!(block.get("a", 1).unwrap(), Value::Number(2.0));
        assert_eq!(globals.get("a", 1).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn assign_mutates_the_nearest_binding_seen_by_every_holder() {
        let globals = Environment::global();
        globals.define("count", Value::Number(0.0));
        let first = Environment::enclosed(&globals);
        let second = Environment::enclosed(&globals);

        first.assign("count", Value::Number(5.0), 1).unwrap();

        assert_eq!(second.get("count", 1).unwrap(), Value::Number(5.0));
        assert!(!first.contains_local("count"));
    }

    #[test]
    fn assign_never_creates_a_binding() {
        let globals = Environment::global();
        let inner = Environment::enclosed(&globals);

        let error = inner.assign("ghost", Value::Nil, 7).unwrap_err();

        assert!(matches!(error, RuntimeError::UndefinedVariable { ref name, line: 7 } if name == "ghost"));
        assert!(globals.get("ghost", 7).is_err());
    }

    #[test]
    fn redefinition_in_the_same_frame_overwrites() {
        let globals = Environment::global();
        globals.define("x", Value::Number(1.0));
        globals.define("x", Value::from("again"));

        assert_eq!(globals.get("x", 1).unwrap(), Value::from("again"));
        assert_eq!(globals.local_names(), vec!["x".to_string()]);
    }
}
