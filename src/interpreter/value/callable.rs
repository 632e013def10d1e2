use std::{fmt, rc::Rc};

use crate::{
    ast::FunctionDef,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

/// Signature every native binding implements.
///
/// A native receives the running interpreter (for its input and output
/// streams) and the already arity-checked, evaluated arguments.
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> EvalResult<Value>;

/// A function implemented by the host.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    /// The global name the function is bound to.
    pub name:  &'static str,
    /// The exact number of arguments the function takes.
    pub arity: usize,
    /// The host implementation.
    pub func:  NativeFn,
}

/// A function declared in a script, paired with the environment that was
/// active when its declaration executed.
pub struct UserFunction {
    /// The shared declaration (name, parameters, body).
    pub declaration: Rc<FunctionDef>,
    /// The captured defining scope. Calls layer a fresh frame on top of it.
    pub closure:     Environment,
}

/// A value that can be called.
///
/// Clones share the underlying function, and equality between callables is
/// reference identity.
#[derive(Clone)]
pub enum Callable {
    /// Host-provided function.
    Native(Rc<NativeFunction>),
    /// Script-defined function with its closure.
    User(Rc<UserFunction>),
}

impl Callable {
    /// Wraps a declaration and the environment it closes over.
    #[must_use]
    pub fn user(declaration: Rc<FunctionDef>, closure: Environment) -> Self {
        Self::User(Rc::new(UserFunction { declaration,
                                          closure }))
    }

    /// The number of arguments a call must supply.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Native(native) => native.arity,
            Self::User(function) => function.declaration.params.len(),
        }
    }

    /// Returns `true` if both handles refer to the same function object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Native(a), Self::Native(b)) => Rc::ptr_eq(a, b),
            (Self::User(a), Self::User(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Invokes the function with arguments whose count already matches
    /// [`Callable::arity`].
    ///
    /// Natives run synchronously on the host. User functions execute their
    /// body in a new frame on top of their closure; see
    /// [`Interpreter::call_user_function`].
    pub fn call(&self,
                interpreter: &mut Interpreter,
                arguments: Vec<Value>,
                line: usize)
                -> EvalResult<Value> {
        match self {
            Self::Native(native) => (native.func)(interpreter, &arguments),
            Self::User(function) => interpreter.call_user_function(function, arguments, line),
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => write!(f, "<native fn>"),
            Self::User(function) => write!(f, "<fn {}>", function.declaration.name),
        }
    }
}

// Closures can reach themselves through their environment, so the derived
// output would never terminate.
impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(native) => f.debug_struct("Native")
                                     .field("name", &native.name)
                                     .field("arity", &native.arity)
                                     .finish(),
            Self::User(function) => f.debug_struct("User")
                                     .field("name", &function.declaration.name)
                                     .field("params", &function.declaration.params)
                                     .finish_non_exhaustive(),
        }
    }
}
