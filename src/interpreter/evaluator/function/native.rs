use std::rc::Rc;

use crate::interpreter::{
    environment::Environment,
    evaluator::function::{conversion, file, process, system},
    value::{
        callable::{Callable, NativeFunction},
        core::Value,
    },
};

/// Defines native functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - the global name scripts call it by,
/// - its exact arity,
/// - a function pointer implementing it.
///
/// The macro produces:
/// - `NATIVE_TABLE` (static table used for registration),
/// - `NATIVE_FUNCTIONS` (public list of native names).
macro_rules! native_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static NATIVE_TABLE: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Every name bound in a fresh global scope.
        pub const NATIVE_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

native_functions! {
    "newFile"    => { arity: 1, func: |_, args| Ok(file::new_file(&args[0])) },
    "getFile"    => { arity: 1, func: |_, args| Ok(file::get_file(&args[0])) },
    "deleteFile" => { arity: 1, func: |_, args| Ok(file::delete_file(&args[0])) },
    "writeFile"  => { arity: 2, func: |_, args| Ok(file::write_file(&args[0], &args[1])) },
    "runCommand" => { arity: 1, func: |_, args| Ok(process::run_command(&args[0])) },
    "time"       => { arity: 0, func: |_, _| Ok(system::time()) },
    "sleep"      => { arity: 1, func: |_, args| Ok(system::sleep(&args[0])) },
    "input"      => { arity: 0, func: |interpreter, _| Ok(system::input(interpreter)) },
    "type"       => { arity: 1, func: |_, args| Ok(conversion::type_of(&args[0])) },
    "number"     => { arity: 1, func: |_, args| Ok(conversion::number(&args[0])) },
    "string"     => { arity: 1, func: |_, args| Ok(conversion::string(&args[0])) },
    "bool"       => { arity: 1, func: |_, args| Ok(conversion::boolean(&args[0])) },
}

/// Binds every native function in `globals`.
pub fn register(globals: &Environment) {
    for native in NATIVE_TABLE {
        globals.define(native.name, Value::Function(Callable::Native(Rc::new(*native))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_native_is_bound_once() {
        let globals = Environment::global();
        register(&globals);

        let mut expected: Vec<_> = NATIVE_FUNCTIONS.iter().map(ToString::to_string).collect();
        expected.sort();
        assert_eq!(globals.local_names(), expected);
    }

    #[test]
    fn natives_display_uniformly() {
        let globals = Environment::global();
        register(&globals);

        let clock = globals.get("time", 1).unwrap();
        assert_eq!(clock.to_string(), "<native fn>");
    }
}
