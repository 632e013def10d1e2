/// The call protocol.
///
/// Checks that the callee is a function and that the argument count matches,
/// then runs natives on the host or user functions in a fresh frame on top of
/// their closure.
pub mod core;

/// The table of native bindings and their registration into the global scope.
pub mod native;

/// `newFile`, `getFile`, `deleteFile` and `writeFile`.
pub mod file;

/// `runCommand`.
pub mod process;

/// `time`, `sleep` and `input`.
pub mod system;

/// `type`, `number`, `string` and `bool`.
pub mod conversion;
