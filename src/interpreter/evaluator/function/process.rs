use std::process::Command;

use crate::interpreter::value::core::Value;

/// Runs `command` through the platform shell and returns what it wrote to
/// standard output.
///
/// The exit status is not inspected. Returns `nil` only when the shell could
/// not be started.
#[must_use]
pub fn run_command(command: &Value) -> Value {
    let command = command.to_string();
    match shell(&command).output() {
        Ok(output) => Value::from(String::from_utf8_lossy(&output.stdout).into_owned()),
        Err(error) => {
            tracing::debug!(%command, %error, "runCommand");
            Value::Nil
        },
    }
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.args(["/C", command]);
    shell
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("sh");
    shell.args(["-c", command]);
    shell
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_standard_output() {
        assert_eq!(run_command(&Value::from("echo hello")), Value::from("hello\n"));
    }
}
