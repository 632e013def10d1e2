use std::fs::{self, OpenOptions};

use crate::interpreter::value::core::Value;

/// Creates an empty file at the display form of `path`.
///
/// Returns `false` when the file already exists or cannot be created.
#[must_use]
pub fn new_file(path: &Value) -> Value {
    let path = path.to_string();
    let created = OpenOptions::new().write(true)
                                    .create_new(true)
                                    .open(&path)
                                    .inspect_err(|error| tracing::debug!(%path, %error, "newFile"))
                                    .is_ok();
    Value::Bool(created)
}

/// Reads a whole file as text, or `nil` when it cannot be read.
#[must_use]
pub fn get_file(path: &Value) -> Value {
    let path = path.to_string();
    fs::read_to_string(&path).inspect_err(|error| tracing::debug!(%path, %error, "getFile"))
                             .ok()
                             .into()
}

/// Removes a file, returning whether it was removed.
#[must_use]
pub fn delete_file(path: &Value) -> Value {
    let path = path.to_string();
    let removed = fs::remove_file(&path).inspect_err(|error| {
                                            tracing::debug!(%path, %error, "deleteFile");
                                        })
                                        .is_ok();
    Value::Bool(removed)
}

/// Replaces the contents of a file with the display form of `contents`,
/// creating it if needed.
#[must_use]
pub fn write_file(path: &Value, contents: &Value) -> Value {
    let path = path.to_string();
    let written = fs::write(&path, contents.to_string()).inspect_err(|error| {
                                                            tracing::debug!(%path, %error,
                                                                            "writeFile");
                                                        })
                                                        .is_ok();
    Value::Bool(written)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tern-{}-{name}", std::process::id()))
    }

    #[test]
    fn file_lifecycle() {
        let path = scratch("lifecycle.txt");
        let path_value = Value::from(path.to_string_lossy().as_ref());

        assert_eq!(new_file(&path_value), Value::Bool(true));
        assert_eq!(new_file(&path_value), Value::Bool(false));
        assert_eq!(write_file(&path_value, &Value::Number(42.0)), Value::Bool(true));
        assert_eq!(get_file(&path_value), Value::from("42"));
        assert_eq!(delete_file(&path_value), Value::Bool(true));
        assert_eq!(delete_file(&path_value), Value::Bool(false));
        assert_eq!(get_file(&path_value), Value::Nil);
    }
}
