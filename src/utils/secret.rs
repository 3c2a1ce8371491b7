use std::fs;

use tracing::error;

/// Resolves a secret, preferring a file referenced by `file_var_name`
/// (e.g. a mounted container secret) over the plain `var_name` value.
///
/// `lookup` abstracts the environment so callers can feed it from
/// `std::env::var` or from a fixed map in tests.
pub fn get_secret<F>(lookup: F, file_var_name: &str, var_name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secret_file_path) = lookup(file_var_name) {
        match fs::read_to_string(&secret_file_path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) => {
                error!(%secret_file_path, ?e, "Error reading secret file");
                None
            }
        }
    } else {
        lookup(var_name)
    }
}
