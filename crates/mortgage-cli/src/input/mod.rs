pub mod file;
pub mod stdin;

use serde_json::Value;

/// Resolve command input: an explicit file wins, then piped stdin.
///
/// Returns `None` when neither is present so the caller falls back to flags.
pub fn load(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_value(path)?));
    }
    stdin::read_stdin()
}
