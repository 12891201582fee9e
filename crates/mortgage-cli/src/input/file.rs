use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Input file encodings, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Read a loan input file (JSON, or YAML by extension) as a JSON value.
pub fn read_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    parse(&contents, Format::from_path(&resolved))
        .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e).into())
}

fn parse(contents: &str, format: Format) -> Result<Value, Box<dyn std::error::Error>> {
    let value = match format {
        Format::Json => serde_json::from_str(contents)?,
        Format::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(value)
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        return Err(format!("Input file not found: {}", resolved.display()).into());
    }
    Ok(resolved)
}
