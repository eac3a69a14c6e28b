use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load a loan request from a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let location = locate(path)?;
    debug!(path = %location.display(), "reading request file");

    let contents = fs::read_to_string(&location)
        .map_err(|e| format!("cannot read request file '{}': {}", location.display(), e))?;
    serde_json::from_str(&contents).map_err(|e| {
        format!(
            "request file '{}' is not a valid loan request: {}",
            location.display(),
            e
        )
        .into()
    })
}

fn locate(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let given = Path::new(path);
    let location = if given.is_absolute() {
        given.to_path_buf()
    } else {
        std::env::current_dir()?.join(given)
    };

    match fs::metadata(&location) {
        Ok(meta) if meta.is_file() => Ok(location),
        Ok(_) => Err(format!("request path is not a file: {}", location.display()).into()),
        Err(_) => Err(format!("request file not found: {}", location.display()).into()),
    }
}
