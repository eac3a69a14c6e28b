use serde_json::Value;
use std::io::{self, Read};
use tracing::debug;

/// Piped JSON request, if any. An interactive terminal or empty pipe yields
/// `None` so the caller falls back to command-line flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut raw = String::new();
    let bytes = io::stdin().read_to_string(&mut raw)?;
    debug!(bytes, "read request from stdin");

    match raw.trim() {
        "" => Ok(None),
        body => serde_json::from_str(body)
            .map(Some)
            .map_err(|e| format!("stdin is not a valid loan request: {}", e).into()),
    }
}
