//! Event scripts: recorded operator sessions, one event per line.
//!
//! ```text
//! # comments and blank lines are skipped
//! {"event": "toggleMission"}
//! {"event": "doubleClick", "lat": 48.85, "lng": 2.35}
//! {"event": "submit", "kind": "home", "id": "HOME", "name": "Base", "task": "park"}
//! {"event": "export"}
//! ```

use std::path::Path;
use std::{fs, io};

// Trait must be in scope for `.lines()` on `BufRead`.
use io::BufRead;

use crate::model::Event;

/// Errors that can occur while reading a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

pub type Result<T> = core::result::Result<T, ScriptError>;

/// An event and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub event: Event,
}

/// Reads every event from a reader.
pub fn parse(reader: impl BufRead) -> Result<Vec<ScriptLine>> {
    let mut events = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed)
            .map_err(|source| ScriptError::Json { line: i + 1, source })?;
        events.push(ScriptLine { line: i + 1, event });
    }
    Ok(events)
}

/// Reads a script from a file, or from stdin when `path` is `-`.
pub fn read(path: &Path) -> Result<Vec<ScriptLine>> {
    if path == Path::new("-") {
        return parse(io::stdin().lock());
    }
    let file = fs::File::open(path)?;
    parse(io::BufReader::new(file))
}
