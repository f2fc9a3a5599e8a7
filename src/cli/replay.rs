//! Replay command: drive a session from an event script.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::export;
use crate::script;
use crate::session::{Notice, Session};

use super::format::{describe_session, format_rejection};

pub(super) struct Options {
    pub out_dir: PathBuf,
    pub stdout: bool,
    pub strict: bool,
}

pub(super) fn cmd_replay(
    config: &Config,
    script_path: &Path,
    options: &Options,
) -> Result<(), String> {
    let lines = script::read(script_path)
        .map_err(|e| format!("failed to read {}: {e}", script_path.display()))?;

    let mut session = Session::new(config.settings());
    info!(session = %session.id(), events = lines.len(), "replaying script");

    let mut rejected = 0usize;
    for line in &lines {
        match session.handle(&line.event) {
            Ok(Notice::Exported(document)) => {
                let path = export::save(&document, &options.out_dir)
                    .map_err(|e| format!("line {}: failed to save export: {e}", line.line))?;
                eprintln!("{:>4}  exported → {}", line.line, path.display());
            }
            Ok(Notice::Ignored) => {}
            Ok(notice) => eprintln!("{:>4}  {notice}", line.line),
            Err(rejection) => {
                rejected += 1;
                let message = format_rejection(&rejection);
                if options.strict {
                    return Err(format!("line {}: {message}", line.line));
                }
                eprintln!("{:>4}  rejected: {message}", line.line);
            }
        }
    }

    eprintln!("{}", describe_session(&session));
    if rejected > 0 {
        eprintln!("{rejected} event(s) rejected");
    }

    if options.stdout {
        // Bypasses the mission-mode gate: this is the replay's own output,
        // not an export event.
        let json = export::to_json(&export::export(&session))
            .map_err(|e| format!("failed to serialize export: {e}"))?;
        println!("{json}");
    }

    Ok(())
}
