//! CLI interface for Plotter.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//! Notices go to stderr; documents go to files or stdout.

mod check;
mod format;
mod replay;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::mission::parse_clock;

/// Plotter — plan missions from recorded map sessions.
#[derive(Debug, Parser)]
#[command(name = "plotter", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Config file to use instead of `~/.plotter/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: plan and export a mission
  1. Record the session as JSON lines (session.jsonl):
       {"event": "toggleMission"}
       {"event": "doubleClick", "lat": 48.8566, "lng": 2.3522}
       {"event": "submit", "kind": "home", "id": "HOME", "name": "Base",
        "task": "park", "missionName": "paris", "missionType": "linear"}
       {"event": "export"}
  2. plotter replay session.jsonl --out-dir missions/
     → writes missions/mission-plan-paris.json
  3. plotter check missions/mission-plan-paris.json

Events: toggleMission, toggleWorkZone, click, doubleClick, submit, cancel,
clear, export."#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay an event script through a fresh session.
    ///
    /// Each notice is printed to stderr. Each export event writes
    /// `mission-plan-<name>.json` into the output directory.
    Replay {
        /// Event script (JSON lines), or `-` for stdin.
        script: PathBuf,

        /// Directory for exported missions. Defaults to `out-dir` from
        /// config, then the current directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Also print the final session's export JSON to stdout.
        #[arg(long)]
        stdout: bool,

        /// Stop at the first rejected event instead of carrying on.
        #[arg(long)]
        strict: bool,
    },

    /// Check an exported mission file against the planning rules.
    ///
    /// Exits non-zero and lists findings if any rule is broken.
    Check {
        /// Exported mission JSON.
        path: PathBuf,
    },

    /// Convert an `H:M:S` duration to seconds.
    Time {
        /// Duration, e.g. `1:02:30`.
        value: String,
    },
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            script,
            out_dir,
            stdout,
            strict,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            let out_dir = out_dir
                .or_else(|| config.out_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let options = replay::Options {
                out_dir,
                stdout,
                strict,
            };
            replay::cmd_replay(&config, &script, &options)
        }
        Command::Check { path } => check::cmd_check(&path),
        Command::Time { value } => cmd_time(&value),
    }
}

fn cmd_time(value: &str) -> Result<(), String> {
    let seconds =
        parse_clock(value).ok_or_else(|| format!("invalid duration '{value}' (expected H:M:S)"))?;
    println!("{seconds}");
    Ok(())
}
