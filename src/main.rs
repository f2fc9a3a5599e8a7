mod cli;
mod config;
mod export;
mod geometry;
mod mission;
mod model;
mod script;
mod session;

use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("PLOTTER_LOG").unwrap_or_else(|_| "plotter=warn".into()),
        )
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
