mod config;
mod db;
mod error;
mod identity;
mod ipc;
mod kv;
mod model;
mod session;
mod store;
mod views;

use clap::Parser;
use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the IPC channel; logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = config::Cli::parse();
    let settings = config::load_settings(&cli)?;
    init_tracing(&settings.log_filter);
    if let Some(warning) = &settings.config_warning {
        tracing::warn!(error = %warning, "ignoring unusable config file; using defaults");
    }

    let mut state = ipc::AppState::new();
    if let Some(workspace) = settings.workspace.as_deref() {
        if let Err(e) = ipc::open_workspace(&mut state, workspace) {
            tracing::error!(
                workspace = %workspace.to_string_lossy(),
                error = ?e,
                "failed to open configured workspace; waiting for workspace.select"
            );
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                let _ = writeln!(
                    stdout,
                    "{}",
                    json!({
                        "ok": false,
                        "error": { "code": "bad_json", "message": e.to_string() }
                    })
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    tracing::debug!("stdin closed; exiting");
    Ok(())
}
