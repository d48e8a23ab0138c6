use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::kv::SqliteKv;
use crate::session::DEFAULT_VIEW;
use crate::store::Tracker;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Opens (or creates) a workspace and loads its lists. Any previous session
/// belonged to the old account list, so it is dropped.
pub fn open_workspace(state: &mut AppState, path: &Path) -> anyhow::Result<()> {
    let conn = db::open_db(path)?;
    let tracker = Tracker::load(Box::new(SqliteKv::new(conn)));
    state.workspace = Some(path.to_path_buf());
    state.tracker = Some(tracker);
    state.session = None;
    state.view = DEFAULT_VIEW.to_string();
    tracing::info!(workspace = %path.to_string_lossy(), "workspace opened");
    Ok(())
}

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    let counts = state.tracker.as_ref().map(|t| {
        json!({
            "accounts": t.accounts().len(),
            "assignments": t.assignments().len(),
            "submissions": t.submissions().len(),
        })
    });
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
            "counts": counts,
            "signedIn": state.session.is_some(),
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match open_workspace(state, &path) {
        Ok(()) => ok(&req.id, json!({ "workspacePath": path.to_string_lossy() })),
        Err(e) => {
            tracing::error!(workspace = %path.to_string_lossy(), error = ?e, "failed to open workspace");
            err(&req.id, "db_open_failed", format!("{e:?}"), None)
        }
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        _ => None,
    }
}
