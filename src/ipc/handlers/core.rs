use crate::config::JournalConfig;
use crate::db::SqliteStore;
use crate::ipc::error::{err, ok, respond, HandlerErr};
use crate::ipc::helpers::{sheet, to_value};
use crate::ipc::types::{AppState, Request, Sheet};
use crate::journal::JournalSheet;
use crate::store::{KeyValueStore, MemoryStore};
use serde_json::json;
use std::path::{Path, PathBuf};

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

/// Best-effort: a broken config file must not prevent the workspace from opening.
fn workspace_config(path: &Path) -> JournalConfig {
    match JournalConfig::load_from_workspace(path) {
        Ok(Some(cfg)) => cfg,
        Ok(None) => JournalConfig::default(),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "ignoring workspace config");
            JournalConfig::default()
        }
    }
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let in_memory = req
        .params
        .get("inMemory")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);

    let (store, config) = match (&p, in_memory) {
        (_, true) => (
            Box::new(MemoryStore::new()) as Box<dyn KeyValueStore>,
            JournalConfig::default(),
        ),
        (Some(path), false) => match SqliteStore::open(path) {
            Ok(store) => (
                Box::new(store) as Box<dyn KeyValueStore>,
                workspace_config(path),
            ),
            Err(e) => return err(&req.id, "db_open_failed", format!("{e:?}"), None),
        },
        (None, false) => return err(&req.id, "bad_params", "missing params.path", None),
    };

    let sheet: Sheet = match JournalSheet::open(store, config) {
        Ok(s) => s,
        Err(e) => return HandlerErr::from(e).response(&req.id),
    };
    let view = sheet.view();
    state.workspace = if in_memory { None } else { p };
    state.journal = Some(sheet);
    tracing::info!(
        workspace = ?state.workspace,
        class = %view.class_name,
        subject = %view.subject,
        "workspace opened"
    );

    respond(
        &req.id,
        to_value(&view).map(|sheet| {
            json!({
                "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
                "sheet": sheet
            })
        }),
    )
}

fn handle_config_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, sheet(state).and_then(|s| to_value(s.config())))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        "config.get" => Some(handle_config_get(state, req)),
        _ => None,
    }
}
