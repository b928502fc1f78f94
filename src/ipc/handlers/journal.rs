use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{optional_str, sheet, sheet_mut, to_value};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_journal_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = sheet(state).and_then(|s| to_value(&s.view()));
    respond(&req.id, result.map(|view| json!({ "sheet": view })))
}

/// Either axis may be switched on its own; the other keeps its current value.
fn journal_select(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let class_name = optional_str(req, "className")?;
    let subject = optional_str(req, "subject")?;
    let s = sheet_mut(state)?;

    let class_name = class_name
        .map(str::to_string)
        .unwrap_or_else(|| s.selection().class_name.clone());
    let subject = subject
        .map(str::to_string)
        .unwrap_or_else(|| s.selection().subject.clone());
    s.select(&class_name, &subject)?;

    Ok(json!({ "sheet": to_value(&s.view())? }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "journal.get" => Some(handle_journal_get(state, req)),
        "journal.select" => Some(respond(&req.id, journal_select(state, req))),
        _ => None,
    }
}
