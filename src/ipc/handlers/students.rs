use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{required_str, sheet_mut};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn students_add(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let name = required_str(req, "name")?;
    let s = sheet_mut(state)?;
    let added = s.handle_add_student(name)?;
    Ok(json!({ "added": added, "roster": s.roster() }))
}

fn students_request_delete(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let name = required_str(req, "name")?;
    let s = sheet_mut(state)?;
    s.request_delete(name)?;
    Ok(json!({ "pendingDelete": s.pending_delete() }))
}

fn students_cancel_delete(
    state: &mut AppState,
    _req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let s = sheet_mut(state)?;
    s.cancel_delete();
    Ok(json!({ "pendingDelete": null }))
}

fn students_confirm_delete(
    state: &mut AppState,
    _req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let s = sheet_mut(state)?;
    let removed = s.confirm_delete()?;
    Ok(json!({ "removed": removed, "roster": s.roster() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "students.add" => students_add(state, req),
        "students.requestDelete" => students_request_delete(state, req),
        "students.cancelDelete" => students_cancel_delete(state, req),
        "students.confirmDelete" => students_confirm_delete(state, req),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
