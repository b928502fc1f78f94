use crate::ipc::error::HandlerErr;
use crate::ipc::types::{AppState, Request, Sheet};

pub fn required_str<'a>(req: &'a Request, name: &str) -> Result<&'a str, HandlerErr> {
    match req.params.get(name) {
        Some(v) => v
            .as_str()
            .ok_or_else(|| HandlerErr::bad_params(format!("{name} must be a string"))),
        None => Err(HandlerErr::bad_params(format!("missing {name}"))),
    }
}

pub fn optional_str<'a>(req: &'a Request, name: &str) -> Result<Option<&'a str>, HandlerErr> {
    match req.params.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| HandlerErr::bad_params(format!("{name} must be a string"))),
    }
}

pub fn sheet(state: &AppState) -> Result<&Sheet, HandlerErr> {
    state
        .journal
        .as_ref()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))
}

pub fn sheet_mut(state: &mut AppState) -> Result<&mut Sheet, HandlerErr> {
    state
        .journal
        .as_mut()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))
}

pub fn to_value<T: serde::Serialize>(v: &T) -> Result<serde_json::Value, HandlerErr> {
    serde_json::to_value(v).map_err(|e| HandlerErr::new("internal", e.to_string()))
}
